use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Feature vector has {actual} values but the schema defines {expected}")]
    SchemaViolation { expected: usize, actual: usize },

    #[error("Invalid engine parameters: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
