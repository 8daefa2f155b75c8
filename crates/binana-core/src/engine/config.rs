use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid value for parameter '{parameter}': {reason}")]
    Invalid {
        parameter: &'static str,
        reason: String,
    },
}

/// Distance cutoffs (ångströms) and angle tolerances (degrees) used by the
/// interaction engine.
///
/// Every distance comparison made with these values is strict (`<`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct BinanaParams {
    pub close_contact_cutoff: f64,
    pub contact_cutoff: f64,
    pub electrostatic_cutoff: f64,
    pub active_site_flexibility_cutoff: f64,
    pub hydrophobic_cutoff: f64,
    pub hydrogen_bond_cutoff: f64,
    /// Largest allowed deviation of the donor-H-acceptor angle from 180°.
    pub hydrogen_bond_angle_tolerance: f64,
    /// Added to a ring radius when testing whether a point projects onto it.
    pub pi_padding: f64,
    pub pi_stacking_cutoff: f64,
    pub pi_stacking_angle_tolerance: f64,
    pub t_shaped_cutoff: f64,
    pub t_shaped_angle_tolerance: f64,
    pub pi_cation_cutoff: f64,
    pub salt_bridge_cutoff: f64,
}

impl Default for BinanaParams {
    fn default() -> Self {
        Self {
            close_contact_cutoff: 2.5,
            contact_cutoff: 4.0,
            electrostatic_cutoff: 4.0,
            active_site_flexibility_cutoff: 4.0,
            hydrophobic_cutoff: 4.0,
            hydrogen_bond_cutoff: 4.0,
            hydrogen_bond_angle_tolerance: 40.0,
            pi_padding: 0.75,
            pi_stacking_cutoff: 7.5,
            pi_stacking_angle_tolerance: 30.0,
            t_shaped_cutoff: 5.0,
            t_shaped_angle_tolerance: 30.0,
            pi_cation_cutoff: 6.0,
            salt_bridge_cutoff: 5.5,
        }
    }
}

impl BinanaParams {
    /// Reads parameter overrides from a TOML file. Keys left out keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let params: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let distances = [
            ("close-contact-cutoff", self.close_contact_cutoff),
            ("contact-cutoff", self.contact_cutoff),
            ("electrostatic-cutoff", self.electrostatic_cutoff),
            (
                "active-site-flexibility-cutoff",
                self.active_site_flexibility_cutoff,
            ),
            ("hydrophobic-cutoff", self.hydrophobic_cutoff),
            ("hydrogen-bond-cutoff", self.hydrogen_bond_cutoff),
            ("pi-stacking-cutoff", self.pi_stacking_cutoff),
            ("t-shaped-cutoff", self.t_shaped_cutoff),
            ("pi-cation-cutoff", self.pi_cation_cutoff),
            ("salt-bridge-cutoff", self.salt_bridge_cutoff),
        ];
        for (parameter, value) in distances {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    parameter,
                    reason: format!("distance must be positive, got {value}"),
                });
            }
        }

        if !(self.pi_padding.is_finite() && self.pi_padding >= 0.0) {
            return Err(ConfigError::Invalid {
                parameter: "pi-padding",
                reason: format!("padding must not be negative, got {}", self.pi_padding),
            });
        }

        let angles = [
            (
                "hydrogen-bond-angle-tolerance",
                self.hydrogen_bond_angle_tolerance,
            ),
            (
                "pi-stacking-angle-tolerance",
                self.pi_stacking_angle_tolerance,
            ),
            ("t-shaped-angle-tolerance", self.t_shaped_angle_tolerance),
        ];
        for (parameter, value) in angles {
            if !(value > 0.0 && value <= 90.0) {
                return Err(ConfigError::Invalid {
                    parameter,
                    reason: format!("angle tolerance must lie in (0, 90], got {value}"),
                });
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct BinanaParamsBuilder {
    close_contact_cutoff: Option<f64>,
    contact_cutoff: Option<f64>,
    electrostatic_cutoff: Option<f64>,
    active_site_flexibility_cutoff: Option<f64>,
    hydrophobic_cutoff: Option<f64>,
    hydrogen_bond_cutoff: Option<f64>,
    hydrogen_bond_angle_tolerance: Option<f64>,
    pi_padding: Option<f64>,
    pi_stacking_cutoff: Option<f64>,
    pi_stacking_angle_tolerance: Option<f64>,
    t_shaped_cutoff: Option<f64>,
    t_shaped_angle_tolerance: Option<f64>,
    pi_cation_cutoff: Option<f64>,
    salt_bridge_cutoff: Option<f64>,
}

impl BinanaParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_contact_cutoff(mut self, cutoff: f64) -> Self {
        self.close_contact_cutoff = Some(cutoff);
        self
    }
    pub fn contact_cutoff(mut self, cutoff: f64) -> Self {
        self.contact_cutoff = Some(cutoff);
        self
    }
    pub fn electrostatic_cutoff(mut self, cutoff: f64) -> Self {
        self.electrostatic_cutoff = Some(cutoff);
        self
    }
    pub fn active_site_flexibility_cutoff(mut self, cutoff: f64) -> Self {
        self.active_site_flexibility_cutoff = Some(cutoff);
        self
    }
    pub fn hydrophobic_cutoff(mut self, cutoff: f64) -> Self {
        self.hydrophobic_cutoff = Some(cutoff);
        self
    }
    pub fn hydrogen_bond_cutoff(mut self, cutoff: f64) -> Self {
        self.hydrogen_bond_cutoff = Some(cutoff);
        self
    }
    pub fn hydrogen_bond_angle_tolerance(mut self, degrees: f64) -> Self {
        self.hydrogen_bond_angle_tolerance = Some(degrees);
        self
    }
    pub fn pi_padding(mut self, padding: f64) -> Self {
        self.pi_padding = Some(padding);
        self
    }
    pub fn pi_stacking_cutoff(mut self, cutoff: f64) -> Self {
        self.pi_stacking_cutoff = Some(cutoff);
        self
    }
    pub fn pi_stacking_angle_tolerance(mut self, degrees: f64) -> Self {
        self.pi_stacking_angle_tolerance = Some(degrees);
        self
    }
    pub fn t_shaped_cutoff(mut self, cutoff: f64) -> Self {
        self.t_shaped_cutoff = Some(cutoff);
        self
    }
    pub fn t_shaped_angle_tolerance(mut self, degrees: f64) -> Self {
        self.t_shaped_angle_tolerance = Some(degrees);
        self
    }
    pub fn pi_cation_cutoff(mut self, cutoff: f64) -> Self {
        self.pi_cation_cutoff = Some(cutoff);
        self
    }
    pub fn salt_bridge_cutoff(mut self, cutoff: f64) -> Self {
        self.salt_bridge_cutoff = Some(cutoff);
        self
    }

    pub fn build(self) -> Result<BinanaParams, ConfigError> {
        let defaults = BinanaParams::default();
        let params = BinanaParams {
            close_contact_cutoff: self
                .close_contact_cutoff
                .unwrap_or(defaults.close_contact_cutoff),
            contact_cutoff: self.contact_cutoff.unwrap_or(defaults.contact_cutoff),
            electrostatic_cutoff: self
                .electrostatic_cutoff
                .unwrap_or(defaults.electrostatic_cutoff),
            active_site_flexibility_cutoff: self
                .active_site_flexibility_cutoff
                .unwrap_or(defaults.active_site_flexibility_cutoff),
            hydrophobic_cutoff: self
                .hydrophobic_cutoff
                .unwrap_or(defaults.hydrophobic_cutoff),
            hydrogen_bond_cutoff: self
                .hydrogen_bond_cutoff
                .unwrap_or(defaults.hydrogen_bond_cutoff),
            hydrogen_bond_angle_tolerance: self
                .hydrogen_bond_angle_tolerance
                .unwrap_or(defaults.hydrogen_bond_angle_tolerance),
            pi_padding: self.pi_padding.unwrap_or(defaults.pi_padding),
            pi_stacking_cutoff: self
                .pi_stacking_cutoff
                .unwrap_or(defaults.pi_stacking_cutoff),
            pi_stacking_angle_tolerance: self
                .pi_stacking_angle_tolerance
                .unwrap_or(defaults.pi_stacking_angle_tolerance),
            t_shaped_cutoff: self.t_shaped_cutoff.unwrap_or(defaults.t_shaped_cutoff),
            t_shaped_angle_tolerance: self
                .t_shaped_angle_tolerance
                .unwrap_or(defaults.t_shaped_angle_tolerance),
            pi_cation_cutoff: self.pi_cation_cutoff.unwrap_or(defaults.pi_cation_cutoff),
            salt_bridge_cutoff: self
                .salt_bridge_cutoff
                .unwrap_or(defaults.salt_bridge_cutoff),
        };
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn defaults_are_valid() {
        let params = BinanaParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.close_contact_cutoff, 2.5);
        assert_eq!(params.pi_stacking_cutoff, 7.5);
        assert_eq!(params.salt_bridge_cutoff, 5.5);
    }

    #[test]
    fn builder_without_overrides_matches_defaults() {
        let params = BinanaParamsBuilder::new().build().unwrap();
        assert_eq!(params, BinanaParams::default());
    }

    #[test]
    fn builder_applies_overrides() {
        let params = BinanaParamsBuilder::new()
            .contact_cutoff(4.5)
            .pi_padding(1.0)
            .build()
            .unwrap();
        assert_eq!(params.contact_cutoff, 4.5);
        assert_eq!(params.pi_padding, 1.0);
        assert_eq!(params.hydrophobic_cutoff, 4.0);
    }

    #[test]
    fn builder_rejects_non_positive_distance() {
        let result = BinanaParamsBuilder::new().salt_bridge_cutoff(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                parameter: "salt-bridge-cutoff",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_out_of_range_angle() {
        let result = BinanaParamsBuilder::new()
            .t_shaped_angle_tolerance(120.0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                parameter: "t-shaped-angle-tolerance",
                ..
            })
        ));
        assert!(
            BinanaParamsBuilder::new()
                .hydrogen_bond_angle_tolerance(0.0)
                .build()
                .is_err()
        );
    }

    #[test]
    fn builder_rejects_negative_padding() {
        assert!(BinanaParamsBuilder::new().pi_padding(-0.1).build().is_err());
        assert!(BinanaParamsBuilder::new().pi_padding(0.0).build().is_ok());
    }

    #[test]
    fn load_reads_partial_overrides() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("params.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(
            file,
            r#"
            contact-cutoff = 4.5
            hydrogen-bond-angle-tolerance = 30.0
            "#
        )
        .unwrap();

        let params = BinanaParams::load(&file_path).unwrap();
        assert_eq!(params.contact_cutoff, 4.5);
        assert_eq!(params.hydrogen_bond_angle_tolerance, 30.0);
        assert_eq!(params.close_contact_cutoff, 2.5);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let result = BinanaParams::load(Path::new("non_existent_params.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_fails_for_unknown_key() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("params.toml");
        std::fs::write(&file_path, "contact-radius = 4.0\n").unwrap();
        let result = BinanaParams::load(&file_path);
        assert!(matches!(result, Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn load_fails_for_invalid_value() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("params.toml");
        std::fs::write(&file_path, "pi-cation-cutoff = -6.0\n").unwrap();
        let result = BinanaParams::load(&file_path);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
