use std::fmt;

/// Coarse backbone secondary structure of a residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum SecondaryStructure {
    Alpha,
    Beta,
    #[default]
    Other,
}

impl SecondaryStructure {
    pub const ALL: [SecondaryStructure; 3] = [
        SecondaryStructure::Alpha,
        SecondaryStructure::Beta,
        SecondaryStructure::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SecondaryStructure::Alpha => "ALPHA",
            SecondaryStructure::Beta => "BETA",
            SecondaryStructure::Other => "OTHER",
        }
    }
}

impl fmt::Display for SecondaryStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
