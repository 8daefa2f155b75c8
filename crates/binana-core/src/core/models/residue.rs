use phf::phf_set;
use std::fmt;

static STANDARD_AMINO_ACIDS: phf::Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    "HID", "HIE", "HIP", "HSD", "HSE", "HSP", "CYX", "ASH", "GLH", "LYN",
};

/// Returns `true` for the standard amino acids and their common protonation
/// variants. Atoms of any other residue are treated as non-protein on load.
pub fn is_standard_amino_acid(residue: &str) -> bool {
    STANDARD_AMINO_ACIDS.contains(residue.trim().to_ascii_uppercase().as_str())
}

/// Identifies a residue by name, number and chain.
///
/// Displayed as `NAME_NUMBER_CHAIN`, e.g. `LYS_48_A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub name: String,
    pub number: isize,
    pub chain: char,
}

impl ResidueKey {
    pub fn new(name: &str, number: isize, chain: char) -> Self {
        Self {
            name: name.trim().to_string(),
            number,
            chain,
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.name, self.number, self.chain)
    }
}
