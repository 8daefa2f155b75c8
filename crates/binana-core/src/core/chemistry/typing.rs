use crate::core::models::structure::Structure;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Coarse AutoDock-style atom types recognized by the featurizer.
///
/// Variants are declared in alphabetical order of their labels; the order
/// defines the layout of every per-type feature bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AtomType {
    A,
    Br,
    C,
    Cl,
    F,
    Fe,
    Hd,
    I,
    Mg,
    Mn,
    N,
    Na,
    Oa,
    P,
    S,
    Sa,
    Zn,
}

impl AtomType {
    pub const ALL: [AtomType; 17] = [
        AtomType::A,
        AtomType::Br,
        AtomType::C,
        AtomType::Cl,
        AtomType::F,
        AtomType::Fe,
        AtomType::Hd,
        AtomType::I,
        AtomType::Mg,
        AtomType::Mn,
        AtomType::N,
        AtomType::Na,
        AtomType::Oa,
        AtomType::P,
        AtomType::S,
        AtomType::Sa,
        AtomType::Zn,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn as_str(&self) -> &'static str {
        match self {
            AtomType::A => "A",
            AtomType::Br => "BR",
            AtomType::C => "C",
            AtomType::Cl => "CL",
            AtomType::F => "F",
            AtomType::Fe => "FE",
            AtomType::Hd => "HD",
            AtomType::I => "I",
            AtomType::Mg => "MG",
            AtomType::Mn => "MN",
            AtomType::N => "N",
            AtomType::Na => "NA",
            AtomType::Oa => "OA",
            AtomType::P => "P",
            AtomType::S => "S",
            AtomType::Sa => "SA",
            AtomType::Zn => "ZN",
        }
    }
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AtomType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AtomType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Types every atom of `structure`.
///
/// Types that already parse as an [`AtomType`] (e.g. from a PDBQT type column)
/// are kept; all others are derived from element and bonding. Aromatic rings
/// must be perceived first.
pub fn assign_atom_types(structure: &mut Structure) {
    let derived: Vec<(usize, String)> = structure
        .atoms()
        .iter()
        .filter(|atom| atom.recognized_type().is_none())
        .map(|atom| (atom.index, derive_atom_type(structure, atom.index)))
        .collect();

    debug!(derived = derived.len(), "Assigned atom types.");
    for (index, atom_type) in derived {
        if let Some(atom) = structure.atom_mut(index) {
            atom.set_atom_type(&atom_type);
        }
    }
}

/// Derives the coarse type of one atom. Unrecognized chemistry falls back to
/// the element symbol, which no bucket accepts.
pub fn derive_atom_type(structure: &Structure, index: usize) -> String {
    let Some(atom) = structure.atom(index) else {
        return String::new();
    };
    let has_neighbor = |elements: &[&str]| {
        structure.neighbors(index).iter().any(|&n| {
            structure
                .atom(n)
                .is_some_and(|other| elements.contains(&other.element.as_str()))
        })
    };

    let derived = match atom.element.as_str() {
        "C" if structure.is_aromatic(index) => AtomType::A,
        "C" => AtomType::C,
        "N" if !has_neighbor(&["H"]) && structure.degree(index) < 3 => AtomType::Na,
        "N" => AtomType::N,
        "O" => AtomType::Oa,
        "S" if structure.degree(index) <= 2 => AtomType::Sa,
        "S" => AtomType::S,
        "H" if has_neighbor(&["N", "O"]) => AtomType::Hd,
        "F" => AtomType::F,
        "CL" => AtomType::Cl,
        "BR" => AtomType::Br,
        "I" => AtomType::I,
        "P" => AtomType::P,
        "FE" => AtomType::Fe,
        "MG" => AtomType::Mg,
        "MN" => AtomType::Mn,
        "ZN" => AtomType::Zn,
        other => return other.to_string(),
    };
    derived.as_str().to_string()
}
