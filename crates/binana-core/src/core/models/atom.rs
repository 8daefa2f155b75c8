use super::residue::ResidueKey;
use crate::core::chemistry::elements;
use crate::core::chemistry::typing::AtomType;
use nalgebra::Point3;
use phf::phf_set;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

static BACKBONE_ATOM_NAMES: phf::Set<&'static str> = phf_set! {
    "N", "CA", "C", "O", "OXT", "OT1", "OT2",
    "H", "HN", "H1", "H2", "H3", "HT1", "HT2", "HT3", "HA", "HA2", "HA3",
};

/// Whether an atom belongs to the protein main chain or to a side chain.
///
/// Non-protein atoms are classified by name like any other atom, so a ligand
/// atom named `CA` reports `Backbone`; the engine only asks for the role of
/// receptor atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AtomRole {
    Backbone,
    Sidechain,
}

impl AtomRole {
    pub const ALL: [AtomRole; 2] = [AtomRole::Backbone, AtomRole::Sidechain];

    pub fn as_str(&self) -> &'static str {
        match self {
            AtomRole::Backbone => "BACKBONE",
            AtomRole::Sidechain => "SIDECHAIN",
        }
    }
}

impl fmt::Display for AtomRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The PDB record an atom was read from (or will be written as).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordKind {
    #[default]
    Atom,
    HetAtm,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Atom => "ATOM",
            RecordKind::HetAtm => "HETATM",
        }
    }
}

impl FromStr for RecordKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ATOM" => Ok(RecordKind::Atom),
            "HETATM" => Ok(RecordKind::HetAtm),
            _ => Err(()),
        }
    }
}

/// A single atom owned by a [`Structure`](super::structure::Structure).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// 1-based position in the owning structure; `0` until the atom is added.
    pub index: usize,
    /// Serial number as read from the file, used to resolve CONECT records.
    pub serial: usize,
    /// The atom name (e.g., "CA", "NZ", "C1").
    pub name: String,
    /// Upper-case element symbol.
    pub element: String,
    /// Three-letter residue code.
    pub residue: String,
    pub chain: char,
    pub residue_number: isize,
    /// Cartesian coordinates in Angstroms.
    pub coordinates: Point3<f64>,
    /// Partial charge from a PDBQT charge column, if any.
    pub charge: Option<f64>,
    /// Coarse AutoDock-style type; possibly empty before typing.
    atom_type: String,
    /// `atom_type` parsed once, kept in step by [`Atom::set_atom_type`].
    recognized_type: Option<AtomType>,
    pub record: RecordKind,
    pub(crate) connected_indices: BTreeSet<usize>,
}

impl Atom {
    /// Creates an unattached atom, deriving its element from the atom name.
    pub fn new(
        name: &str,
        residue: &str,
        residue_number: isize,
        chain: char,
        coordinates: Point3<f64>,
    ) -> Self {
        let name = name.trim();
        let residue = residue.trim();
        Self {
            index: 0,
            serial: 0,
            name: name.to_string(),
            element: elements::infer_element(name, residue),
            residue: residue.to_string(),
            chain,
            residue_number,
            coordinates,
            charge: None,
            atom_type: String::new(),
            recognized_type: None,
            record: RecordKind::Atom,
            connected_indices: BTreeSet::new(),
        }
    }

    pub fn with_element(mut self, element: &str) -> Self {
        self.element = element.trim().to_ascii_uppercase();
        self
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = Some(charge);
        self
    }

    pub fn with_atom_type(mut self, atom_type: &str) -> Self {
        self.set_atom_type(atom_type);
        self
    }

    pub fn atom_type(&self) -> &str {
        &self.atom_type
    }

    pub fn set_atom_type(&mut self, atom_type: &str) {
        self.atom_type = atom_type.trim().to_string();
        self.recognized_type = self.atom_type.parse().ok();
    }

    pub fn with_record(mut self, record: RecordKind) -> Self {
        self.record = record;
        self
    }

    pub fn with_serial(mut self, serial: usize) -> Self {
        self.serial = serial;
        self
    }

    /// Bonded indices as recorded on this atom. CONECT records are
    /// one-directional, so this set need not mirror the partner's.
    pub fn connected_indices(&self) -> &BTreeSet<usize> {
        &self.connected_indices
    }

    pub fn neighbor_count(&self) -> usize {
        self.connected_indices.len()
    }

    pub fn backbone_or_sidechain(&self) -> AtomRole {
        if BACKBONE_ATOM_NAMES.contains(self.name.as_str()) {
            AtomRole::Backbone
        } else {
            AtomRole::Sidechain
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element == "H"
    }

    pub fn is_heavy(&self) -> bool {
        !self.is_hydrogen()
    }

    pub fn residue_key(&self) -> ResidueKey {
        ResidueKey::new(&self.residue, self.residue_number, self.chain)
    }

    /// The atom type if it is one of the recognized featurization types.
    pub fn recognized_type(&self) -> Option<AtomType> {
        self.recognized_type
    }

    #[inline]
    pub fn distance_to(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.coordinates, &other.coordinates)
    }
}
