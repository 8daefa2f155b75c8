use super::atom::Atom;
use super::charge::ChargedGroup;
use super::residue::ResidueKey;
use super::ring::AromaticRing;
use super::secondary::SecondaryStructure;
use crate::core::chemistry::{aromatics, bonds, charges, secondary_structure, typing};
use crate::core::io::pdb::{self, LoadWarning};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::debug;

static NO_NEIGHBORS: BTreeSet<usize> = BTreeSet::new();

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Atom with index {0} does not exist")]
    AtomNotFound(usize),
    #[error("Bond from atom {from} references missing atom {to}")]
    DanglingBond { from: usize, to: usize },
}

/// A receptor or ligand model: atoms, bonds and the annotations derived from them.
///
/// Atoms live in a dense arena and are addressed by their 1-based index, which
/// is assigned on insertion and never reused.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    atoms: Vec<Atom>,
    non_protein_atoms: BTreeSet<usize>,
    adjacency: Vec<BTreeSet<usize>>,
    serial_lookup: HashMap<usize, usize>,
    charged_groups: Vec<ChargedGroup>,
    aromatic_rings: Vec<AromaticRing>,
    secondary_structure: HashMap<ResidueKey, SecondaryStructure>,
    declared_torsions: Option<usize>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + use<> {
        1..=self.atoms.len()
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        index.checked_sub(1).and_then(|i| self.atoms.get(i))
    }

    pub(crate) fn atom_mut(&mut self, index: usize) -> Option<&mut Atom> {
        index.checked_sub(1).and_then(|i| self.atoms.get_mut(i))
    }

    pub fn try_atom(&self, index: usize) -> Result<&Atom, ModelError> {
        self.atom(index).ok_or(ModelError::AtomNotFound(index))
    }

    /// Adds a protein atom and returns its index.
    pub fn add_new_atom(&mut self, atom: Atom) -> usize {
        self.push_atom(atom, false)
    }

    /// Adds a ligand/heteroatom atom and returns its index.
    pub fn add_new_non_protein_atom(&mut self, atom: Atom) -> usize {
        self.push_atom(atom, true)
    }

    fn push_atom(&mut self, mut atom: Atom, non_protein: bool) -> usize {
        let index = self.atoms.len() + 1;
        atom.index = index;
        if atom.serial == 0 {
            atom.serial = index;
        }
        atom.connected_indices.clear();
        self.serial_lookup.entry(atom.serial).or_insert(index);
        if non_protein {
            self.non_protein_atoms.insert(index);
        }
        self.atoms.push(atom);
        self.adjacency.push(BTreeSet::new());
        index
    }

    /// Resolves a file serial number to an atom index (first atom wins).
    pub fn index_of_serial(&self, serial: usize) -> Option<usize> {
        self.serial_lookup.get(&serial).copied()
    }

    pub fn is_non_protein(&self, index: usize) -> bool {
        self.non_protein_atoms.contains(&index)
    }

    pub fn non_protein_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.non_protein_atoms.iter().copied()
    }

    pub fn protein_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices().filter(|i| !self.non_protein_atoms.contains(i))
    }

    /// Records `to` on `from`'s connection list and links both atoms in the
    /// symmetric adjacency. Self-bonds are ignored.
    pub fn add_bond(&mut self, from: usize, to: usize) -> Result<(), ModelError> {
        if self.atom(from).is_none() {
            return Err(ModelError::AtomNotFound(from));
        }
        if self.atom(to).is_none() {
            return Err(ModelError::DanglingBond { from, to });
        }
        if from == to {
            return Ok(());
        }
        self.atoms[from - 1].connected_indices.insert(to);
        self.adjacency[from - 1].insert(to);
        self.adjacency[to - 1].insert(from);
        Ok(())
    }

    /// Records the bond on both atoms.
    pub fn add_mutual_bond(&mut self, a: usize, b: usize) -> Result<(), ModelError> {
        self.add_bond(a, b)?;
        self.add_bond(b, a)
    }

    /// Neighbours of `index` in the symmetric bond graph.
    pub fn neighbors(&self, index: usize) -> &BTreeSet<usize> {
        index
            .checked_sub(1)
            .and_then(|i| self.adjacency.get(i))
            .unwrap_or(&NO_NEIGHBORS)
    }

    pub fn degree(&self, index: usize) -> usize {
        self.neighbors(index).len()
    }

    pub fn is_bonded(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).contains(&b)
    }

    pub fn connected_atoms_of_given_element(&self, index: usize, element: &str) -> Vec<usize> {
        self.neighbors(index)
            .iter()
            .copied()
            .filter(|&n| {
                self.atom(n)
                    .is_some_and(|atom| atom.element.eq_ignore_ascii_case(element.trim()))
            })
            .collect()
    }

    pub fn connected_heavy_atoms(&self, index: usize) -> Vec<usize> {
        self.neighbors(index)
            .iter()
            .copied()
            .filter(|&n| self.atom(n).is_some_and(Atom::is_heavy))
            .collect()
    }

    /// Every bond of the symmetric graph once, as `(lower, higher)` index pairs.
    pub fn bonds(&self) -> Vec<(usize, usize)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, neighbors)| {
                let a = i + 1;
                neighbors.iter().filter(move |&&b| b > a).map(move |&b| (a, b))
            })
            .collect()
    }

    /// Groups atom indices by residue key in order of first appearance.
    pub fn residues(&self) -> Vec<(ResidueKey, Vec<usize>)> {
        let mut order: Vec<(ResidueKey, Vec<usize>)> = Vec::new();
        let mut lookup: HashMap<ResidueKey, usize> = HashMap::new();
        for atom in &self.atoms {
            let key = atom.residue_key();
            match lookup.get(&key) {
                Some(&slot) => order[slot].1.push(atom.index),
                None => {
                    lookup.insert(key.clone(), order.len());
                    order.push((key, vec![atom.index]));
                }
            }
        }
        order
    }

    /// Finds the member of `members` carrying the given atom name.
    pub fn find_named(&self, members: &[usize], name: &str) -> Option<usize> {
        members
            .iter()
            .copied()
            .find(|&i| self.atom(i).is_some_and(|atom| atom.name == name))
    }

    pub fn charged_groups(&self) -> &[ChargedGroup] {
        &self.charged_groups
    }

    pub(crate) fn set_charged_groups(&mut self, groups: Vec<ChargedGroup>) {
        self.charged_groups = groups;
    }

    pub fn aromatic_rings(&self) -> &[AromaticRing] {
        &self.aromatic_rings
    }

    pub(crate) fn set_aromatic_rings(&mut self, rings: Vec<AromaticRing>) {
        self.aromatic_rings = rings;
    }

    pub fn is_aromatic(&self, index: usize) -> bool {
        self.aromatic_rings
            .iter()
            .any(|ring| ring.indices.contains(&index))
    }

    pub fn secondary_structure(&self) -> &HashMap<ResidueKey, SecondaryStructure> {
        &self.secondary_structure
    }

    /// The label of a residue; residues without one report `Other`.
    pub fn secondary_structure_of(&self, key: &ResidueKey) -> SecondaryStructure {
        self.secondary_structure
            .get(key)
            .copied()
            .unwrap_or_default()
    }

    pub fn secondary_structure_of_atom(&self, index: usize) -> SecondaryStructure {
        self.atom(index)
            .map(|atom| self.secondary_structure_of(&atom.residue_key()))
            .unwrap_or_default()
    }

    pub(crate) fn set_secondary_structure(
        &mut self,
        labels: HashMap<ResidueKey, SecondaryStructure>,
    ) {
        self.secondary_structure = labels;
    }

    /// Torsion count declared by a PDBQT `TORSDOF` record.
    pub fn declared_torsions(&self) -> Option<usize> {
        self.declared_torsions
    }

    pub fn set_declared_torsions(&mut self, torsions: Option<usize>) {
        self.declared_torsions = torsions;
    }

    /// Applies CONECT records to this structure.
    ///
    /// Non-CONECT lines are ignored. Returns a warning for every serial that
    /// does not resolve to an atom.
    pub fn load_bonds_from_pdb_lines<'a, I>(&mut self, lines: I) -> Vec<LoadWarning>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut warnings = Vec::new();
        for (line_num, line) in lines.into_iter().enumerate() {
            if line.starts_with("CONECT") {
                pdb::apply_conect_record(self, line, line_num + 1, &mut warnings);
            }
        }
        warnings
    }

    /// Bonds non-protein atoms by covalent radii, then re-assigns charges.
    /// Returns the number of new bonds.
    pub fn create_non_protein_atom_bonds_by_distance(&mut self) -> usize {
        let created = bonds::bond_non_protein_atoms_by_distance(self);
        charges::assign_charges(self);
        created
    }

    /// Bonds protein atoms within residues and across peptide links.
    /// Returns the number of new bonds.
    pub fn create_protein_atom_bonds_by_distance(&mut self) -> usize {
        bonds::bond_protein_atoms_by_distance(self)
    }

    /// Runs every annotation pass: charges, aromatic rings, atom types and
    /// secondary structure.
    pub fn annotate(&mut self) {
        charges::assign_charges(self);
        aromatics::assign_aromatic_rings(self);
        typing::assign_atom_types(self);
        secondary_structure::assign_secondary_structure(self);
        debug!(
            atoms = self.len(),
            charged_groups = self.charged_groups.len(),
            aromatic_rings = self.aromatic_rings.len(),
            "Structure annotated."
        );
    }
}
