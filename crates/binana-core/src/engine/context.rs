use super::config::BinanaParams;
use super::features::Stratum;
use crate::core::models::atom::Atom;
use crate::core::models::secondary::SecondaryStructure;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry;
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use nalgebra::Point3;
use std::collections::HashMap;

/// A ligand atom and a receptor atom closer than some cutoff.
#[derive(Debug, Clone, Copy)]
pub struct AtomPair<'a> {
    pub ligand: &'a Atom,
    pub receptor: &'a Atom,
    pub distance: f64,
}

/// Borrowed inputs shared by every interaction task, plus a spatial index
/// over the receptor atoms.
pub struct InteractionContext<'a> {
    pub ligand: &'a Structure,
    pub receptor: &'a Structure,
    pub params: &'a BinanaParams,
    /// `None` for an empty receptor.
    receptor_tree: Option<ImmutableKdTree<f64, 3>>,
    /// Tree item to the receptor atoms sharing that exact position.
    receptor_sites: Vec<Vec<usize>>,
}

impl<'a> InteractionContext<'a> {
    pub fn new(ligand: &'a Structure, receptor: &'a Structure, params: &'a BinanaParams) -> Self {
        let (positions, receptor_sites) = unique_sites(receptor);
        let receptor_tree = (!positions.is_empty())
            .then(|| ImmutableKdTree::<f64, 3>::new_from_slice(&positions));
        Self {
            ligand,
            receptor,
            params,
            receptor_tree,
            receptor_sites,
        }
    }

    /// Receptor atoms strictly closer than `cutoff` to `point`, ordered by
    /// atom index.
    pub fn receptor_atoms_near(&self, point: &Point3<f64>, cutoff: f64) -> Vec<(&'a Atom, f64)> {
        let Some(tree) = &self.receptor_tree else {
            return Vec::new();
        };
        let receptor = self.receptor;
        let mut hits: Vec<(&'a Atom, f64)> = tree
            .within_unsorted::<SquaredEuclidean>(&[point.x, point.y, point.z], cutoff * cutoff)
            .into_iter()
            .filter_map(|neighbour| self.receptor_sites.get(neighbour.item as usize))
            .flatten()
            .filter_map(|&index| receptor.atom(index))
            .map(|atom| (atom, geometry::distance(point, &atom.coordinates)))
            .filter(|&(_, distance)| distance < cutoff)
            .collect();
        hits.sort_unstable_by_key(|(atom, _)| atom.index);
        hits
    }

    /// Every ligand–receptor atom pair strictly closer than `cutoff`, ordered
    /// by ligand index then receptor index.
    pub fn atom_pairs_within(&self, cutoff: f64) -> Vec<AtomPair<'a>> {
        let ligand = self.ligand;
        ligand
            .atoms()
            .iter()
            .flat_map(|ligand_atom| {
                self.receptor_atoms_near(&ligand_atom.coordinates, cutoff)
                    .into_iter()
                    .map(move |(receptor_atom, distance)| AtomPair {
                        ligand: ligand_atom,
                        receptor: receptor_atom,
                        distance,
                    })
            })
            .collect()
    }

    pub fn receptor_secondary_structure(&self, index: usize) -> SecondaryStructure {
        self.receptor.secondary_structure_of_atom(index)
    }

    /// Backbone/side-chain role and secondary structure of a receptor atom.
    pub fn receptor_stratum(&self, atom: &Atom) -> Stratum {
        Stratum::new(
            atom.backbone_or_sidechain(),
            self.receptor_secondary_structure(atom.index),
        )
    }
}

/// Distinct receptor positions and, for each, the atoms placed there.
///
/// Loaders accept placeholder coordinates and duplicated rows, so many atoms
/// can coincide; the tree only ever sees one point per position.
fn unique_sites(receptor: &Structure) -> (Vec<[f64; 3]>, Vec<Vec<usize>>) {
    let mut positions: Vec<[f64; 3]> = Vec::new();
    let mut sites: Vec<Vec<usize>> = Vec::new();
    let mut seen: HashMap<[u64; 3], usize> = HashMap::new();

    for atom in receptor.atoms() {
        // Adding zero folds -0.0 into 0.0.
        let position = [
            atom.coordinates.x + 0.0,
            atom.coordinates.y + 0.0,
            atom.coordinates.z + 0.0,
        ];
        let key = position.map(f64::to_bits);
        let slot = *seen.entry(key).or_insert_with(|| {
            positions.push(position);
            sites.push(Vec::new());
            sites.len() - 1
        });
        sites[slot].push(atom.index);
    }
    (positions, sites)
}
