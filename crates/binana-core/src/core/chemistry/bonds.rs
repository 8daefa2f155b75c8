use super::elements::covalent_radius;
use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use itertools::Itertools;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Slack added to the sum of covalent radii when inferring a bond.
pub const BOND_TOLERANCE: f64 = 0.45;
/// Pairs closer than this are treated as overlapping atoms, not bonds.
pub const MIN_BOND_DISTANCE: f64 = 0.4;
/// A bond longer than this fraction of the single-bond length counts as single.
pub const SINGLE_BOND_FRACTION: f64 = 0.93;

pub fn within_bonding_distance(a: &Atom, b: &Atom) -> bool {
    if a.is_hydrogen() && b.is_hydrogen() {
        return false;
    }
    let (Some(ra), Some(rb)) = (covalent_radius(&a.element), covalent_radius(&b.element)) else {
        return false;
    };
    let d = a.distance_to(b);
    d > MIN_BOND_DISTANCE && d <= ra + rb + BOND_TOLERANCE
}

/// Bonds every pair of non-protein atoms within bonding distance, recording
/// the bond on both atoms. Returns the number of newly bonded pairs.
pub fn bond_non_protein_atoms_by_distance(structure: &mut Structure) -> usize {
    let indices: Vec<usize> = structure.non_protein_indices().collect();
    let pairs = bondable_pairs(structure, &indices);
    let created = connect_pairs(structure, pairs);
    debug!(created, "Inferred non-protein bonds from distances.");
    created
}

/// Bonds protein atoms within each residue and across `C(i)-N(i+1)` peptide
/// links of consecutive residues in the same chain.
pub fn bond_protein_atoms_by_distance(structure: &mut Structure) -> usize {
    let residues: Vec<Vec<usize>> = structure
        .residues()
        .into_iter()
        .map(|(_, members)| {
            members
                .into_iter()
                .filter(|&i| !structure.is_non_protein(i))
                .collect::<Vec<_>>()
        })
        .filter(|members| !members.is_empty())
        .collect();

    let mut pairs = Vec::new();
    for members in &residues {
        pairs.extend(bondable_pairs(structure, members));
    }
    for (previous, current) in residues.iter().tuple_windows() {
        let link = structure
            .find_named(previous, "C")
            .zip(structure.find_named(current, "N"));
        if let Some((c, n)) = link {
            if let (Some(c_atom), Some(n_atom)) = (structure.atom(c), structure.atom(n)) {
                if c_atom.chain == n_atom.chain && within_bonding_distance(c_atom, n_atom) {
                    pairs.push((c, n));
                }
            }
        }
    }

    let created = connect_pairs(structure, pairs);
    debug!(created, "Inferred protein bonds from distances.");
    created
}

fn bondable_pairs(structure: &Structure, indices: &[usize]) -> Vec<(usize, usize)> {
    indices
        .iter()
        .copied()
        .tuple_combinations()
        .filter(|&(a, b)| match (structure.atom(a), structure.atom(b)) {
            (Some(atom_a), Some(atom_b)) => within_bonding_distance(atom_a, atom_b),
            _ => false,
        })
        .collect()
}

fn connect_pairs(structure: &mut Structure, pairs: Vec<(usize, usize)>) -> usize {
    let mut created = 0;
    for (a, b) in pairs {
        let is_new = !structure.is_bonded(a, b);
        if structure.add_mutual_bond(a, b).is_ok() && is_new {
            created += 1;
        }
    }
    created
}

/// Whether the bond `a-b` lies on a cycle, i.e. `b` stays reachable from `a`
/// once the direct bond is removed.
pub fn is_ring_bond(structure: &Structure, a: usize, b: usize) -> bool {
    if !structure.is_bonded(a, b) {
        return false;
    }
    let mut visited = HashSet::from([a]);
    let mut queue = VecDeque::from([a]);
    while let Some(current) = queue.pop_front() {
        for &next in structure.neighbors(current) {
            if current == a && next == b {
                continue;
            }
            if next == b {
                return true;
            }
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    false
}

pub fn is_in_ring(structure: &Structure, index: usize) -> bool {
    structure
        .neighbors(index)
        .iter()
        .any(|&n| is_ring_bond(structure, index, n))
}

/// Estimates rotatable bonds from the bond graph.
///
/// A bond counts when both ends are heavy atoms with at least two heavy
/// neighbours, it is not part of a ring, and it is longer than
/// [`SINGLE_BOND_FRACTION`] of the summed covalent radii.
pub fn estimate_rotatable_bonds(structure: &Structure) -> usize {
    structure
        .bonds()
        .into_iter()
        .filter(|&(a, b)| {
            let (Some(atom_a), Some(atom_b)) = (structure.atom(a), structure.atom(b)) else {
                return false;
            };
            if atom_a.is_hydrogen() || atom_b.is_hydrogen() {
                return false;
            }
            if structure.connected_heavy_atoms(a).len() < 2
                || structure.connected_heavy_atoms(b).len() < 2
            {
                return false;
            }
            let single_length = match (
                covalent_radius(&atom_a.element),
                covalent_radius(&atom_b.element),
            ) {
                (Some(ra), Some(rb)) => ra + rb,
                _ => return false,
            };
            atom_a.distance_to(atom_b) > SINGLE_BOND_FRACTION * single_length
                && !is_ring_bond(structure, a, b)
        })
        .count()
}
