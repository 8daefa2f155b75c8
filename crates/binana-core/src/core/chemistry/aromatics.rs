use crate::core::models::ring::AromaticRing;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Ring atoms of aromatic side chains, in cycle order.
const PROTEIN_RING_TEMPLATES: &[(&str, &[&str])] = &[
    ("PHE", &["CG", "CD1", "CE1", "CZ", "CE2", "CD2"]),
    ("TYR", &["CG", "CD1", "CE1", "CZ", "CE2", "CD2"]),
    ("HIS", &["CG", "ND1", "CE1", "NE2", "CD2"]),
    ("TRP", &["CD2", "CE2", "CZ2", "CH2", "CZ3", "CE3"]),
    ("TRP", &["CG", "CD1", "NE1", "CE2", "CD2"]),
];

/// Ring dihedrals must lie within this many degrees of 0 or 180.
const PLANARITY_TOLERANCE: f64 = 15.0;
const MAX_RING_ATOM_NEIGHBORS: usize = 3;

/// Replaces the aromatic rings of `structure` with a fresh perception.
pub fn assign_aromatic_rings(structure: &mut Structure) {
    let rings = find_aromatic_rings(structure);
    debug!(rings = rings.len(), "Perceived aromatic rings.");
    structure.set_aromatic_rings(rings);
}

pub fn find_aromatic_rings(structure: &Structure) -> Vec<AromaticRing> {
    let mut seen: HashSet<BTreeSet<usize>> = HashSet::new();
    protein_rings(structure)
        .into_iter()
        .chain(ligand_rings(structure))
        .filter(|ring| seen.insert(ring.index_set()))
        .collect()
}

fn ring_from_indices(structure: &Structure, indices: Vec<usize>) -> Option<AromaticRing> {
    let points: Option<Vec<_>> = indices
        .iter()
        .map(|&i| structure.atom(i).map(|a| a.coordinates))
        .collect();
    AromaticRing::from_points(indices, &points?)
}

fn protein_rings(structure: &Structure) -> Vec<AromaticRing> {
    let mut rings = Vec::new();
    for (key, members) in structure.residues() {
        let members: Vec<usize> = members
            .into_iter()
            .filter(|&i| !structure.is_non_protein(i))
            .collect();
        for (residue_name, names) in PROTEIN_RING_TEMPLATES {
            if key.name != *residue_name {
                continue;
            }
            let indices: Option<Vec<usize>> = names
                .iter()
                .map(|name| structure.find_named(&members, name))
                .collect();
            if let Some(ring) = indices.and_then(|indices| ring_from_indices(structure, indices)) {
                rings.push(ring);
            }
        }
    }
    rings
}

fn ligand_rings(structure: &Structure) -> Vec<AromaticRing> {
    let candidates: BTreeSet<usize> = structure
        .non_protein_indices()
        .filter(|&i| {
            structure.atom(i).is_some_and(|a| a.is_heavy())
                && structure.degree(i) <= MAX_RING_ATOM_NEIGHBORS
        })
        .collect();

    let mut cycles = Vec::new();
    for &start in &candidates {
        let mut path = vec![start];
        collect_cycles(structure, &candidates, start, &mut path, &mut cycles);
    }

    let mut seen: HashSet<BTreeSet<usize>> = HashSet::new();
    cycles
        .into_iter()
        .filter(|cycle| seen.insert(cycle.iter().copied().collect()))
        .filter(|cycle| is_planar(structure, cycle))
        .filter_map(|cycle| ring_from_indices(structure, cycle))
        .collect()
}

/// Depth-first enumeration of simple 5- and 6-cycles through `start`, visiting
/// only atoms with a larger index so each cycle is rooted at its minimum.
fn collect_cycles(
    structure: &Structure,
    candidates: &BTreeSet<usize>,
    start: usize,
    path: &mut Vec<usize>,
    cycles: &mut Vec<Vec<usize>>,
) {
    let Some(&last) = path.last() else {
        return;
    };
    for &next in structure.neighbors(last) {
        if !candidates.contains(&next) {
            continue;
        }
        if next == start {
            if path.len() >= 5 {
                cycles.push(path.clone());
            }
            continue;
        }
        if next < start || path.len() >= 6 || path.contains(&next) {
            continue;
        }
        path.push(next);
        collect_cycles(structure, candidates, start, path, cycles);
        path.pop();
    }
}

fn is_planar(structure: &Structure, cycle: &[usize]) -> bool {
    let points: Option<Vec<_>> = cycle
        .iter()
        .map(|&i| structure.atom(i).map(|a| a.coordinates))
        .collect();
    let Some(points) = points else {
        return false;
    };
    let n = points.len();
    (0..n).all(|i| {
        let torsion = geometry::dihedral(
            &points[i],
            &points[(i + 1) % n],
            &points[(i + 2) % n],
            &points[(i + 3) % n],
        )
        .abs();
        torsion <= PLANARITY_TOLERANCE || torsion >= 180.0 - PLANARITY_TOLERANCE
    })
}
