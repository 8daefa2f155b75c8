use super::bonds::is_in_ring;
use super::elements::is_metal_ion;
use crate::core::models::charge::ChargedGroup;
use crate::core::models::residue::ResidueKey;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry;
use itertools::Itertools;
use tracing::debug;

type ChargeRule = fn(&Structure) -> Vec<ChargedGroup>;

/// Charge rules, applied in order. Each rule is independent of the others.
const CHARGE_RULES: &[ChargeRule] = &[
    lysine_groups,
    arginine_groups,
    histidine_groups,
    glutamate_groups,
    aspartate_groups,
    metal_ion_groups,
    nitrogen_groups,
    carbon_groups,
    phosphorus_groups,
    sulfur_groups,
];

const MAX_AMMONIUM_MEAN_ANGLE: f64 = 115.0;
const TRIGONAL_PLANAR_ANGLE_SUM: f64 = 350.0;

pub fn find_charged_groups(structure: &Structure) -> Vec<ChargedGroup> {
    CHARGE_RULES
        .iter()
        .flat_map(|rule| rule(structure))
        .collect()
}

/// Replaces the charged groups of `structure` with a fresh assignment.
pub fn assign_charges(structure: &mut Structure) {
    let groups = find_charged_groups(structure);
    debug!(
        positive = groups.iter().filter(|g| g.positive).count(),
        negative = groups.iter().filter(|g| g.is_negative()).count(),
        "Assigned charged groups."
    );
    structure.set_charged_groups(groups);
}

fn group_at_centroid(
    structure: &Structure,
    positive: bool,
    indices: Vec<usize>,
) -> Option<ChargedGroup> {
    let points: Vec<_> = indices
        .iter()
        .filter_map(|&i| structure.atom(i).map(|a| a.coordinates))
        .collect();
    let center = geometry::centroid(&points)?;
    Some(ChargedGroup::new(positive, center, indices))
}

fn protein_residues<'a>(
    structure: &'a Structure,
    residue_name: &'a str,
) -> impl Iterator<Item = (ResidueKey, Vec<usize>)> + 'a {
    structure
        .residues()
        .into_iter()
        .filter(move |(key, _)| key.name == residue_name)
        .map(move |(key, members)| {
            let protein: Vec<usize> = members
                .into_iter()
                .filter(|&i| !structure.is_non_protein(i))
                .collect();
            (key, protein)
        })
        .filter(|(_, members)| !members.is_empty())
}

fn named_atoms(structure: &Structure, members: &[usize], names: &[&str]) -> Option<Vec<usize>> {
    names
        .iter()
        .map(|name| structure.find_named(members, name))
        .collect()
}

fn template_groups(
    structure: &Structure,
    residue_name: &str,
    names: &[&str],
    positive: bool,
) -> Vec<ChargedGroup> {
    protein_residues(structure, residue_name)
        .filter_map(|(_, members)| {
            let indices = named_atoms(structure, &members, names)?;
            group_at_centroid(structure, positive, indices)
        })
        .collect()
}

fn lysine_groups(structure: &Structure) -> Vec<ChargedGroup> {
    template_groups(structure, "LYS", &["NZ"], true)
}

fn arginine_groups(structure: &Structure) -> Vec<ChargedGroup> {
    template_groups(structure, "ARG", &["NE", "CZ", "NH1", "NH2"], true)
}

fn histidine_groups(structure: &Structure) -> Vec<ChargedGroup> {
    protein_residues(structure, "HIS")
        .filter_map(|(_, members)| {
            let has_hydrogens = members
                .iter()
                .any(|&i| structure.atom(i).is_some_and(|a| a.is_hydrogen()));
            if has_hydrogens {
                named_atoms(structure, &members, &["HD1", "HE2"])?;
            }
            let indices = named_atoms(structure, &members, &["ND1", "NE2"])?;
            group_at_centroid(structure, true, indices)
        })
        .collect()
}

fn glutamate_groups(structure: &Structure) -> Vec<ChargedGroup> {
    template_groups(structure, "GLU", &["OE1", "OE2"], false)
}

fn aspartate_groups(structure: &Structure) -> Vec<ChargedGroup> {
    template_groups(structure, "ASP", &["OD1", "OD2"], false)
}

fn non_protein_atoms_of<'a>(
    structure: &'a Structure,
    element: &'a str,
) -> impl Iterator<Item = usize> + 'a {
    structure
        .non_protein_indices()
        .filter(move |&i| structure.atom(i).is_some_and(|a| a.element == element))
}

fn element_of(structure: &Structure, index: usize) -> &str {
    structure.atom(index).map_or("", |a| a.element.as_str())
}

fn metal_ion_groups(structure: &Structure) -> Vec<ChargedGroup> {
    structure
        .non_protein_indices()
        .filter_map(|i| {
            let atom = structure.atom(i)?;
            is_metal_ion(&atom.element).then(|| ChargedGroup::new(true, atom.coordinates, vec![i]))
        })
        .collect()
}

fn angle_at(structure: &Structure, vertex: usize, a: usize, b: usize) -> Option<f64> {
    let (v, a, b) = (structure.atom(vertex)?, structure.atom(a)?, structure.atom(b)?);
    Some(geometry::bond_angle(&a.coordinates, &v.coordinates, &b.coordinates))
}

fn neighbor_angles(structure: &Structure, vertex: usize) -> Vec<f64> {
    structure
        .neighbors(vertex)
        .iter()
        .copied()
        .tuple_combinations()
        .filter_map(|(a, b)| angle_at(structure, vertex, a, b))
        .collect()
}

fn is_trigonal_planar_carbon(structure: &Structure, index: usize) -> bool {
    element_of(structure, index) == "C"
        && structure.degree(index) == 3
        && neighbor_angles(structure, index).iter().sum::<f64>() > TRIGONAL_PLANAR_ANGLE_SUM
}

/// Protonated amines: quaternary N, or a pyramidal tertiary N whose carbon
/// neighbours are not sp2.
fn nitrogen_groups(structure: &Structure) -> Vec<ChargedGroup> {
    non_protein_atoms_of(structure, "N")
        .filter(|&n| {
            let neighbors = structure.neighbors(n);
            let only_carbon_or_hydrogen = neighbors
                .iter()
                .all(|&i| matches!(element_of(structure, i), "C" | "H"));
            if !only_carbon_or_hydrogen {
                return false;
            }
            match neighbors.len() {
                4 => true,
                3 => {
                    let angles = neighbor_angles(structure, n);
                    let mean = angles.iter().sum::<f64>() / angles.len() as f64;
                    mean < MAX_AMMONIUM_MEAN_ANGLE
                        && !neighbors
                            .iter()
                            .any(|&i| is_trigonal_planar_carbon(structure, i))
                }
                _ => false,
            }
        })
        .filter_map(|n| group_at_centroid(structure, true, vec![n]))
        .collect()
}

/// Oxygen bonded only to `center`, or to `center` plus a single hydrogen.
fn is_terminal_oxygen(structure: &Structure, oxygen: usize, center: usize) -> bool {
    if element_of(structure, oxygen) != "O" {
        return false;
    }
    let others: Vec<usize> = structure
        .neighbors(oxygen)
        .iter()
        .copied()
        .filter(|&i| i != center)
        .collect();
    match others.as_slice() {
        [] => true,
        [only] => element_of(structure, *only) == "H",
        _ => false,
    }
}

/// Guanidinium/amidinium (+) and carboxylate (-) carbons.
fn carbon_groups(structure: &Structure) -> Vec<ChargedGroup> {
    non_protein_atoms_of(structure, "C")
        .filter(|&c| structure.degree(c) == 3)
        .filter_map(|c| {
            let neighbors = structure.neighbors(c);
            let nitrogens: Vec<usize> = neighbors
                .iter()
                .copied()
                .filter(|&i| element_of(structure, i) == "N")
                .collect();
            let oxygens: Vec<usize> = neighbors
                .iter()
                .copied()
                .filter(|&i| element_of(structure, i) == "O")
                .collect();

            if nitrogens.len() >= 2 && oxygens.is_empty() && !is_in_ring(structure, c) {
                let mut indices = nitrogens;
                indices.push(c);
                return group_at_centroid(structure, true, indices);
            }
            if oxygens.len() == 2 && oxygens.iter().all(|&o| is_terminal_oxygen(structure, o, c)) {
                return group_at_centroid(structure, false, oxygens);
            }
            None
        })
        .collect()
}

fn oxyanion_groups(structure: &Structure, element: &str, min_oxygens: usize) -> Vec<ChargedGroup> {
    non_protein_atoms_of(structure, element)
        .filter_map(|center| {
            let oxygens: Vec<usize> = structure
                .neighbors(center)
                .iter()
                .copied()
                .filter(|&o| is_terminal_oxygen(structure, o, center))
                .collect();
            if oxygens.len() >= min_oxygens {
                group_at_centroid(structure, false, oxygens)
            } else {
                None
            }
        })
        .collect()
}

fn phosphorus_groups(structure: &Structure) -> Vec<ChargedGroup> {
    oxyanion_groups(structure, "P", 2)
}

fn sulfur_groups(structure: &Structure) -> Vec<ChargedGroup> {
    oxyanion_groups(structure, "S", 3)
}
