use crate::core::models::residue::ResidueKey;
use crate::core::models::secondary::SecondaryStructure;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry;
use nalgebra::Point3;
use std::collections::HashMap;
use tracing::debug;

/// Longest C(i-1)-N(i) distance still treated as a peptide bond.
const PEPTIDE_BOND_CUTOFF: f64 = 2.0;
const CA_CONTACT_CUTOFF: f64 = 6.0;
const HELIX_PARTNER_OFFSET: usize = 3;
const MIN_HELIX_RUN: usize = 5;
const MIN_STRAND_RUN: usize = 3;

struct BackboneResidue {
    key: ResidueKey,
    segment: usize,
    position: usize,
    n: Option<Point3<f64>>,
    ca: Option<Point3<f64>>,
    c: Option<Point3<f64>>,
}

pub fn assign_secondary_structure(structure: &mut Structure) {
    let labels = classify_residues(structure);
    debug!(
        alpha = labels.values().filter(|&&s| s == SecondaryStructure::Alpha).count(),
        beta = labels.values().filter(|&&s| s == SecondaryStructure::Beta).count(),
        "Assigned secondary structure."
    );
    structure.set_secondary_structure(labels);
}

/// Labels every protein residue of `structure`.
///
/// Residues are first classified from their backbone torsions, then labels
/// that lack structural support are reset to `Other` until nothing changes.
pub fn classify_residues(structure: &Structure) -> HashMap<ResidueKey, SecondaryStructure> {
    let residues = backbone_residues(structure);
    let mut labels: Vec<SecondaryStructure> = (0..residues.len())
        .map(|i| classify_from_torsions(&residues, i))
        .collect();

    loop {
        let refined = refine(&residues, &labels);
        if refined == labels {
            break;
        }
        labels = refined;
    }

    residues
        .into_iter()
        .zip(labels)
        .map(|(residue, label)| (residue.key, label))
        .collect()
}

/// Classifies a single `(phi, psi)` pair in degrees.
pub fn classify_torsions(phi: f64, psi: f64) -> SecondaryStructure {
    if -145.0 < phi && phi < -35.0 && -70.0 < psi && psi < 50.0 {
        SecondaryStructure::Alpha
    } else if (-180.0 <= phi && phi < -40.0 && 90.0 < psi && psi <= 180.0)
        || (-180.0 <= phi && phi < -70.0 && psi < -165.0)
    {
        SecondaryStructure::Beta
    } else {
        SecondaryStructure::Other
    }
}

fn backbone_residues(structure: &Structure) -> Vec<BackboneResidue> {
    let mut residues: Vec<BackboneResidue> = Vec::new();
    let mut segment = 0;
    let mut position = 0;

    for (key, members) in structure.residues() {
        let members: Vec<usize> = members
            .into_iter()
            .filter(|&i| !structure.is_non_protein(i))
            .collect();
        if members.is_empty() {
            continue;
        }
        let coordinates = |name: &str| {
            structure
                .find_named(&members, name)
                .and_then(|i| structure.atom(i))
                .map(|a| a.coordinates)
        };
        if let Some(previous) = residues.last() {
            if previous.key.chain == key.chain {
                position += 1;
            } else {
                segment += 1;
                position = 0;
            }
        }
        residues.push(BackboneResidue {
            n: coordinates("N"),
            ca: coordinates("CA"),
            c: coordinates("C"),
            key,
            segment,
            position,
        });
    }
    residues
}

fn is_peptide_linked(previous: &BackboneResidue, next: &BackboneResidue) -> bool {
    if previous.segment != next.segment {
        return false;
    }
    match (previous.c, next.n) {
        (Some(c), Some(n)) => geometry::distance(&c, &n) < PEPTIDE_BOND_CUTOFF,
        _ => false,
    }
}

fn classify_from_torsions(residues: &[BackboneResidue], i: usize) -> SecondaryStructure {
    let current = &residues[i];
    let (Some(n), Some(ca), Some(c)) = (current.n, current.ca, current.c) else {
        return SecondaryStructure::Other;
    };
    let previous = i
        .checked_sub(1)
        .map(|p| &residues[p])
        .filter(|p| is_peptide_linked(p, current));
    let next = residues.get(i + 1).filter(|q| is_peptide_linked(current, q));

    let (Some(prev_c), Some(next_n)) = (previous.and_then(|p| p.c), next.and_then(|q| q.n)) else {
        return SecondaryStructure::Other;
    };
    let phi = geometry::dihedral(&prev_c, &n, &ca, &c);
    let psi = geometry::dihedral(&n, &ca, &c, &next_n);
    classify_torsions(phi, psi)
}

fn ca_contact(a: &BackboneResidue, b: &BackboneResidue) -> bool {
    match (a.ca, b.ca) {
        (Some(p), Some(q)) => geometry::distance(&p, &q) < CA_CONTACT_CUTOFF,
        _ => false,
    }
}

fn has_helix_partner(residues: &[BackboneResidue], labels: &[SecondaryStructure], i: usize) -> bool {
    let current = &residues[i];
    residues.iter().enumerate().any(|(j, other)| {
        labels[j] == SecondaryStructure::Alpha
            && other.segment == current.segment
            && other.position.abs_diff(current.position) == HELIX_PARTNER_OFFSET
            && ca_contact(current, other)
    })
}

fn has_strand_partner(residues: &[BackboneResidue], labels: &[SecondaryStructure], i: usize) -> bool {
    let current = &residues[i];
    residues.iter().enumerate().any(|(j, other)| {
        let non_neighboring = other.segment != current.segment
            || other.position.abs_diff(current.position) > 2;
        labels[j] == SecondaryStructure::Beta && non_neighboring && ca_contact(current, other)
    })
}

fn refine(residues: &[BackboneResidue], labels: &[SecondaryStructure]) -> Vec<SecondaryStructure> {
    let mut refined: Vec<SecondaryStructure> = labels
        .iter()
        .enumerate()
        .map(|(i, &label)| match label {
            SecondaryStructure::Alpha if !has_helix_partner(residues, labels, i) => {
                SecondaryStructure::Other
            }
            SecondaryStructure::Beta if !has_strand_partner(residues, labels, i) => {
                SecondaryStructure::Other
            }
            other => other,
        })
        .collect();

    reset_short_runs(residues, &mut refined, SecondaryStructure::Alpha, MIN_HELIX_RUN);
    reset_short_runs(residues, &mut refined, SecondaryStructure::Beta, MIN_STRAND_RUN);
    refined
}

/// Resets runs of `label` shorter than `min_length` consecutive residues.
fn reset_short_runs(
    residues: &[BackboneResidue],
    labels: &mut [SecondaryStructure],
    label: SecondaryStructure,
    min_length: usize,
) {
    let mut start = 0;
    while start < labels.len() {
        if labels[start] != label {
            start += 1;
            continue;
        }
        let mut end = start + 1;
        while end < labels.len()
            && labels[end] == label
            && residues[end].segment == residues[start].segment
            && residues[end].position == residues[end - 1].position + 1
        {
            end += 1;
        }
        if end - start < min_length {
            labels[start..end].fill(SecondaryStructure::Other);
        }
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn labels_in_order(structure: &Structure) -> Vec<SecondaryStructure> {
        structure
            .residues()
            .iter()
            .map(|(key, _)| structure.secondary_structure_of(key))
            .collect()
    }

    #[test]
    fn torsion_windows_match_reference_regions() {
        assert_eq!(classify_torsions(-57.0, -47.0), SecondaryStructure::Alpha);
        assert_eq!(classify_torsions(-120.0, 130.0), SecondaryStructure::Beta);
        assert_eq!(classify_torsions(-100.0, -170.0), SecondaryStructure::Beta);
        assert_eq!(classify_torsions(60.0, 45.0), SecondaryStructure::Other);
        assert_eq!(classify_torsions(-35.0, -47.0), SecondaryStructure::Other);
    }

    #[test]
    fn ideal_helix_interior_is_alpha() {
        let helix = fixtures::ideal_backbone(10, -57.0, -47.0);
        let labels = labels_in_order(&helix);
        assert_eq!(labels.len(), 10);
        assert_eq!(labels[0], SecondaryStructure::Other);
        assert_eq!(labels[9], SecondaryStructure::Other);
        assert!(labels[1..9].iter().all(|&s| s == SecondaryStructure::Alpha));
    }

    #[test]
    fn short_helix_is_reset_to_other() {
        let helix = fixtures::ideal_backbone(5, -57.0, -47.0);
        let labels = labels_in_order(&helix);
        assert!(labels.iter().all(|&s| s == SecondaryStructure::Other));
    }

    #[test]
    fn isolated_extended_strand_is_other() {
        let strand = fixtures::ideal_backbone(8, -120.0, 130.0);
        let initial: Vec<_> = {
            let residues = backbone_residues(&strand);
            (0..residues.len())
                .map(|i| classify_from_torsions(&residues, i))
                .collect()
        };
        assert!(initial[1..7].iter().all(|&s| s == SecondaryStructure::Beta));

        let labels = labels_in_order(&strand);
        assert!(labels.iter().all(|&s| s == SecondaryStructure::Other));
    }

    #[test]
    fn non_protein_residues_are_unlabelled() {
        let benzene = fixtures::benzene();
        assert!(benzene.secondary_structure().is_empty());
    }
}
