use crate::core::models::ring::AromaticRing;
use crate::core::models::secondary::SecondaryStructure;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry;
use crate::engine::context::InteractionContext;
use crate::engine::features::{Buckets, StackingKey};
use tracing::{debug, instrument};

/// Whether any member atom of `ring` projects onto `other` within its radius
/// plus `padding`.
pub(crate) fn any_member_projects_within(
    structure: &Structure,
    ring: &AromaticRing,
    other: &AromaticRing,
    padding: f64,
) -> bool {
    ring.indices
        .iter()
        .filter_map(|&index| structure.atom(index))
        .any(|atom| other.projects_within(&atom.coordinates, padding))
}

/// Secondary structure of the residue owning a receptor ring.
pub(crate) fn ring_structure(context: &InteractionContext, ring: &AromaticRing) -> SecondaryStructure {
    ring.first_index()
        .map(|index| context.receptor_secondary_structure(index))
        .unwrap_or_default()
}

/// Counts face-to-face stacked ring pairs: centres within the stacking
/// cutoff, nearly parallel normals, and overlapping projections.
#[instrument(skip_all, name = "pi_stacking_task")]
pub fn run(context: &InteractionContext) -> Buckets<StackingKey> {
    let params = context.params;
    let mut counts = Buckets::new();

    for ligand_ring in context.ligand.aromatic_rings() {
        for receptor_ring in context.receptor.aromatic_rings() {
            if geometry::distance(&ligand_ring.center, &receptor_ring.center) >= params.pi_stacking_cutoff {
                continue;
            }
            if ligand_ring.normal_angle_to(receptor_ring) >= params.pi_stacking_angle_tolerance {
                continue;
            }
            let overlaps = any_member_projects_within(
                context.ligand,
                ligand_ring,
                receptor_ring,
                params.pi_padding,
            ) || any_member_projects_within(
                context.receptor,
                receptor_ring,
                ligand_ring,
                params.pi_padding,
            );
            if overlaps {
                counts.increment(StackingKey(ring_structure(context, receptor_ring)));
            }
        }
    }

    debug!(stacked = counts.total(), "Counted pi-pi stacking.");
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::BinanaParams;
    use crate::fixtures;

    fn stacking_between(ligand_center: [f64; 3], vertical: bool) -> Buckets<StackingKey> {
        let ligand = fixtures::benzene_ring(ligand_center, vertical);
        let receptor = fixtures::phenylalanine_ring([0.0, 0.0, 0.0], false);
        let params = BinanaParams::default();
        run(&InteractionContext::new(&ligand, &receptor, &params))
    }

    #[test]
    fn parallel_rings_stack() {
        let counts = stacking_between([0.0, 0.0, 3.7], false);
        assert_eq!(counts.get(StackingKey(SecondaryStructure::Other)), 1.0);
        assert_eq!(counts.total(), 1.0);
    }

    #[test]
    fn laterally_offset_rings_do_not_stack() {
        assert_eq!(stacking_between([4.0, 0.0, 3.7], false).total(), 0.0);
    }

    #[test]
    fn perpendicular_rings_do_not_stack() {
        assert_eq!(stacking_between([0.0, 0.0, 4.5], true).total(), 0.0);
    }

    #[test]
    fn distant_rings_do_not_stack() {
        assert_eq!(stacking_between([0.0, 0.0, 20.0], false).total(), 0.0);
    }
}
