use super::pi_stacking::ring_structure;
use crate::core::utils::geometry;
use crate::engine::context::InteractionContext;
use crate::engine::features::{Buckets, TShapedKey};
use tracing::{debug, instrument};

/// Counts edge-to-face ring pairs: centres within the T-shaped cutoff, nearly
/// perpendicular normals, and one ring's centre projecting onto the other.
#[instrument(skip_all, name = "t_shaped_task")]
pub fn run(context: &InteractionContext) -> Buckets<TShapedKey> {
    let params = context.params;
    let min_angle = 90.0 - params.t_shaped_angle_tolerance;
    let mut counts = Buckets::new();

    for ligand_ring in context.ligand.aromatic_rings() {
        for receptor_ring in context.receptor.aromatic_rings() {
            if geometry::distance(&ligand_ring.center, &receptor_ring.center) >= params.t_shaped_cutoff {
                continue;
            }
            if ligand_ring.normal_angle_to(receptor_ring) <= min_angle {
                continue;
            }
            let centred = receptor_ring.projects_within(&ligand_ring.center, params.pi_padding)
                || ligand_ring.projects_within(&receptor_ring.center, params.pi_padding);
            if centred {
                counts.increment(TShapedKey(ring_structure(context, receptor_ring)));
            }
        }
    }

    debug!(t_shaped = counts.total(), "Counted T-shaped pi interactions.");
    counts
}
