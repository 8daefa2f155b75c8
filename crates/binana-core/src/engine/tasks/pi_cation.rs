use super::pi_stacking::ring_structure;
use crate::core::models::charge::ChargedGroup;
use crate::core::models::ring::AromaticRing;
use crate::core::utils::geometry;
use crate::engine::context::InteractionContext;
use crate::engine::features::{Buckets, PiCationKey, Partner};
use tracing::{debug, instrument};

fn is_pi_cation(group: &ChargedGroup, ring: &AromaticRing, cutoff: f64, padding: f64) -> bool {
    group.positive
        && geometry::distance(&group.coordinates, &ring.center) < cutoff
        && ring.projects_within(&group.coordinates, padding)
}

/// Counts positive charged groups sitting over an aromatic ring of the other
/// partner.
///
/// Ligand cations are keyed by the receptor ring's residue; receptor cations
/// by the residue of the charged group itself.
#[instrument(skip_all, name = "pi_cation_task")]
pub fn run(context: &InteractionContext) -> Buckets<PiCationKey> {
    let cutoff = context.params.pi_cation_cutoff;
    let padding = context.params.pi_padding;
    let mut counts = Buckets::new();

    for group in context.ligand.charged_groups() {
        for ring in context.receptor.aromatic_rings() {
            if is_pi_cation(group, ring, cutoff, padding) {
                counts.increment(PiCationKey {
                    charged: Partner::Ligand,
                    structure: ring_structure(context, ring),
                });
            }
        }
    }

    for group in context.receptor.charged_groups() {
        let structure = group
            .anchor()
            .map(|index| context.receptor_secondary_structure(index))
            .unwrap_or_default();
        for ring in context.ligand.aromatic_rings() {
            if is_pi_cation(group, ring, cutoff, padding) {
                counts.increment(PiCationKey {
                    charged: Partner::Receptor,
                    structure,
                });
            }
        }
    }

    debug!(interactions = counts.total(), "Counted pi-cation interactions.");
    counts
}
