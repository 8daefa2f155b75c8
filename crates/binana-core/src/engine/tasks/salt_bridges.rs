use crate::core::utils::geometry;
use crate::engine::context::InteractionContext;
use crate::engine::features::{Buckets, SaltBridgeKey};
use tracing::{debug, instrument};

/// Counts oppositely charged ligand/receptor group pairs within the salt
/// bridge cutoff, keyed by the receptor group's residue.
#[instrument(skip_all, name = "salt_bridges_task")]
pub fn run(context: &InteractionContext) -> Buckets<SaltBridgeKey> {
    let cutoff = context.params.salt_bridge_cutoff;
    let mut counts = Buckets::new();

    for ligand_group in context.ligand.charged_groups() {
        for receptor_group in context.receptor.charged_groups() {
            if ligand_group.positive == receptor_group.positive {
                continue;
            }
            if geometry::distance(&ligand_group.coordinates, &receptor_group.coordinates) >= cutoff {
                continue;
            }
            let structure = receptor_group
                .anchor()
                .map(|index| context.receptor_secondary_structure(index))
                .unwrap_or_default();
            counts.increment(SaltBridgeKey(structure));
        }
    }

    debug!(bridges = counts.total(), "Counted salt bridges.");
    counts
}
