use crate::engine::context::InteractionContext;
use crate::engine::features::{Buckets, Stratum};
use tracing::{debug, instrument};

/// Counts ligand carbon / receptor carbon pairs within the hydrophobic
/// cutoff, bucketed by the stratum of the receptor carbon.
#[instrument(skip_all, name = "hydrophobics_task")]
pub fn run(context: &InteractionContext) -> Buckets<Stratum> {
    let mut counts = Buckets::new();
    for pair in context.atom_pairs_within(context.params.hydrophobic_cutoff) {
        if pair.ligand.element == "C" && pair.receptor.element == "C" {
            counts.increment(context.receptor_stratum(pair.receptor));
        }
    }
    debug!(contacts = counts.total(), "Counted hydrophobic contacts.");
    counts
}
