use crate::engine::context::InteractionContext;
use crate::engine::features::{AtomTypePair, Buckets};
use tracing::{debug, instrument};

/// Sums `q1 * q2 / d` over typed ligand–receptor pairs that both carry a
/// partial charge and lie closer than the electrostatic cutoff.
///
/// The sum is left unscaled; no Coulomb constant or dielectric is applied.
#[instrument(skip_all, name = "electrostatics_task")]
pub fn run(context: &InteractionContext) -> Buckets<AtomTypePair> {
    let mut energies = Buckets::new();
    let mut charged_pairs = 0usize;

    for pair in context.atom_pairs_within(context.params.electrostatic_cutoff) {
        let (Some(q1), Some(q2)) = (pair.ligand.charge, pair.receptor.charge) else {
            continue;
        };
        let (Some(a), Some(b)) = (pair.ligand.recognized_type(), pair.receptor.recognized_type())
        else {
            continue;
        };
        if pair.distance <= 0.0 {
            continue;
        }
        energies.add(AtomTypePair::new(a, b), q1 * q2 / pair.distance);
        charged_pairs += 1;
    }

    debug!(pairs = charged_pairs, "Accumulated electrostatic terms.");
    energies
}
