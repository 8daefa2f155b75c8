use crate::core::chemistry::bonds::estimate_rotatable_bonds;
use crate::engine::context::InteractionContext;
use tracing::{debug, instrument};

/// Rotatable bonds of the ligand: the declared torsion count when the input
/// carried one, otherwise an estimate from the bond graph.
#[instrument(skip_all, name = "rotatable_bonds_task")]
pub fn run(context: &InteractionContext) -> usize {
    let declared = context.ligand.declared_torsions();
    let count = declared.unwrap_or_else(|| estimate_rotatable_bonds(context.ligand));
    debug!(count, declared = declared.is_some(), "Counted rotatable bonds.");
    count
}
