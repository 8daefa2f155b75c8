use crate::core::models::atom::AtomRole;
use crate::core::models::residue::ResidueKey;
use crate::engine::context::InteractionContext;
use crate::engine::features::{Buckets, Stratum};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Counts distinct (receptor residue, backbone/side-chain) groups with at
/// least one atom near the ligand, bucketed by role and the residue's
/// secondary structure.
#[instrument(skip_all, name = "flexibility_task")]
pub fn run(context: &InteractionContext) -> Buckets<Stratum> {
    let mut seen: HashSet<(ResidueKey, AtomRole)> = HashSet::new();
    let mut counts = Buckets::new();

    for pair in context.atom_pairs_within(context.params.active_site_flexibility_cutoff) {
        let role = pair.receptor.backbone_or_sidechain();
        if seen.insert((pair.receptor.residue_key(), role)) {
            counts.increment(context.receptor_stratum(pair.receptor));
        }
    }

    debug!(groups = seen.len(), "Collected active-site residue groups.");
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::secondary::SecondaryStructure;
    use crate::engine::config::BinanaParams;
    use crate::fixtures;

    #[test]
    fn residue_groups_are_counted_once() {
        let ligand = fixtures::ligand(&[("C1", [0.0, 0.0, 0.0]), ("O1", [-1.2, 0.0, 0.0])]);
        let receptor = fixtures::receptor(&[
            (
                "SER",
                1,
                &[
                    ("CB", [3.0, 0.0, 0.0]),
                    ("OG", [0.0, 0.0, 3.0]),
                    ("CA", [0.0, 3.5, 0.0]),
                ],
            ),
            ("GLY", 2, &[("CA", [20.0, 0.0, 0.0])]),
        ]);
        let params = BinanaParams::default();
        let context = InteractionContext::new(&ligand, &receptor, &params);

        let counts = run(&context);
        let other = SecondaryStructure::Other;
        assert_eq!(counts.get(Stratum::new(AtomRole::Sidechain, other)), 1.0);
        assert_eq!(counts.get(Stratum::new(AtomRole::Backbone, other)), 1.0);
        assert_eq!(counts.total(), 2.0);
    }

    #[test]
    fn distant_ligand_touches_nothing() {
        let ligand = fixtures::ligand(&[("C1", [50.0, 50.0, 50.0])]);
        let receptor = fixtures::ideal_backbone(10, -57.0, -47.0);
        let params = BinanaParams::default();
        let context = InteractionContext::new(&ligand, &receptor, &params);
        assert_eq!(run(&context).total(), 0.0);
    }
}
