use crate::core::chemistry::typing::AtomType;
use crate::engine::context::InteractionContext;
use crate::engine::features::Buckets;
use tracing::{debug, instrument};

/// Histogram of recognized ligand atom types.
#[instrument(skip_all, name = "atom_counts_task")]
pub fn run(context: &InteractionContext) -> Buckets<AtomType> {
    let mut counts = Buckets::new();
    for atom_type in context
        .ligand
        .atoms()
        .iter()
        .filter_map(|atom| atom.recognized_type())
    {
        counts.increment(atom_type);
    }
    debug!(typed = counts.total(), "Counted ligand atom types.");
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::Structure;
    use crate::engine::config::BinanaParams;
    use crate::fixtures;

    fn counts_for(ligand: &Structure) -> Buckets<AtomType> {
        let receptor = Structure::new();
        let params = BinanaParams::default();
        run(&InteractionContext::new(ligand, &receptor, &params))
    }

    #[test]
    fn benzene_counts_only_aromatic_carbons() {
        let counts = counts_for(&fixtures::benzene());
        assert_eq!(counts.get(AtomType::A), 6.0);
        assert_eq!(counts.total(), 6.0);
    }

    #[test]
    fn formic_acid_counts_every_polar_type() {
        let counts = counts_for(&fixtures::formic_acid());
        assert_eq!(counts.get(AtomType::C), 1.0);
        assert_eq!(counts.get(AtomType::Oa), 2.0);
        assert_eq!(counts.get(AtomType::Hd), 1.0);
        assert_eq!(counts.total(), 4.0);
    }
}
