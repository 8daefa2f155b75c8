use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry;
use crate::engine::context::InteractionContext;
use crate::engine::features::{Buckets, HydrogenBondKey, Partner};
use tracing::{debug, instrument};

fn is_polar_heavy_atom(atom: &Atom) -> bool {
    matches!(atom.element.as_str(), "O" | "N")
}

fn bonded_hydrogens(structure: &Structure, index: usize) -> impl Iterator<Item = &Atom> {
    structure
        .connected_atoms_of_given_element(index, "H")
        .into_iter()
        .filter_map(|index| structure.atom(index))
}

/// Counts hydrogen bonds between ligand and receptor O/N atoms.
///
/// Every hydrogen bonded to either heavy atom is tested; a bond is counted
/// when the ligand atom, the hydrogen and the receptor atom are close to
/// collinear. The key records which partner owns the hydrogen and the
/// stratum of the receptor heavy atom.
#[instrument(skip_all, name = "hydrogen_bonds_task")]
pub fn run(context: &InteractionContext) -> Buckets<HydrogenBondKey> {
    let tolerance = context.params.hydrogen_bond_angle_tolerance;
    let mut counts = Buckets::new();

    for pair in context.atom_pairs_within(context.params.hydrogen_bond_cutoff) {
        if !is_polar_heavy_atom(pair.ligand) || !is_polar_heavy_atom(pair.receptor) {
            continue;
        }
        let stratum = context.receptor_stratum(pair.receptor);
        let candidates = bonded_hydrogens(context.ligand, pair.ligand.index)
            .map(|h| (Partner::Ligand, h))
            .chain(bonded_hydrogens(context.receptor, pair.receptor.index).map(|h| (Partner::Receptor, h)));

        for (donor, hydrogen) in candidates {
            let angle = geometry::bond_angle(
                &pair.ligand.coordinates,
                &hydrogen.coordinates,
                &pair.receptor.coordinates,
            );
            if (180.0 - angle).abs() <= tolerance {
                counts.increment(HydrogenBondKey { donor, stratum });
            }
        }
    }

    debug!(bonds = counts.total(), "Counted hydrogen bonds.");
    counts
}
