//! # Engine Module
//!
//! The interaction engine turns an annotated receptor and ligand into a
//! fixed-length [`BindingFeatures`](features::BindingFeatures) fingerprint.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - distance cutoffs and angle tolerances
//! - **Schema** ([`features`]) - typed bucket keys and the flattened layout
//! - **Context** ([`context`]) - borrowed inputs plus a receptor kd-tree
//! - **Tasks** ([`tasks`]) - one computation per feature group
//! - **Error Handling** ([`error`]) - engine-specific error types
//!
//! Both structures are borrowed immutably; every call allocates a fresh
//! feature set, so independent pairs can be processed on separate threads.

pub mod config;
pub mod context;
pub mod error;
pub mod features;
pub mod tasks;

use crate::core::models::structure::Structure;
use config::BinanaParams;
use context::InteractionContext;
use error::EngineError;
use features::BindingFeatures;
use tracing::{info, instrument};

/// Computes every feature group for one ligand pose against a receptor.
#[instrument(skip_all, name = "binana_compute")]
pub fn compute(
    ligand: &Structure,
    receptor: &Structure,
    params: &BinanaParams,
) -> Result<BindingFeatures, EngineError> {
    params.validate()?;
    info!(
        ligand_atoms = ligand.len(),
        receptor_atoms = receptor.len(),
        "Computing binding features."
    );

    let context = InteractionContext::new(ligand, receptor, params);
    let contacts = tasks::contacts::run(&context);
    let features = BindingFeatures {
        close_contacts: contacts.close_contacts,
        contacts: contacts.contacts,
        electrostatics: tasks::electrostatics::run(&context),
        ligand_atom_counts: tasks::atom_counts::run(&context),
        hydrogen_bonds: tasks::hydrogen_bonds::run(&context),
        hydrophobics: tasks::hydrophobics::run(&context),
        pi_stacking: tasks::pi_stacking::run(&context),
        pi_cation: tasks::pi_cation::run(&context),
        t_shaped: tasks::t_shaped::run(&context),
        active_site_flexibility: tasks::flexibility::run(&context),
        salt_bridges: tasks::salt_bridges::run(&context),
        rotatable_bonds: tasks::rotatable_bonds::run(&context),
    };

    let nonzero = features.flatten()?.iter().filter(|&&v| v != 0.0).count();
    info!(nonzero, "Binding features computed.");
    Ok(features)
}
