use crate::core::io::pdb::{LoadWarning, PdbError, PdbFile};
use crate::core::io::traits::StructureFile;
use crate::core::models::structure::Structure;
use crate::engine::config::BinanaParams;
use crate::engine::error::EngineError;
use crate::engine::features::BindingFeatures;
use crate::engine;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to load structure: {source}")]
    Pdb {
        #[from]
        source: PdbError,
    },
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result of featurizing structures read from disk.
#[derive(Debug, Clone)]
pub struct FeaturizeOutput {
    pub features: BindingFeatures,
    pub receptor_warnings: Vec<LoadWarning>,
    pub ligand_warnings: Vec<LoadWarning>,
}

/// Featurizes already loaded and annotated structures.
#[instrument(skip_all, name = "featurize_workflow")]
pub fn run(
    ligand: &Structure,
    receptor: &Structure,
    params: &BinanaParams,
) -> Result<BindingFeatures, WorkflowError> {
    Ok(engine::compute(ligand, receptor, params)?)
}

/// Loads both files (PDB, or PDBQT by extension) and featurizes them.
///
/// Recoverable load problems are returned as warnings rather than errors.
#[instrument(skip_all, name = "featurize_workflow", fields(receptor = %receptor_path.display(), ligand = %ligand_path.display()))]
pub fn run_from_paths(
    ligand_path: &Path,
    receptor_path: &Path,
    params: &BinanaParams,
) -> Result<FeaturizeOutput, WorkflowError> {
    let (receptor, receptor_metadata) = PdbFile::read_from_path(receptor_path)?;
    let (ligand, ligand_metadata) = PdbFile::read_from_path(ligand_path)?;
    info!(
        receptor_atoms = receptor.len(),
        ligand_atoms = ligand.len(),
        "Loaded structures."
    );

    let warning_count = receptor_metadata.warnings.len() + ligand_metadata.warnings.len();
    if warning_count > 0 {
        warn!(warnings = warning_count, "Structures loaded with warnings.");
    }

    let features = engine::compute(&ligand, &receptor, params)?;
    Ok(FeaturizeOutput {
        features,
        receptor_warnings: receptor_metadata.warnings,
        ligand_warnings: ligand_metadata.warnings,
    })
}
