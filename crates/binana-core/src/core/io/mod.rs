//! Reading and writing structure files.
//!
//! [`traits::StructureFile`] is the common interface; [`pdb::PdbFile`] implements
//! it for fixed-column PDB and its AutoDock PDBQT flavour. Loading a file also
//! completes the model: missing bonds are inferred from distances and the
//! structure is annotated before it is returned.

pub mod pdb;
pub mod traits;
