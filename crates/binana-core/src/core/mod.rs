//! # Core Module
//!
//! The building blocks shared by every featurization: the atomic model, file I/O
//! and the chemistry perception passes.
//!
//! - **Molecular Representation** ([`models`]) - atoms, residue keys, structures,
//!   charged groups, aromatic rings and secondary-structure labels
//! - **File I/O** ([`io`]) - fixed-column PDB and PDBQT reading and writing
//! - **Chemical Perception** ([`chemistry`]) - bond inference, charge assignment,
//!   ring perception, atom typing and backbone secondary structure
//! - **Utilities** ([`utils`]) - geometric helpers on `nalgebra` points
//!
//! A [`models::structure::Structure`] is mutated only while it is being loaded and
//! annotated. The interaction engine borrows annotated structures immutably.

pub mod chemistry;
pub mod io;
pub mod models;
pub mod utils;
