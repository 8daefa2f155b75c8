//! # Binana Core Library
//!
//! Structural descriptors of protein-ligand binding poses, computed the way the
//! Binana/NNScore featurizer does it: the receptor and the ligand are annotated
//! with bonds, charged groups, aromatic rings, secondary structure and coarse atom
//! types, and the interaction engine then buckets every detected non-covalent
//! contact into a fixed-length feature vector.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Atomic data model (`Structure`, `Atom`), the
//!   PDB/PDBQT reader and writer, and the chemistry passes that annotate a model.
//!
//! - **[`engine`]: The Interaction Engine.** Walks ligand/receptor atom, ring and
//!   charge pairs and fills the typed buckets of [`engine::features::BindingFeatures`].
//!
//! - **[`workflows`]: The Public API.** End-to-end featurization from structures or
//!   from files on disk.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod fixtures;
