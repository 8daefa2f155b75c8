//! # Workflows Module
//!
//! High-level entry points that take a receptor and a ligand from disk (or
//! from already loaded structures) to a finished
//! [`BindingFeatures`](crate::engine::features::BindingFeatures) set.
//!
//! - **Featurization** ([`featurize`]) - load, annotate and run every engine task

pub mod featurize;
