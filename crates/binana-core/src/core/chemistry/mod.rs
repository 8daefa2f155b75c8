//! Chemical perception passes over a [`Structure`](crate::core::models::structure::Structure).
//!
//! Every pass reads the bond graph through the symmetric adjacency and stores
//! its result on the structure, replacing whatever a previous run produced:
//!
//! - [`bonds`] - covalent bonds inferred from interatomic distances, ring-bond
//!   detection and the rotatable-bond estimate
//! - [`charges`] - formally charged groups from a fixed table of rules
//! - [`aromatics`] - planar 5- and 6-membered rings
//! - [`typing`] - coarse AutoDock-style atom types
//! - [`secondary_structure`] - ALPHA/BETA/OTHER labels from backbone torsions
//!
//! Chemistry that no rule recognizes is left unannotated rather than treated as
//! an error.

pub mod aromatics;
pub mod bonds;
pub mod charges;
pub mod elements;
pub mod secondary_structure;
pub mod typing;
