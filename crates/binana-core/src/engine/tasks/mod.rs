//! Individual interaction computations.
//!
//! Each task reads an [`InteractionContext`](super::context::InteractionContext)
//! and returns the buckets of one feature group. Tasks never mutate either
//! structure, so they can be called in any order or on their own.

pub mod atom_counts;
pub mod contacts;
pub mod electrostatics;
pub mod flexibility;
pub mod hydrogen_bonds;
pub mod hydrophobics;
pub mod pi_cation;
pub mod pi_stacking;
pub mod rotatable_bonds;
pub mod salt_bridges;
pub mod t_shaped;
