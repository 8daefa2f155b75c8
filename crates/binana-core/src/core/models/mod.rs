//! Atomic data model for receptors and ligands.
//!
//! A [`structure::Structure`] owns its atoms in a dense, insertion-ordered arena
//! addressed by 1-based index. Bonds are recorded twice: as the possibly
//! one-directional `connected_indices` of the atom they were read on, and in a
//! symmetric adjacency kept in sync on every insertion, which is what all graph
//! queries read.
//!
//! Annotations derived from the model (charged groups, aromatic rings and
//! secondary-structure labels) are stored on the structure by the passes in
//! [`crate::core::chemistry`]. Each pass replaces its previous result, so passes
//! can be re-run safely.

pub mod atom;
pub mod charge;
pub mod residue;
pub mod ring;
pub mod secondary;
pub mod structure;
