//! # Workflows Module
//!
//! Stateless structure preparation, run before interaction lines are drawn.
//!
//! ## Architecture
//!
//! - **Binding Site** ([`binding_site`]) - Target atoms within a radius of a ligand,
//!   found with a KD-tree ball query
//! - **Merging** ([`merge`]) - Aligning several complexes onto a reference and
//!   combining their chains, optionally only the selected residues
//! - **Error Handling** ([`error`]) - `WorkflowError`

pub mod binding_site;
pub mod error;
pub mod merge;
