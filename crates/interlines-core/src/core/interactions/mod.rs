//! # Interactions Module
//!
//! Entities that connect two structures in the scene, and the canonical keys
//! that identify the structure pair they connect.
//!
//! - [`kind`] - Interaction kinds and their textual forms
//! - [`line`] - Line representations, endpoints, anchors and colors
//! - [`label`] - Per-pair text labels
//! - [`structure`] - Atom groups that lines attach to
//! - [`pair_key`] - Order-independent structure-pair identifiers

pub mod kind;
pub mod label;
pub mod line;
pub mod pair_key;
pub mod structure;
