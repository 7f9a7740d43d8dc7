//! # Core Module
//!
//! Stateless building blocks shared by the engine and the workflows.
//!
//! ## Overview
//!
//! The core module describes the structures an interaction connects and the
//! interactions themselves. Nothing here talks to a rendering host; the types are
//! plain data with validation at construction time.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Complexes, frames (molecules), chains,
//!   residues and atoms stored in slot-map arenas, plus a fluent builder
//! - **Interaction Entities** ([`interactions`]) - Interaction kinds, line and label
//!   entities, structure refs and the canonical pair key
//! - **Display Settings** ([`settings`]) - Per-kind visibility and color, loaded from TOML
//! - **Geometry** ([`utils`]) - Centroids and rigid-frame conversions

pub mod interactions;
pub mod models;
pub mod settings;
pub mod utils;
