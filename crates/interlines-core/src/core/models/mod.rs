//! # Core Models Module
//!
//! In-process representation of the structure provider: complexes, their frames
//! (molecules), chains, residues and atoms.
//!
//! ## Overview
//!
//! A [`complex::Complex`] owns its atoms, residues and chains in slot maps and
//! orders them into frames. Exactly one frame is displayed at a time; everything
//! that reasons about "what is on screen" (frame-membership tests, binding-site
//! queries, merging) goes through [`complex::Complex::current_molecule`].
//!
//! Atoms carry the host-assigned atom index that interaction lines refer to, so
//! atom identity survives deep copies between complexes.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom with host index, local position and selection flag
//! - [`residue`] - Ordered atom membership
//! - [`chain`] - Named, ordered residue membership
//! - [`molecule`] - One frame: ordered chains plus active conformer
//! - [`complex`] - Slot-map storage, frame selection and chain grafting
//! - [`builder`] - Fluent construction for callers and tests
//! - [`ids`] - Unique identifier types for atoms, residues, and chains
//!
//! ## Usage
//!
//! ```ignore
//! use interlines::core::models::builder::ComplexBuilder;
//! use nalgebra::Point3;
//!
//! let mut builder = ComplexBuilder::new("ligand");
//! builder
//!     .start_molecule("frame 1")
//!     .start_chain("L")?
//!     .start_residue(1, "LIG")?
//!     .add_atom(100, "C1", Point3::new(0.0, 0.0, 0.0))?;
//! let complex = builder.build();
//! ```

pub mod atom;
pub mod builder;
pub mod chain;
pub mod complex;
pub mod ids;
pub mod molecule;
pub mod residue;
