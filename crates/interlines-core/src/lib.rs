//! # Interlines Core Library
//!
//! Tracks interaction lines drawn between pairs of atom groups in a live 3-D
//! molecular scene, and keeps their visibility and color in sync with per-kind
//! settings as the displayed frame changes.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same strict three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Plain data: the structure model (`Complex`), interaction
//!   entities (`ShapeLine`, `InteractionLine`, `Label`), the order-independent `PairKey`,
//!   and the display settings.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer. Line managers own pair-keyed caches,
//!   the `StreamUpdater` keeps a host writing stream bound to exactly the cached line set,
//!   and all host traffic goes through the `ShapeHost` / `InteractionHost` traits.
//!
//! - **[`workflows`]: Structure Preparation.** Stateless procedures run before lines are
//!   drawn, such as locating a binding site and merging several complexes into one.

pub mod core;
pub mod engine;
pub mod workflows;
