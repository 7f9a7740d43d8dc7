//! # Engine Module
//!
//! The stateful layer: everything that owns interaction-line state or talks to
//! the rendering host.
//!
//! ## Overview
//!
//! Lines are created from pairs of structure refs, cached or stored on the host,
//! and then periodically recolored as settings and displayed frames change. The
//! engine keeps a host writing stream bound to exactly the cached line set, and
//! throws that stream away whenever the set changes.
//!
//! ## Architecture
//!
//! - **Host Contract** ([`host`]) - `ShapeHost`, `InteractionHost` and `WritingStream` traits
//! - **Pair Cache** ([`cache`]) - Entries grouped by `PairKey`, iterated in key order
//! - **Line Managers** ([`managers`]) - The shape-backed and remote-query `LineManager`s,
//!   plus the per-pair `LabelManager`
//! - **Streaming** ([`stream`]) - `StreamUpdater` and the `UpdateOutcome` of a pass
//! - **Frame Filter** ([`frame`]) - Which atoms the displayed frames contain
//! - **Error Handling** ([`error`]) - `LineError`

pub mod cache;
pub mod error;
pub mod frame;
pub mod host;
pub mod managers;
pub mod stream;

#[cfg(test)]
pub(crate) mod testing;
