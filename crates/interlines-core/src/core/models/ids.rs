//! Slot-map keys local to one [`Complex`](super::complex::Complex).
//!
//! These never leave the process. Anything shared with the rendering host uses
//! the atom's host index instead.

use slotmap::new_key_type;

new_key_type! {
    /// An atom slot inside a complex.
    pub struct AtomId;
    /// A residue slot inside a complex.
    pub struct ResidueId;
    /// A chain slot inside a complex, unique across all of its frames.
    pub struct ChainId;
}
