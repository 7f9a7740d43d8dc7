use super::line::LineEndpoints;
use super::structure::StructureRef;
use std::fmt;

/// Joins the two per-structure identifiers of a pair key.
pub const PAIR_KEY_SEPARATOR: &str = "|";

/// Canonical, order-independent identifier of an unordered structure pair.
///
/// Both constructors sort the two per-structure identifiers lexicographically
/// before joining them, so swapping the structures (or a line's endpoints)
/// yields the same key. Keys order lexicographically, which is the order caches
/// iterate in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(String);

impl PairKey {
    /// Key for two raw structure identifiers.
    pub fn from_ids(id1: impl ToString, id2: impl ToString) -> Self {
        Self::join(id1.to_string(), id2.to_string())
    }

    /// Key for two structure refs, via their index strings.
    pub fn from_structures(s1: &StructureRef, s2: &StructureRef) -> Self {
        Self::from_ids(s1.index(), s2.index())
    }

    /// Key for the structures a line connects, derived from its endpoints.
    pub fn from_line<L: LineEndpoints + ?Sized>(line: &L) -> Self {
        let [first, second] = line.endpoints();
        Self::join(first.canonical_key(), second.canonical_key())
    }

    fn join(a: String, b: String) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self(format!("{low}{PAIR_KEY_SEPARATOR}{high}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
