use super::kind::InteractionKind;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-assigned identity of an uploaded entity (line, label, interaction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityIndex(pub usize);

impl fmt::Display for EntityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// `#rrggbb`, alpha omitted.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(255, 255, 255)
    }
}

/// One side of an interaction: the atoms it spans and the conformer they were
/// observed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub atom_indices: Vec<usize>,
    pub conformer: Option<usize>,
}

impl Endpoint {
    pub fn new(atom_indices: Vec<usize>, conformer: Option<usize>) -> Self {
        Self {
            atom_indices,
            conformer,
        }
    }

    /// Whether every atom in `atoms` belongs to this endpoint.
    pub fn contains_all(&self, atoms: &[usize]) -> bool {
        atoms.iter().all(|atom| self.atom_indices.contains(atom))
    }

    /// Sorted, comma-joined atom indices. Independent of the stored order.
    pub fn canonical_key(&self) -> String {
        let mut sorted = self.atom_indices.clone();
        sorted.sort_unstable();
        join_indices(&sorted)
    }
}

pub(crate) fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnchorType {
    #[default]
    Workspace,
    Complex,
    Atom,
}

/// Where one end of a shape is attached in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Anchor {
    pub anchor_type: AnchorType,
    /// Index of the anchored entity (an atom index for [`AnchorType::Atom`]).
    pub target: usize,
    /// Offset from the target, in the target's local frame.
    pub local_offset: Vector3<f64>,
}

/// Read access shared by every line representation.
pub trait LineEndpoints {
    fn kind(&self) -> InteractionKind;

    fn endpoints(&self) -> [&Endpoint; 2];

    /// Every atom referenced by either endpoint.
    fn atom_indices(&self) -> impl Iterator<Item = usize> {
        let [first, second] = self.endpoints();
        first
            .atom_indices
            .iter()
            .chain(second.atom_indices.iter())
            .copied()
    }
}

/// A host-managed interaction entity, queried back from the host rather than
/// cached locally.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionLine {
    pub index: Option<EntityIndex>,
    pub kind: InteractionKind,
    pub atom1: Endpoint,
    pub atom2: Endpoint,
    pub visible: bool,
}

impl InteractionLine {
    pub fn new(kind: InteractionKind, atom1: Endpoint, atom2: Endpoint) -> Self {
        Self {
            index: None,
            kind,
            atom1,
            atom2,
            visible: true,
        }
    }
}

impl LineEndpoints for InteractionLine {
    fn kind(&self) -> InteractionKind {
        self.kind
    }

    fn endpoints(&self) -> [&Endpoint; 2] {
        [&self.atom1, &self.atom2]
    }
}

/// A line drawn as a generic shape between two anchors, cached and colored
/// locally and streamed to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeLine {
    pub index: Option<EntityIndex>,
    pub kind: InteractionKind,
    pub atom1: Endpoint,
    pub atom2: Endpoint,
    pub visible: bool,
    pub color: Color,
    pub anchors: [Anchor; 2],
}

impl ShapeLine {
    pub fn new(kind: InteractionKind, atom1: Endpoint, atom2: Endpoint) -> Self {
        Self {
            index: None,
            kind,
            atom1,
            atom2,
            visible: true,
            color: Color::default(),
            anchors: [Anchor::default(); 2],
        }
    }
}

impl LineEndpoints for ShapeLine {
    fn kind(&self) -> InteractionKind {
        self.kind
    }

    fn endpoints(&self) -> [&Endpoint; 2] {
        [&self.atom1, &self.atom2]
    }
}

/// Every line representation a manager may be handed.
///
/// Each manager accepts exactly one variant and rejects the other.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Interaction(InteractionLine),
    Shape(ShapeLine),
}

impl Line {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Line::Interaction(_) => "InteractionLine",
            Line::Shape(_) => "ShapeLine",
        }
    }
}

impl From<InteractionLine> for Line {
    fn from(line: InteractionLine) -> Self {
        Line::Interaction(line)
    }
}

impl From<ShapeLine> for Line {
    fn from(line: ShapeLine) -> Self {
        Line::Shape(line)
    }
}
