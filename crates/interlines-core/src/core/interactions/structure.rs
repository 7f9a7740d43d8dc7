use super::line::{Endpoint, join_indices};
use crate::core::models::complex::Complex;
use crate::core::models::ids::AtomId;
use crate::core::utils::geometry::offset_to_centroid;
use nalgebra::{Point3, Vector3};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StructureError {
    #[error("A structure must contain at least one atom")]
    Empty,
    #[error("Atom {0:?} does not exist in the complex")]
    UnknownAtom(AtomId),
}

/// A group of atoms that one end of an interaction line attaches to.
///
/// Atom indices are kept sorted and unique, so [`StructureRef::index`] is the
/// canonical identifier of the group regardless of the order atoms were supplied
/// in. The first supplied atom becomes the anchor; lines are attached to it and
/// nudged by `local_offset` onto the group's centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureRef {
    atom_indices: Vec<usize>,
    conformer: Option<usize>,
    anchor_atom: usize,
    local_offset: Vector3<f64>,
}

impl StructureRef {
    /// Builds a structure from `(host atom index, local position)` pairs.
    pub fn new(
        atoms: &[(usize, Point3<f64>)],
        conformer: Option<usize>,
    ) -> Result<Self, StructureError> {
        let (anchor_atom, anchor_position) = *atoms.first().ok_or(StructureError::Empty)?;
        // A repeated atom counts once, at its first position.
        let mut seen = HashSet::new();
        let (mut atom_indices, positions): (Vec<usize>, Vec<Point3<f64>>) = atoms
            .iter()
            .filter(|(index, _)| seen.insert(*index))
            .copied()
            .unzip();
        atom_indices.sort_unstable();

        Ok(Self {
            atom_indices,
            conformer,
            anchor_atom,
            local_offset: offset_to_centroid(&anchor_position, &positions),
        })
    }

    /// Builds a structure from bare atom indices, with no positional information.
    /// The anchor offset is zero.
    pub fn from_indices(indices: &[usize], conformer: Option<usize>) -> Result<Self, StructureError> {
        let atoms: Vec<(usize, Point3<f64>)> = indices
            .iter()
            .map(|&index| (index, Point3::origin()))
            .collect();
        Self::new(&atoms, conformer)
    }

    /// Builds a structure from atoms of `complex`, tagged with the conformer of
    /// the complex's current molecule.
    pub fn from_atoms(complex: &Complex, atom_ids: &[AtomId]) -> Result<Self, StructureError> {
        let atoms = atom_ids
            .iter()
            .map(|&id| {
                complex
                    .atom(id)
                    .map(|atom| (atom.index, atom.position))
                    .ok_or(StructureError::UnknownAtom(id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let conformer = complex.current_molecule().map(|m| m.current_conformer);
        Self::new(&atoms, conformer)
    }

    /// Comma-joined sorted atom indices, e.g. `"1,2"`.
    pub fn index(&self) -> String {
        join_indices(&self.atom_indices)
    }

    pub fn atom_indices(&self) -> &[usize] {
        &self.atom_indices
    }

    pub fn conformer(&self) -> Option<usize> {
        self.conformer
    }

    pub fn anchor_atom(&self) -> usize {
        self.anchor_atom
    }

    /// Offset from the anchor atom to the group's centroid, in local coordinates.
    pub fn local_offset(&self) -> Vector3<f64> {
        self.local_offset
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.atom_indices.clone(), self.conformer)
    }
}
