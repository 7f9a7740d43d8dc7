use crate::core::interactions::line::LineEndpoints;
use crate::core::models::complex::Complex;
use std::collections::HashSet;

/// Host atom indices belonging to the frames currently displayed.
///
/// Built once per update pass so each line check is a set lookup rather than a
/// walk of the structure.
#[derive(Debug, Clone, Default)]
pub struct FrameMembership {
    atoms: HashSet<usize>,
}

impl FrameMembership {
    /// Union of the atoms of each complex's current molecule.
    pub fn from_complexes<'a, I>(complexes: I) -> Self
    where
        I: IntoIterator<Item = &'a Complex>,
    {
        complexes
            .into_iter()
            .flat_map(|complex| complex.current_molecule_atoms().map(|(_, atom)| atom.index))
            .collect()
    }

    pub fn contains(&self, atom_index: usize) -> bool {
        self.atoms.contains(&atom_index)
    }

    /// Whether every atom of both endpoints is displayed.
    pub fn line_in_frame<L: LineEndpoints + ?Sized>(&self, line: &L) -> bool {
        line.atom_indices().all(|atom| self.contains(atom))
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl FromIterator<usize> for FrameMembership {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}
