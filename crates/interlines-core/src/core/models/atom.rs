use super::ids::ResidueId;
use nalgebra::Point3;

/// Represents an atom inside a complex, as exposed by the structure provider.
///
/// The `index` is the host-assigned atom index. It is the identity used by line
/// endpoints and frame-membership tests, and it survives copying an atom into
/// another complex (for example when chains are grafted during a merge).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Host-assigned atom index, unique across the scene.
    pub index: usize,
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// Position in the owning complex's local frame, in Angstroms.
    pub position: Point3<f64>,
    /// Whether the atom is currently selected in the scene.
    pub selected: bool,
}

impl Atom {
    /// Creates a new, unselected `Atom`.
    ///
    /// # Arguments
    ///
    /// * `index` - The host atom index.
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The local 3D coordinates of the atom.
    pub fn new(index: usize, name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            index,
            name: name.to_string(),
            residue_id,
            position,
            selected: false,
        }
    }

    /// Returns the position as a plain array, the layout spatial indices expect.
    pub fn position_array(&self) -> [f64; 3] {
        [self.position.x, self.position.y, self.position.z]
    }
}
