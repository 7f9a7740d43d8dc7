use super::ids::{AtomId, ChainId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub number: isize,             // Residue sequence number
    pub name: String,              // Name of the residue (e.g., "ALA", "LIG")
    pub chain_id: ChainId,         // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>, // IDs of atoms belonging to this residue
}

impl Residue {
    pub(crate) fn new(number: isize, name: &str, chain_id: ChainId) -> Self {
        Self {
            number,
            name: name.to_string(),
            chain_id,
            atoms: Vec::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_id: AtomId) {
        self.atoms.push(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }
}
