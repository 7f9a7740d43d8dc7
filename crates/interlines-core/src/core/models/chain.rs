use super::ids::ResidueId;

/// Prefix marking solvent/hydrogen chains that spatial queries skip.
pub const SOLVENT_CHAIN_PREFIX: &str = "H";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub name: String,                    // Chain name (e.g., "A", "HA")
    pub(crate) residues: Vec<ResidueId>, // Ordered list of residue IDs belonging to this chain
}

impl Chain {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            residues: Vec::new(),
        }
    }

    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }

    /// Whether this chain holds solvent or hydrogens rather than target atoms.
    pub fn is_solvent(&self) -> bool {
        self.name.starts_with(SOLVENT_CHAIN_PREFIX)
    }
}
