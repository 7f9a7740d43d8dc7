use super::ids::ChainId;

/// One frame of a complex: an ordered set of chains plus its active conformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Molecule {
    /// Host-assigned molecule index, if the molecule exists on the host.
    pub index: Option<usize>,
    pub name: String,
    /// Index of the conformer currently displayed for this molecule.
    pub current_conformer: usize,
    pub(crate) chains: Vec<ChainId>,
}

impl Molecule {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            index: None,
            name: name.to_string(),
            current_conformer: 0,
            chains: Vec::new(),
        }
    }

    pub fn chains(&self) -> &[ChainId] {
        &self.chains
    }
}
