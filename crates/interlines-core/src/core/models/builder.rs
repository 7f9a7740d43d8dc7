use super::atom::Atom;
use super::complex::Complex;
use super::ids::{ChainId, ResidueId};
use nalgebra::{Isometry3, Point3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BuildError {
    #[error("Must start a molecule before starting a chain")]
    NoCurrentMolecule,
    #[error("Must start a chain before starting a residue")]
    NoCurrentChain,
    #[error("Cannot add atom '{atom_name}' without a current residue")]
    NoCurrentResidue { atom_name: String },
}

/// Fluent, order-driven construction of a [`Complex`].
///
/// Each `start_*` call opens a new container that subsequent calls append to.
pub struct ComplexBuilder {
    complex: Complex,
    current_frame: Option<usize>,
    current_chain: Option<ChainId>,
    current_residue: Option<ResidueId>,
}

impl ComplexBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            complex: Complex::new(name),
            current_frame: None,
            current_chain: None,
            current_residue: None,
        }
    }

    pub fn index(&mut self, index: usize) -> &mut Self {
        self.complex.index = Some(index);
        self
    }

    pub fn transform(&mut self, transform: Isometry3<f64>) -> &mut Self {
        self.complex.transform = transform;
        self
    }

    pub fn start_molecule(&mut self, name: &str) -> &mut Self {
        self.current_frame = Some(self.complex.add_molecule(name));
        self.current_chain = None;
        self.current_residue = None;
        self
    }

    pub fn start_chain(&mut self, name: &str) -> Result<&mut Self, BuildError> {
        let chain_id = self
            .current_frame
            .and_then(|frame| self.complex.add_chain(frame, name))
            .ok_or(BuildError::NoCurrentMolecule)?;
        self.current_chain = Some(chain_id);
        self.current_residue = None;
        Ok(self)
    }

    pub fn start_residue(&mut self, number: isize, name: &str) -> Result<&mut Self, BuildError> {
        let residue_id = self
            .current_chain
            .and_then(|chain_id| self.complex.add_residue(chain_id, number, name))
            .ok_or(BuildError::NoCurrentChain)?;
        self.current_residue = Some(residue_id);
        Ok(self)
    }

    pub fn add_atom(
        &mut self,
        index: usize,
        name: &str,
        position: Point3<f64>,
    ) -> Result<&mut Self, BuildError> {
        self.push_atom(index, name, position, false)
    }

    pub fn add_selected_atom(
        &mut self,
        index: usize,
        name: &str,
        position: Point3<f64>,
    ) -> Result<&mut Self, BuildError> {
        self.push_atom(index, name, position, true)
    }

    fn push_atom(
        &mut self,
        index: usize,
        name: &str,
        position: Point3<f64>,
        selected: bool,
    ) -> Result<&mut Self, BuildError> {
        let missing = || BuildError::NoCurrentResidue {
            atom_name: name.to_string(),
        };
        let residue_id = self.current_residue.ok_or_else(missing)?;

        let mut atom = Atom::new(index, name, residue_id, position);
        atom.selected = selected;
        self.complex
            .add_atom_to_residue(residue_id, atom)
            .ok_or_else(missing)?;
        Ok(self)
    }

    pub fn build(self) -> Complex {
        self.complex
    }
}
