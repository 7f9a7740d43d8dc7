use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::molecule::Molecule;
use super::residue::Residue;
use nalgebra::Isometry3;
use slotmap::SlotMap;

/// A structure entity in the scene: a rigidly placed set of molecules (frames),
/// exactly one of which is displayed at a time.
///
/// Atoms, residues and chains live in slot maps shared by every frame, and each
/// [`Molecule`] lists the chains that make up that frame. Atom positions are
/// expressed in the complex's local frame; `transform` places that frame in the
/// workspace.
#[derive(Debug, Clone, Default)]
pub struct Complex {
    /// Host-assigned complex index, `None` for complexes built locally.
    pub index: Option<usize>,
    /// Display name of the complex.
    pub name: String,
    /// Local-to-workspace rigid transform.
    pub transform: Isometry3<f64>,
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues using a slot map for efficient ID management.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains using a slot map for efficient ID management.
    chains: SlotMap<ChainId, Chain>,
    /// Ordered frames of this complex.
    molecules: Vec<Molecule>,
    /// Index into `molecules` of the frame currently displayed.
    current_frame: usize,
}

impl Complex {
    /// Creates a new, empty complex with an identity transform.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Creates a new, empty complex that already carries a host index.
    pub fn with_index(index: usize, name: &str) -> Self {
        Self {
            index: Some(index),
            ..Self::new(name)
        }
    }

    /// Retrieves an immutable reference to an atom by its ID.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Returns an iterator over every atom of every frame.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Returns a mutable iterator over every atom of every frame.
    pub fn atoms_iter_mut(&mut self) -> impl Iterator<Item = (AtomId, &mut Atom)> {
        self.atoms.iter_mut()
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chains.iter()
    }

    /// Returns the frames of this complex in order.
    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    pub fn molecule_mut(&mut self, frame: usize) -> Option<&mut Molecule> {
        self.molecules.get_mut(frame)
    }

    /// Returns the index of the frame currently displayed.
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Switches the displayed frame.
    ///
    /// # Return
    ///
    /// Returns `None` (and leaves the current frame unchanged) if `frame` is out of range.
    pub fn set_current_frame(&mut self, frame: usize) -> Option<()> {
        if frame >= self.molecules.len() {
            return None;
        }
        self.current_frame = frame;
        Some(())
    }

    /// Returns the molecule of the frame currently displayed, if any.
    pub fn current_molecule(&self) -> Option<&Molecule> {
        self.molecules.get(self.current_frame)
    }

    /// Appends a new, empty frame and returns its index.
    pub fn add_molecule(&mut self, name: &str) -> usize {
        self.molecules.push(Molecule::new(name));
        self.molecules.len() - 1
    }

    /// Appends a new chain to the given frame.
    ///
    /// Chain names are not required to be unique: merged complexes routinely
    /// carry several chains with the same name.
    ///
    /// # Return
    ///
    /// Returns `Some(ChainId)` if successful, otherwise `None` (the frame doesn't exist).
    pub fn add_chain(&mut self, frame: usize, name: &str) -> Option<ChainId> {
        let molecule = self.molecules.get_mut(frame)?;
        let chain_id = self.chains.insert(Chain::new(name));
        molecule.chains.push(chain_id);
        Some(chain_id)
    }

    /// Appends a new residue to a chain.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (the chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let residue_id = self
            .residues
            .insert(Residue::new(residue_number, name, chain_id));
        chain.residues.push(residue_id);
        Some(residue_id)
    }

    /// Adds an atom to a specific residue, re-parenting it onto that residue.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (the residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }
        atom.residue_id = residue_id;
        let atom_id = self.atoms.insert(atom);
        self.residues.get_mut(residue_id)?.add_atom(atom_id);
        Some(atom_id)
    }

    /// Iterates the chains of one frame in order.
    pub fn molecule_chains(&self, frame: usize) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.molecules
            .get(frame)
            .into_iter()
            .flat_map(|molecule| molecule.chains.iter())
            .filter_map(|&chain_id| self.chains.get(chain_id).map(|chain| (chain_id, chain)))
    }

    /// Iterates the atoms of one chain in residue order.
    pub fn chain_atoms(&self, chain_id: ChainId) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.chains
            .get(chain_id)
            .into_iter()
            .flat_map(|chain| chain.residues.iter())
            .filter_map(|&residue_id| self.residues.get(residue_id))
            .flat_map(|residue| residue.atoms.iter())
            .filter_map(|&atom_id| self.atoms.get(atom_id).map(|atom| (atom_id, atom)))
    }

    /// Iterates the atoms of one frame in chain, residue, atom order.
    pub fn molecule_atoms(&self, frame: usize) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.molecule_chains(frame)
            .flat_map(move |(chain_id, _)| self.chain_atoms(chain_id))
    }

    /// Iterates the atoms of the frame currently displayed.
    pub fn current_molecule_atoms(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.molecule_atoms(self.current_frame)
    }

    /// Whether any atom of the residue is currently selected.
    pub fn residue_has_selected_atom(&self, residue_id: ResidueId) -> bool {
        self.residues.get(residue_id).is_some_and(|residue| {
            residue
                .atoms
                .iter()
                .filter_map(|&atom_id| self.atoms.get(atom_id))
                .any(|atom| atom.selected)
        })
    }

    /// Deep-copies a chain of `source` onto one of this complex's frames.
    ///
    /// Only residues for which `keep` returns `true` are copied. Copied atoms keep
    /// their host index, local position and selection state.
    ///
    /// # Return
    ///
    /// Returns the ID of the new chain, or `None` if the frame or the source chain
    /// doesn't exist.
    pub fn graft_chain<F>(
        &mut self,
        frame: usize,
        source: &Complex,
        chain_id: ChainId,
        mut keep: F,
    ) -> Option<ChainId>
    where
        F: FnMut(ResidueId) -> bool,
    {
        let source_chain = source.chain(chain_id)?;
        let new_chain_id = self.add_chain(frame, &source_chain.name)?;

        for &residue_id in source_chain.residues() {
            if !keep(residue_id) {
                continue;
            }
            let Some(residue) = source.residue(residue_id) else {
                continue;
            };
            let new_residue_id = self.add_residue(new_chain_id, residue.number, &residue.name)?;
            for atom in residue.atoms().iter().filter_map(|&id| source.atom(id)) {
                self.add_atom_to_residue(new_residue_id, atom.clone())?;
            }
        }

        Some(new_chain_id)
    }
}
