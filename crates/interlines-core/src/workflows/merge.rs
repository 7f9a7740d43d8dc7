use super::error::WorkflowError;
use crate::core::models::complex::Complex;
use crate::core::models::ids::ResidueId;
use crate::core::utils::geometry::reframe;
use nalgebra::Isometry3;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// The complex others are aligned onto, captured by value so it may also be
/// one of the complexes being merged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignReference {
    pub index: Option<usize>,
    pub transform: Isometry3<f64>,
}

impl AlignReference {
    pub fn of(complex: &Complex) -> Self {
        Self {
            index: complex.index,
            transform: complex.transform,
        }
    }

    /// Whether `complex` is the reference itself. Complexes without a host
    /// index never are.
    pub fn is(&self, complex: &Complex) -> bool {
        self.index.is_some() && complex.index == self.index
    }
}

/// Spatially aligns one complex onto a reference, in place.
pub trait Aligner {
    fn align(&self, complex: &mut Complex, reference: &AlignReference);
}

/// Re-expresses a complex's atom coordinates in the reference's local frame and
/// adopts the reference transform, leaving every atom where it was in the
/// workspace.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameAligner;

impl Aligner for FrameAligner {
    fn align(&self, complex: &mut Complex, reference: &AlignReference) {
        let into_reference = reframe(&complex.transform, &reference.transform);
        for (_, atom) in complex.atoms_iter_mut() {
            atom.position = into_reference * atom.position;
        }
        complex.transform = reference.transform;
    }
}

/// Copies the residues of `complex`'s displayed frame that are in `residues`
/// into a new single-frame complex.
///
/// Chains keep their names and are only created when they contribute at least
/// one residue. Name and transform are carried over; the copy has no host index.
pub fn extract_residues(
    complex: &Complex,
    residues: &HashSet<ResidueId>,
    name: Option<&str>,
) -> Complex {
    let mut extracted = Complex::new(name.unwrap_or(&complex.name));
    extracted.transform = complex.transform;
    let frame = extracted.add_molecule(&complex.name);

    for (chain_id, chain) in complex.molecule_chains(complex.current_frame()) {
        if !chain.residues().iter().any(|id| residues.contains(id)) {
            continue;
        }
        if extracted
            .graft_chain(frame, complex, chain_id, |id| residues.contains(&id))
            .is_none()
        {
            warn!(chain = %chain.name, "Failed to copy chain while extracting residues.");
        }
    }
    extracted
}

/// Merges several complexes into one single-frame complex.
pub struct ComplexMerger<A: Aligner = FrameAligner> {
    aligner: A,
    name: String,
}

impl Default for ComplexMerger<FrameAligner> {
    fn default() -> Self {
        Self::new(FrameAligner)
    }
}

impl<A: Aligner> ComplexMerger<A> {
    pub fn new(aligner: A) -> Self {
        Self {
            aligner,
            name: "Merged".to_string(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Aligns every complex onto `reference`, then copies their chains, in input
    /// order, into one new molecule.
    ///
    /// With `selected_only`, complexes other than the reference contribute only
    /// the residues of their displayed frame holding at least one selected atom.
    /// Inputs are changed by the alignment only. The merged complex adopts the
    /// reference transform and has no host index. If any input lacks its current
    /// frame, nothing is aligned and `FrameNotFound` is returned.
    #[instrument(skip_all, name = "merge_complexes", fields(count = complexes.len()))]
    pub fn merge(
        &self,
        complexes: &mut [Complex],
        reference: &AlignReference,
        selected_only: bool,
    ) -> Result<Complex, WorkflowError> {
        let mut merged = Complex::new(&self.name);
        merged.transform = reference.transform;
        let frame = merged.add_molecule(&self.name);

        // Every input must be checked before any of them is aligned.
        if let Some(missing) = complexes.iter().find(|c| c.current_molecule().is_none()) {
            return Err(WorkflowError::FrameNotFound {
                complex: missing.name.clone(),
                frame: missing.current_frame(),
            });
        }

        for complex in complexes.iter_mut() {
            self.aligner.align(complex, reference);
            let source_frame = complex.current_frame();

            if selected_only && !reference.is(complex) {
                let selected: HashSet<ResidueId> = complex
                    .molecule_chains(source_frame)
                    .flat_map(|(_, chain)| chain.residues().iter().copied())
                    .filter(|&id| complex.residue_has_selected_atom(id))
                    .collect();
                debug!(complex = %complex.name, residues = selected.len(), "Extracting selected residues.");
                let extracted = extract_residues(complex, &selected, None);
                graft_frame(&mut merged, frame, &extracted, 0);
            } else {
                graft_frame(&mut merged, frame, complex, source_frame);
            }
        }

        info!(
            chains = merged.molecule_chains(frame).count(),
            atoms = merged.molecule_atoms(frame).count(),
            "Merged complexes."
        );
        Ok(merged)
    }
}

/// Merges with [`FrameAligner`].
pub fn merge_complexes(
    complexes: &mut [Complex],
    reference: &AlignReference,
    selected_only: bool,
) -> Result<Complex, WorkflowError> {
    ComplexMerger::<FrameAligner>::default().merge(complexes, reference, selected_only)
}

fn graft_frame(merged: &mut Complex, frame: usize, source: &Complex, source_frame: usize) {
    for (chain_id, chain) in source.molecule_chains(source_frame) {
        if merged.graft_chain(frame, source, chain_id, |_| true).is_none() {
            warn!(chain = %chain.name, "Failed to copy chain into merged complex.");
        }
    }
}
