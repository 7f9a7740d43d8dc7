use super::error::WorkflowError;
use crate::core::models::atom::Atom;
use crate::core::models::complex::Complex;
use crate::core::models::ids::AtomId;
use kiddo::SquaredEuclidean;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use tracing::{debug, info, instrument};

/// Radius, in Å, used when the caller has no preference.
pub const DEFAULT_SITE_SIZE: f64 = 5.0;

/// Atoms of `target`'s displayed frame within `site_size` of any ligand atom.
///
/// Solvent chains (names starting with `H`) are never part of a site. The result
/// follows the target's chain, residue and atom order and holds no duplicates.
/// Positions are compared in each complex's local coordinates, so the ligand
/// must already be aligned to the target.
#[instrument(skip_all, name = "binding_site")]
pub fn binding_site_atoms<'a, I>(
    target: &Complex,
    ligand_atoms: I,
    site_size: f64,
) -> Result<Vec<AtomId>, WorkflowError>
where
    I: IntoIterator<Item = &'a Atom>,
{
    if !site_size.is_finite() || site_size < 0.0 {
        return Err(WorkflowError::InvalidSiteSize(site_size));
    }
    let frame = target.current_frame();
    if target.current_molecule().is_none() {
        return Err(WorkflowError::FrameNotFound {
            complex: target.name.clone(),
            frame,
        });
    }

    // Tree items are positions in this list, so hits map straight back to ids.
    let (candidates, positions): (Vec<AtomId>, Vec<[f64; 3]>) = target
        .molecule_chains(frame)
        .filter(|(_, chain)| !chain.is_solvent())
        .flat_map(|(chain_id, _)| target.chain_atoms(chain_id))
        .map(|(atom_id, atom)| (atom_id, atom.position_array()))
        .unzip();
    if candidates.is_empty() {
        debug!("Target frame has no non-solvent atoms.");
        return Ok(Vec::new());
    }

    // Planar or grid-snapped targets may put any number of atoms on one axis value.
    let kdtree: ImmutableKdTree<f64, u64, 3, 32> = ImmutableKdTree::new_from_slice(&positions);
    let radius_sq = site_size * site_size;
    // The boundary is inclusive, so a zero radius still matches exact overlaps.
    let query_sq = radius_sq + f64::EPSILON;
    let mut in_site = vec![false; candidates.len()];

    for ligand_atom in ligand_atoms {
        let neighbours =
            kdtree.within_unsorted::<SquaredEuclidean>(&ligand_atom.position_array(), query_sq);
        for neighbour in neighbours.into_iter().filter(|n| n.distance <= radius_sq) {
            if let Some(hit) = in_site.get_mut(neighbour.item as usize) {
                *hit = true;
            }
        }
    }

    let site: Vec<AtomId> = candidates
        .into_iter()
        .zip(in_site)
        .filter_map(|(atom_id, hit)| hit.then_some(atom_id))
        .collect();
    info!(atoms = site.len(), radius = site_size, "Located binding site.");
    Ok(site)
}
