use super::{LineManager, unexpected};
use crate::core::interactions::kind::InteractionKind;
use crate::core::interactions::line::{EntityIndex, InteractionLine, Line};
use crate::core::interactions::structure::StructureRef;
use crate::core::models::complex::Complex;
use crate::core::settings::{InteractionSettings, LineSettings};
use crate::engine::error::LineError;
use crate::engine::host::{InteractionHost, expect_index_count};
use crate::engine::stream::UpdateOutcome;
use std::marker::PhantomData;
use tracing::{debug, instrument};

/// Interaction lines stored by the host and queried back on demand.
///
/// Nothing is cached locally; adding a line only checks its variant.
pub struct InteractionLineManager<H> {
    host: PhantomData<fn(&H)>,
}

impl<H> Default for InteractionLineManager<H> {
    fn default() -> Self {
        Self { host: PhantomData }
    }
}

impl<H: InteractionHost> InteractionLineManager<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches stored lines, restricted to the given molecule indices if any.
    pub async fn all_lines(
        &self,
        host: &H,
        molecules: Option<&[usize]>,
    ) -> Result<Vec<InteractionLine>, LineError> {
        Ok(host.fetch_interactions(molecules).await?)
    }

    /// Filters `candidates` down to the lines connecting `s1` and `s2`.
    ///
    /// Each structure must be wholly contained in one of the line's endpoints,
    /// in either order, and its conformer must equal the conformer recorded on
    /// that endpoint.
    pub fn get_lines_for_structure_pair<'a>(
        &self,
        s1: &StructureRef,
        s2: &StructureRef,
        candidates: &'a [InteractionLine],
    ) -> Vec<&'a InteractionLine> {
        candidates
            .iter()
            .filter(|line| connects(line, s1, s2))
            .collect()
    }
}

/// Conformer of the endpoint containing `structure`, preferring the first
/// endpoint, or `None` if neither contains it.
fn matched_conformer(line: &InteractionLine, structure: &StructureRef) -> Option<Option<usize>> {
    let atoms = structure.atom_indices();
    if line.atom1.contains_all(atoms) {
        Some(line.atom1.conformer)
    } else if line.atom2.contains_all(atoms) {
        Some(line.atom2.conformer)
    } else {
        None
    }
}

fn connects(line: &InteractionLine, s1: &StructureRef, s2: &StructureRef) -> bool {
    let (Some(conformer1), Some(conformer2)) =
        (matched_conformer(line, s1), matched_conformer(line, s2))
    else {
        return false;
    };
    conformer1 == s1.conformer() && conformer2 == s2.conformer()
}

impl<H: InteractionHost> LineManager for InteractionLineManager<H> {
    type Host = H;
    type Entity = InteractionLine;

    fn draw_interaction_line(
        s1: &StructureRef,
        s2: &StructureRef,
        kind: InteractionKind,
        settings: &LineSettings,
    ) -> InteractionLine {
        let mut line = InteractionLine::new(kind, s1.endpoint(), s2.endpoint());
        line.visible = settings.visible;
        line
    }

    /// Lines live on the host, so a correctly typed line changes nothing here.
    fn add_line(&mut self, line: Line) -> Result<bool, LineError> {
        match line {
            Line::Interaction(_) => Ok(false),
            other => Err(unexpected("InteractionLine", &other)),
        }
    }

    async fn upload(
        &mut self,
        host: &H,
        lines: &[InteractionLine],
    ) -> Result<Vec<EntityIndex>, LineError> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }
        Ok(expect_index_count(
            lines.len(),
            host.upload_interactions(lines).await?,
        )?)
    }

    async fn destroy_lines(&mut self, host: &H, lines: &[InteractionLine]) -> Result<(), LineError> {
        if lines.is_empty() {
            return Ok(());
        }
        Ok(host.destroy_interactions(lines).await?)
    }

    /// Flips the visibility of lines whose kind setting disagrees with them and
    /// re-uploads only those.
    ///
    /// With complexes given, only lines on their current molecules are fetched.
    /// Frame membership is the host's concern here, so only the kind setting counts.
    #[instrument(skip_all, name = "interaction_update")]
    async fn update_interaction_lines(
        &mut self,
        host: &H,
        settings: &InteractionSettings,
        complexes: &[&Complex],
    ) -> Result<UpdateOutcome, LineError> {
        let molecules: Option<Vec<usize>> = (!complexes.is_empty()).then(|| {
            complexes
                .iter()
                .filter_map(|complex| complex.current_molecule())
                .filter_map(|molecule| molecule.index)
                .collect()
        });
        let lines = self.all_lines(host, molecules.as_deref()).await?;

        let mut changed = Vec::new();
        for mut line in lines {
            let visible = settings
                .get(line.kind)
                .ok_or(LineError::MissingSettings { kind: line.kind })?
                .visible;
            if line.visible != visible {
                line.visible = visible;
                changed.push(line);
            }
        }

        debug!(count = changed.len(), "Updating interaction lines.");
        self.upload(host, &changed).await?;
        Ok(UpdateOutcome::Uploaded {
            changed: changed.len(),
        })
    }
}
