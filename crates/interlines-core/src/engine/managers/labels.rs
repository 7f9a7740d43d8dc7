use crate::core::interactions::label::Label;
use crate::core::interactions::line::EntityIndex;
use crate::core::interactions::pair_key::PairKey;
use crate::core::interactions::structure::StructureRef;
use crate::engine::error::LineError;
use crate::engine::host::{ShapeHost, expect_index_count};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// One label per structure pair. Adding a label for a pair replaces the old one.
#[derive(Debug, Clone, Default)]
pub struct LabelManager {
    labels: BTreeMap<PairKey, Label>,
}

impl LabelManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `label` for the pair, returning the label it replaced.
    ///
    /// A replaced label is not destroyed on the host.
    pub fn add_label(&mut self, label: Label, s1: &StructureRef, s2: &StructureRef) -> Option<Label> {
        self.labels.insert(PairKey::from_structures(s1, s2), label)
    }

    pub fn get_label(&self, s1: &StructureRef, s2: &StructureRef) -> Option<&Label> {
        self.labels.get(&PairKey::from_structures(s1, s2))
    }

    /// Forgets the pair's label without destroying it on the host, and returns it
    /// so the caller can destroy it later.
    pub fn remove_label_for_structure_pair(
        &mut self,
        s1: &StructureRef,
        s2: &StructureRef,
    ) -> Option<Label> {
        self.labels.remove(&PairKey::from_structures(s1, s2))
    }

    /// Labels in ascending pair-key order.
    pub fn all_labels(&self) -> impl Iterator<Item = &Label> {
        self.labels.values()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Uploads labels that have no host index yet and records the indices.
    pub async fn upload<H: ShapeHost>(&mut self, host: &H) -> Result<Vec<EntityIndex>, LineError> {
        let pending: Vec<&mut Label> = self
            .labels
            .values_mut()
            .filter(|label| label.index.is_none())
            .collect();
        if pending.is_empty() {
            return Ok(Vec::new());
        }

        let batch: Vec<Label> = pending.iter().map(|label| (**label).clone()).collect();
        let indices = expect_index_count(batch.len(), host.upload_labels(&batch).await?)?;
        for (label, &index) in pending.into_iter().zip(&indices) {
            label.index = Some(index);
        }
        debug!(count = indices.len(), "Uploaded labels.");
        Ok(indices)
    }

    /// Destroys every label on the host, then forgets them all.
    pub async fn clear<H: ShapeHost>(&mut self, host: &H) -> Result<(), LineError> {
        let labels: Vec<Label> = self.labels.values().cloned().collect();
        if !labels.is_empty() {
            host.destroy_labels(&labels).await?;
        }
        self.labels.clear();
        info!(count = labels.len(), "Cleared labels.");
        Ok(())
    }
}
