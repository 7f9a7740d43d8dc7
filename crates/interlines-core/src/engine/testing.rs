//! A recording in-memory host for engine tests.

use super::host::{HostError, InteractionHost, ShapeHost, StreamType, WritingStream};
use crate::core::interactions::label::Label;
use crate::core::interactions::line::{EntityIndex, InteractionLine, ShapeLine};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    UploadLines(Vec<ShapeLine>),
    DestroyLines(Vec<ShapeLine>),
    UploadLabels(Vec<Label>),
    DestroyLabels(Vec<Label>),
    CreateStream(Vec<EntityIndex>),
    UpdateStream {
        indices: Vec<EntityIndex>,
        values: Vec<u8>,
    },
    DestroyStream(Vec<EntityIndex>),
    FetchInteractions(Option<Vec<usize>>),
    UploadInteractions(Vec<InteractionLine>),
    DestroyInteractions(Vec<InteractionLine>),
}

#[derive(Debug, Default)]
struct Shared {
    calls: RefCell<Vec<HostCall>>,
    fail_stream_updates: Cell<bool>,
}

impl Shared {
    fn record(&self, call: HostCall) {
        self.calls.borrow_mut().push(call);
    }
}

#[derive(Debug)]
pub struct MockStream {
    indices: Vec<EntityIndex>,
    shared: Rc<Shared>,
}

impl WritingStream for MockStream {
    fn indices(&self) -> &[EntityIndex] {
        &self.indices
    }

    async fn update(&mut self, values: &[u8]) -> Result<(), HostError> {
        if self.shared.fail_stream_updates.get() {
            return Err(HostError::StreamClosed);
        }
        self.shared.record(HostCall::UpdateStream {
            indices: self.indices.clone(),
            values: values.to_vec(),
        });
        Ok(())
    }

    fn destroy(self) {
        self.shared.record(HostCall::DestroyStream(self.indices));
    }
}

/// Assigns sequential indices starting at 100 and records every call.
#[derive(Debug)]
pub struct MockHost {
    shared: Rc<Shared>,
    next_index: Cell<usize>,
    refuse_streams: Cell<bool>,
    interactions: RefCell<Vec<InteractionLine>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            shared: Rc::default(),
            next_index: Cell::new(100),
            refuse_streams: Cell::new(false),
            interactions: RefCell::default(),
        }
    }
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `create_writing_stream` return `Ok(None)`.
    pub fn refuse_streams(&self, refuse: bool) {
        self.refuse_streams.set(refuse);
    }

    pub fn fail_stream_updates(&self, fail: bool) {
        self.shared.fail_stream_updates.set(fail);
    }

    /// Seeds the interactions served by `fetch_interactions`, assigning indices.
    pub fn store_interactions(&self, lines: Vec<InteractionLine>) {
        let mut stored = self.interactions.borrow_mut();
        for mut line in lines {
            line.index.get_or_insert_with(|| self.allocate());
            stored.push(line);
        }
    }

    pub fn stored_interactions(&self) -> Vec<InteractionLine> {
        self.interactions.borrow().clone()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.shared.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.shared.calls.borrow_mut().clear();
    }

    pub fn created_streams(&self) -> Vec<Vec<EntityIndex>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::CreateStream(indices) => Some(indices),
                _ => None,
            })
            .collect()
    }

    pub fn destroyed_streams(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, HostCall::DestroyStream(_)))
            .count()
    }

    pub fn stream_updates(&self) -> Vec<(Vec<EntityIndex>, Vec<u8>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::UpdateStream { indices, values } => Some((indices, values)),
                _ => None,
            })
            .collect()
    }

    fn allocate(&self) -> EntityIndex {
        let index = self.next_index.get();
        self.next_index.set(index + 1);
        EntityIndex(index)
    }

    fn assign(&self, existing: impl Iterator<Item = Option<EntityIndex>>) -> Vec<EntityIndex> {
        existing
            .map(|index| index.unwrap_or_else(|| self.allocate()))
            .collect()
    }
}

impl ShapeHost for MockHost {
    type Stream = MockStream;

    async fn upload_lines(&self, lines: &[ShapeLine]) -> Result<Vec<EntityIndex>, HostError> {
        self.shared.record(HostCall::UploadLines(lines.to_vec()));
        Ok(self.assign(lines.iter().map(|line| line.index)))
    }

    async fn destroy_lines(&self, lines: &[ShapeLine]) -> Result<(), HostError> {
        self.shared.record(HostCall::DestroyLines(lines.to_vec()));
        Ok(())
    }

    async fn upload_labels(&self, labels: &[Label]) -> Result<Vec<EntityIndex>, HostError> {
        self.shared.record(HostCall::UploadLabels(labels.to_vec()));
        Ok(self.assign(labels.iter().map(|label| label.index)))
    }

    async fn destroy_labels(&self, labels: &[Label]) -> Result<(), HostError> {
        self.shared.record(HostCall::DestroyLabels(labels.to_vec()));
        Ok(())
    }

    async fn create_writing_stream(
        &self,
        indices: &[EntityIndex],
        _stream_type: StreamType,
    ) -> Result<Option<MockStream>, HostError> {
        self.shared.record(HostCall::CreateStream(indices.to_vec()));
        if self.refuse_streams.get() {
            return Ok(None);
        }
        Ok(Some(MockStream {
            indices: indices.to_vec(),
            shared: Rc::clone(&self.shared),
        }))
    }
}

impl InteractionHost for MockHost {
    async fn fetch_interactions(
        &self,
        molecules: Option<&[usize]>,
    ) -> Result<Vec<InteractionLine>, HostError> {
        self.shared
            .record(HostCall::FetchInteractions(molecules.map(<[usize]>::to_vec)));
        Ok(self.stored_interactions())
    }

    async fn upload_interactions(
        &self,
        lines: &[InteractionLine],
    ) -> Result<Vec<EntityIndex>, HostError> {
        self.shared.record(HostCall::UploadInteractions(lines.to_vec()));
        let indices = self.assign(lines.iter().map(|line| line.index));
        let mut stored = self.interactions.borrow_mut();
        for (line, index) in lines.iter().zip(&indices) {
            let mut line = line.clone();
            line.index = Some(*index);
            match stored.iter_mut().find(|s| s.index == line.index) {
                Some(slot) => *slot = line,
                None => stored.push(line),
            }
        }
        Ok(indices)
    }

    async fn destroy_interactions(&self, lines: &[InteractionLine]) -> Result<(), HostError> {
        self.shared.record(HostCall::DestroyInteractions(lines.to_vec()));
        self.interactions
            .borrow_mut()
            .retain(|stored| !lines.iter().any(|line| line.index == stored.index));
        Ok(())
    }
}
