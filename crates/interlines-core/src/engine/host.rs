//! The contract the engine requires from the rendering host.
//!
//! Every call that reaches the host is an `async fn`; callers await each one
//! before issuing the next state-mutating call. Implementations are plain
//! generic parameters of the managers, so no boxing is involved.

#![allow(async_fn_in_trait)]

use crate::core::interactions::label::Label;
use crate::core::interactions::line::{EntityIndex, InteractionLine, ShapeLine};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Host request '{operation}' failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    #[error("Host returned {returned} indices for {expected} uploaded entities")]
    IndexCountMismatch { expected: usize, returned: usize },

    #[error("Writing stream is closed")]
    StreamClosed,
}

/// Content pushed through a writing stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamType {
    /// Four bytes (RGBA) per bound shape.
    ShapeColor,
}

impl StreamType {
    /// Bytes each bound entity contributes to one update buffer.
    pub const fn stride(&self) -> usize {
        match self {
            StreamType::ShapeColor => 4,
        }
    }
}

/// A host channel bound, at creation, to a fixed list of entity indices.
pub trait WritingStream {
    /// The indices the stream was opened for, in buffer order.
    fn indices(&self) -> &[EntityIndex];

    /// Pushes one value buffer covering every bound index.
    async fn update(&mut self, values: &[u8]) -> Result<(), HostError>;

    /// Closes the stream on the host. Consumes the handle, so a stream can only
    /// be destroyed once.
    fn destroy(self);
}

/// Host side of shape-backed lines and labels.
pub trait ShapeHost {
    type Stream: WritingStream;

    /// Uploads `lines` and returns their host indices, in input order.
    async fn upload_lines(&self, lines: &[ShapeLine]) -> Result<Vec<EntityIndex>, HostError>;

    async fn destroy_lines(&self, lines: &[ShapeLine]) -> Result<(), HostError>;

    /// Uploads `labels` and returns their host indices, in input order.
    async fn upload_labels(&self, labels: &[Label]) -> Result<Vec<EntityIndex>, HostError>;

    async fn destroy_labels(&self, labels: &[Label]) -> Result<(), HostError>;

    /// Opens a stream bound to `indices`.
    ///
    /// `Ok(None)` is the host declining to open one, which callers treat as a
    /// failed creation.
    async fn create_writing_stream(
        &self,
        indices: &[EntityIndex],
        stream_type: StreamType,
    ) -> Result<Option<Self::Stream>, HostError>;
}

/// Host side of interaction entities, which the host stores and serves back.
pub trait InteractionHost {
    /// Fetches stored interactions, restricted to the given molecule indices
    /// when a filter is supplied.
    async fn fetch_interactions(
        &self,
        molecules: Option<&[usize]>,
    ) -> Result<Vec<InteractionLine>, HostError>;

    /// Uploads (creating or updating) `lines` and returns their host indices.
    async fn upload_interactions(
        &self,
        lines: &[InteractionLine],
    ) -> Result<Vec<EntityIndex>, HostError>;

    async fn destroy_interactions(&self, lines: &[InteractionLine]) -> Result<(), HostError>;
}

/// Checks that an upload returned one index per entity.
pub(crate) fn expect_index_count(
    expected: usize,
    indices: Vec<EntityIndex>,
) -> Result<Vec<EntityIndex>, HostError> {
    if indices.len() == expected {
        Ok(indices)
    } else {
        Err(HostError::IndexCountMismatch {
            expected,
            returned: indices.len(),
        })
    }
}
