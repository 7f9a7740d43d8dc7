use super::cache::PairCache;
use super::error::LineError;
use super::frame::FrameMembership;
use super::host::{ShapeHost, StreamType, WritingStream};
use crate::core::interactions::line::{Color, EntityIndex, ShapeLine};
use crate::core::models::complex::Complex;
use crate::core::settings::InteractionSettings;
use tracing::{debug, error, instrument, warn};

/// Why an update pass did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoComplexes,
    NoLines,
}

/// What one `update_interaction_lines` pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Skipped(SkipReason),
    /// A color buffer covering `lines` shapes was pushed through the stream.
    Streamed {
        lines: usize,
        in_frame: usize,
        out_of_frame: usize,
    },
    /// `changed` interactions had their visibility flipped and were re-uploaded.
    Uploaded { changed: usize },
}

/// Keeps one writing stream bound to exactly the uploaded lines of a cache and
/// pushes their colors through it.
///
/// The stream is an owned optional handle. Any structural change to the cache
/// must call [`invalidate`](Self::invalidate), after which the next update opens
/// a fresh stream against the current index list.
#[derive(Debug)]
pub struct StreamUpdater<S: WritingStream> {
    stream: Option<S>,
    stream_type: StreamType,
}

impl<S: WritingStream> Default for StreamUpdater<S> {
    fn default() -> Self {
        Self {
            stream: None,
            stream_type: StreamType::ShapeColor,
        }
    }
}

impl<S: WritingStream> StreamUpdater<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// Indices the live stream is bound to, if there is one.
    pub fn bound_indices(&self) -> Option<&[EntityIndex]> {
        self.stream.as_ref().map(|stream| stream.indices())
    }

    /// Destroys the live stream. A no-op when there is none.
    pub fn invalidate(&mut self) {
        if let Some(stream) = self.stream.take() {
            debug!(bound = stream.indices().len(), "Destroying writing stream.");
            stream.destroy();
        }
    }

    /// Recolors every uploaded line in `cache` for the frames currently shown in
    /// `complexes` and pushes the colors in one buffer.
    ///
    /// A line is shown (alpha 255) only if its kind is configured visible and all
    /// of its atoms are in a displayed frame; otherwise its alpha is 0. Colors and
    /// visibility are written back into the cache only after the push succeeded.
    #[instrument(skip_all, name = "stream_update")]
    pub async fn update<H>(
        &mut self,
        host: &H,
        cache: &mut PairCache<ShapeLine>,
        settings: &InteractionSettings,
        complexes: &[&Complex],
    ) -> Result<UpdateOutcome, LineError>
    where
        H: ShapeHost<Stream = S>,
    {
        if complexes.is_empty() {
            warn!("No complexes to update, returning.");
            return Ok(UpdateOutcome::Skipped(SkipReason::NoComplexes));
        }

        let indices: Vec<EntityIndex> = cache.values().filter_map(|line| line.index).collect();
        if indices.is_empty() {
            warn!("No uploaded interaction lines to update, returning.");
            return Ok(UpdateOutcome::Skipped(SkipReason::NoLines));
        }

        // Nothing is pushed or written back until every line has been colored, so
        // a missing kind leaves both the stream and the cache untouched.
        let membership = FrameMembership::from_complexes(complexes.iter().copied());
        let mut values = Vec::with_capacity(indices.len() * self.stream_type.stride());
        let mut recolored: Vec<(Color, bool)> = Vec::with_capacity(indices.len());
        let mut in_frame = 0;

        for line in cache.values().filter(|line| line.index.is_some()) {
            let line_settings = settings
                .get(line.kind)
                .ok_or(LineError::MissingSettings { kind: line.kind })?;
            let line_in_frame = membership.line_in_frame(line);
            if line_in_frame {
                in_frame += 1;
            }

            let visible = line_settings.visible && line_in_frame;
            let color = line_settings
                .color()
                .with_alpha(if visible { 255 } else { 0 });
            values.extend_from_slice(&color.rgba());
            recolored.push((color, visible));
        }

        let stream = self.ensure_stream(host, &indices).await?;
        stream.update(&values).await?;

        let pushed = recolored.len();
        let uploaded = cache.values_mut().filter(|line| line.index.is_some());
        for (line, (color, visible)) in uploaded.zip(recolored) {
            line.color = color;
            line.visible = visible;
        }

        let out_of_frame = pushed - in_frame;
        debug!(lines = pushed, in_frame, out_of_frame, "Pushed line colors.");
        Ok(UpdateOutcome::Streamed {
            lines: pushed,
            in_frame,
            out_of_frame,
        })
    }

    /// Returns a live stream bound to exactly `indices`, replacing a stale one.
    async fn ensure_stream<H>(&mut self, host: &H, indices: &[EntityIndex]) -> Result<&mut S, LineError>
    where
        H: ShapeHost<Stream = S>,
    {
        if self
            .stream
            .as_ref()
            .is_some_and(|stream| stream.indices() != indices)
        {
            warn!("Writing stream is bound to a stale line set, recreating.");
            self.invalidate();
        }

        if self.stream.is_none() {
            debug!(lines = indices.len(), "Recreating writing stream.");
            let created = match host.create_writing_stream(indices, self.stream_type).await {
                Ok(created) => created,
                Err(e) => {
                    error!(error = %e, "Failed to create writing stream.");
                    return Err(e.into());
                }
            };
            match created {
                Some(stream) => self.stream = Some(stream),
                None => {
                    error!("Failed to create writing stream.");
                    return Err(LineError::StreamUnavailable);
                }
            }
        }

        self.stream.as_mut().ok_or(LineError::StreamUnavailable)
    }
}

impl<S: WritingStream> Drop for StreamUpdater<S> {
    fn drop(&mut self) {
        self.invalidate();
    }
}
