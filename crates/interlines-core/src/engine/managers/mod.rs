//! Line managers: the owners of interaction-line state.
//!
//! Two implementations of [`LineManager`] exist:
//!
//! - [`ShapesLineManager`] caches [`ShapeLine`]s locally, keyed by structure pair,
//!   and streams their colors to the host.
//! - [`InteractionLineManager`] keeps no cache and queries [`InteractionLine`]s
//!   back from the host.
//!
//! [`LabelManager`] tracks one label per structure pair alongside either of them.
//!
//! [`ShapeLine`]: crate::core::interactions::line::ShapeLine
//! [`InteractionLine`]: crate::core::interactions::line::InteractionLine

#![allow(async_fn_in_trait)]

mod labels;
mod remote;
mod shapes;

pub use labels::LabelManager;
pub use remote::InteractionLineManager;
pub use shapes::ShapesLineManager;

use super::error::LineError;
use super::stream::UpdateOutcome;
use crate::core::interactions::kind::InteractionKind;
use crate::core::interactions::line::{EntityIndex, Line, LineEndpoints};
use crate::core::interactions::structure::StructureRef;
use crate::core::models::complex::Complex;
use crate::core::settings::{InteractionSettings, LineSettings};

/// Capabilities shared by every line manager.
pub trait LineManager {
    /// The host the manager talks to.
    type Host;

    /// The line representation the manager owns.
    type Entity: LineEndpoints;

    /// Builds (but does not add or upload) a line connecting `s1` and `s2`.
    fn draw_interaction_line(
        s1: &StructureRef,
        s2: &StructureRef,
        kind: InteractionKind,
        settings: &LineSettings,
    ) -> Self::Entity;

    /// Adds one line.
    ///
    /// Returns whether the manager's state changed, or
    /// [`LineError::UnexpectedLine`] if `line` is the wrong variant.
    fn add_line(&mut self, line: Line) -> Result<bool, LineError>;

    /// Adds lines in order and returns how many changed the manager's state.
    ///
    /// Lines rejected as duplicates do not stop the batch; a wrongly typed line
    /// does, leaving earlier lines added.
    fn add_lines<I>(&mut self, lines: I) -> Result<usize, LineError>
    where
        I: IntoIterator<Item = Line>,
    {
        let mut added = 0;
        for line in lines {
            if self.add_line(line)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Bulk-uploads `lines` and returns their host indices, in input order.
    async fn upload(
        &mut self,
        host: &Self::Host,
        lines: &[Self::Entity],
    ) -> Result<Vec<EntityIndex>, LineError>;

    /// Bulk-destroys `lines` on the host in a single call.
    async fn destroy_lines(
        &mut self,
        host: &Self::Host,
        lines: &[Self::Entity],
    ) -> Result<(), LineError>;

    /// Applies `settings` to every line for the frames shown in `complexes`.
    async fn update_interaction_lines(
        &mut self,
        host: &Self::Host,
        settings: &InteractionSettings,
        complexes: &[&Complex],
    ) -> Result<UpdateOutcome, LineError>;
}

pub(crate) fn unexpected(expected: &'static str, found: &Line) -> LineError {
    LineError::UnexpectedLine {
        expected,
        found: found.variant_name(),
    }
}
