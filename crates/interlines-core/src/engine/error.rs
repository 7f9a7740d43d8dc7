use thiserror::Error;

use super::host::HostError;
use crate::core::interactions::kind::InteractionKind;

#[derive(Debug, Error)]
pub enum LineError {
    #[error("Expected {expected}, received {found}")]
    UnexpectedLine {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Host call failed: {source}")]
    Host {
        #[from]
        source: HostError,
    },

    #[error("No display settings for interaction kind '{kind}'")]
    MissingSettings { kind: InteractionKind },

    #[error("Host did not open a writing stream")]
    StreamUnavailable,
}
