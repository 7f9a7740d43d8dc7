use interlines::core::interactions::kind::InteractionKind;
use interlines::core::settings::SettingsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to parse file '{path}': {source}")]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No settings for {} interaction kind(s): {}", .0.len(), kind_list(.0))]
    MissingKinds(Vec<InteractionKind>),
}

fn kind_list(kinds: &[InteractionKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.name())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, CliError>;
