use crate::error::{CliError, Result};
use interlines::core::interactions::kind::InteractionKind;
use interlines::core::settings::InteractionSettings;
use std::path::Path;
use tracing::{debug, info};

/// Reads interaction settings from a TOML file.
///
/// With `use_defaults`, the file only needs to name the kinds it changes; the
/// rest come from [`InteractionSettings::defaults`].
pub fn load_settings(path: &Path, use_defaults: bool) -> Result<InteractionSettings> {
    debug!("Reading interaction settings from {:?}", path);
    let content = std::fs::read_to_string(path)?;
    let from_file = InteractionSettings::from_toml_str(&content).map_err(|e| {
        CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        }
    })?;
    info!(kinds = from_file.len(), "Loaded interaction settings file.");

    if use_defaults {
        Ok(InteractionSettings::defaults().overlay(from_file))
    } else {
        Ok(from_file)
    }
}

/// Kinds without settings, in declaration order. Lines of these kinds cannot be
/// recolored.
pub fn missing_kinds(settings: &InteractionSettings) -> Vec<InteractionKind> {
    InteractionKind::ALL
        .into_iter()
        .filter(|&kind| settings.get(kind).is_none())
        .collect()
}
