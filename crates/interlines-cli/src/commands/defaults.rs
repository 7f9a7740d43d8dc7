use crate::error::Result;
use interlines::core::settings::InteractionSettings;
use tracing::debug;

pub fn run() -> Result<()> {
    let settings = InteractionSettings::defaults();
    debug!(kinds = settings.len(), "Rendering built-in interaction settings.");
    print!("{}", settings.to_toml_string()?);
    Ok(())
}
