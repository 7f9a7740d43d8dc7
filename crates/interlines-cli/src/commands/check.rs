use crate::cli::CheckArgs;
use crate::config::{load_settings, missing_kinds};
use crate::error::{CliError, Result};
use interlines::core::interactions::kind::InteractionKind;
use interlines::core::settings::InteractionSettings;
use tracing::{info, warn};

pub fn run(args: CheckArgs) -> Result<()> {
    let settings = load_settings(&args.path, !args.no_defaults)?;
    print!("{}", render_report(&settings));

    let missing = missing_kinds(&settings);
    if !missing.is_empty() {
        warn!(count = missing.len(), "Settings do not cover every interaction kind.");
        return Err(CliError::MissingKinds(missing));
    }

    info!("All {} interaction kinds are configured.", InteractionKind::ALL.len());
    println!("\n✅ {:?} is valid.", args.path);
    Ok(())
}

/// One row per kind: name, visibility and hex color, or `missing`.
fn render_report(settings: &InteractionSettings) -> String {
    let mut report = String::new();
    for kind in InteractionKind::ALL {
        let row = match settings.get(kind) {
            Some(line) => format!(
                "{:<18} {:<7} {}",
                kind.name(),
                if line.visible { "shown" } else { "hidden" },
                line.color().to_hex()
            ),
            None => format!("{:<18} missing", kind.name()),
        };
        report.push_str(&row);
        report.push('\n');
    }
    report
}
