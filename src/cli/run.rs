//! Run command implementation - replays a script file.

use super::output::format_transcript;
use super::{CliError, EncounterOverrides, OutputFormat};
use standoff::Script;
use std::io::{self, IsTerminal};
use std::path::Path;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the script cannot be loaded or an action is refused.
pub(crate) fn execute(
    path: &Path,
    overrides: EncounterOverrides,
    format: OutputFormat,
) -> Result<(), CliError> {
    let mut script = Script::load(path)
        .map_err(|e| CliError::new(format!("Failed to load {}: {e}", path.display())))?;
    script.config = overrides.apply(script.config);

    let transcript = script.replay()?;

    match format {
        OutputFormat::Text => {
            print!("{}", format_transcript(&transcript, io::stdout().is_terminal()));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&transcript)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
