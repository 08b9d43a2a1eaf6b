//! Import and export of all stored documents.

use std::fs;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{DataCommands, OutputFormat};
use crate::error::QuasarError;
use crate::output::to_json;
use crate::storage::{PlanStore, Snapshot};

/// Execute data subcommands.
///
/// An export without a file is printed as JSON regardless of the output
/// format, so it can be piped straight back into `import`.
///
/// # Errors
///
/// Returns an error if a file cannot be read or written, the import is not
/// a valid snapshot, or the store fails.
pub fn data(store: &PlanStore, cmd: DataCommands, format: OutputFormat) -> Result<String, QuasarError> {
    match cmd {
        DataCommands::Export { file: None } => to_json(&store.export()?),
        DataCommands::Export { file: Some(path) } => {
            let snapshot = store.export()?;
            fs::write(&path, to_json(&snapshot)?)?;
            tracing::info!(path = %path.display(), "exported data");
            summary("Exported", &snapshot, &path.display().to_string(), format)
        }
        DataCommands::Import { file } => {
            let raw = fs::read_to_string(&file)?;
            let snapshot = Snapshot::from_json(&raw)?;
            store.import(&snapshot)?;
            summary("Imported", &snapshot, &file.display().to_string(), format)
        }
    }
}

fn summary(
    action: &str,
    snapshot: &Snapshot,
    path: &str,
    format: OutputFormat,
) -> Result<String, QuasarError> {
    match format {
        OutputFormat::Json => to_json(&json!({
            "action": action.to_lowercase(),
            "file": path,
            "goals": snapshot.goals.len(),
            "tasks": snapshot.tasks.len(),
            "reflections": snapshot.reflections.len(),
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} {} goals, {} tasks and {} reflections ({})",
            action.green(),
            snapshot.goals.len(),
            snapshot.tasks.len(),
            snapshot.reflections.len(),
            path.dimmed()
        )),
    }
}
