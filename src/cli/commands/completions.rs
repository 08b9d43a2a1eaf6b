//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::QuasarError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns `QuasarError::Parse` if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, QuasarError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "quasar", &mut buf);
    String::from_utf8(buf).map_err(|e| QuasarError::Parse(format!("UTF-8 error: {e}")))
}

/// Execute the completions command.
///
/// # Errors
///
/// Returns an error if the script cannot be generated.
pub fn completions(shell: Shell) -> Result<String, QuasarError> {
    tracing::debug!(?shell, "generating completions");
    generate_completions(shell)
}
