//! The `urlquery` command-line tool.

use std::path::PathBuf;
use std::process::ExitCode;

use urlquery_cli::commands::register_builtin_commands;
use urlquery_cli::{load_settings, CommandRegistry};
use urlquery_core::logging::setup_logging;
use urlquery_core::SETTINGS;

#[tokio::main]
async fn main() -> ExitCode {
    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);

    let matches = registry.build_cli().get_matches();

    let settings = match load_settings(matches.get_one::<PathBuf>("config").map(PathBuf::as_path)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("urlquery: {e}");
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&settings);
    if let Err(e) = SETTINGS.configure(settings.clone()) {
        tracing::warn!(error = %e, "settings were configured twice");
    }

    match registry.execute(&matches, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("urlquery: {e}");
            ExitCode::FAILURE
        }
    }
}
