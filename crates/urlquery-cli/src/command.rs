//! Subcommand framework for the `urlquery` binary.
//!
//! Each subcommand implements [`ManagementCommand`] and is added to a
//! [`CommandRegistry`], which builds the clap tree and dispatches parsed
//! arguments to the matching handler.
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use urlquery_cli::command::ManagementCommand;
//! use urlquery_core::{Settings, UrlQueryResult};
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl ManagementCommand for Echo {
//!     fn name(&self) -> &'static str { "echo" }
//!     fn help(&self) -> &'static str { "Print the query back" }
//!
//!     async fn handle(&self, _: &clap::ArgMatches, _: &Settings) -> UrlQueryResult<()> {
//!         Ok(())
//!     }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use urlquery_core::{settings_loader, Settings, UrlQueryError, UrlQueryResult};

/// A `urlquery` subcommand.
#[async_trait]
pub trait ManagementCommand: Send + Sync {
    /// The subcommand name typed on the command line.
    fn name(&self) -> &'static str;

    /// One-line description shown in `--help`.
    fn help(&self) -> &'static str;

    /// Adds this command's arguments. Commands without arguments keep the
    /// default.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Runs the command.
    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> UrlQueryResult<()>;
}

/// Subcommands by name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Box<dyn ManagementCommand>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command, replacing any command with the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        self.commands.insert(command.name(), command);
    }

    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Registered command names, sorted.
    pub fn list_commands(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the `urlquery` clap tree: one subcommand per registered
    /// command plus the global `--config FILE` option.
    pub fn build_cli(&self) -> clap::Command {
        let root = clap::Command::new("urlquery")
            .about("Inspect URLs and map query strings to typed fields")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg(
                clap::Arg::new("config")
                    .long("config")
                    .global(true)
                    .value_name("FILE")
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Settings file (.toml or .json)"),
            );

        self.commands.values().fold(root, |root, command| {
            let sub = clap::Command::new(command.name()).about(command.help());
            root.subcommand(command.add_arguments(sub))
        })
    }

    /// Runs the subcommand selected in `matches`.
    pub async fn execute(&self, matches: &clap::ArgMatches, settings: &Settings) -> UrlQueryResult<()> {
        let (name, sub_matches) = matches
            .subcommand()
            .ok_or_else(|| UrlQueryError::ConfigurationError("no subcommand given".to_string()))?;
        let command = self
            .get(name)
            .ok_or_else(|| UrlQueryError::ConfigurationError(format!("unknown command '{name}'")))?;

        tracing::debug!(command = name, "executing command");
        command.handle(sub_matches, settings).await
    }
}

/// Loads settings from `config` (with `URLQUERY_*` overrides), or from the
/// environment alone when no file is given.
pub fn load_settings(config: Option<&Path>) -> UrlQueryResult<Settings> {
    match config {
        Some(path) => settings_loader::from_file_with_env(path),
        None => Ok(settings_loader::from_env()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Succeeds unless `--fail` is passed.
    struct Scripted(&'static str);

    #[async_trait]
    impl ManagementCommand for Scripted {
        fn name(&self) -> &'static str {
            self.0
        }

        fn help(&self) -> &'static str {
            "scripted"
        }

        fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
            cmd.arg(clap::Arg::new("fail").long("fail").action(clap::ArgAction::SetTrue))
        }

        async fn handle(&self, matches: &clap::ArgMatches, _: &Settings) -> UrlQueryResult<()> {
            if matches.get_flag("fail") {
                return Err(UrlQueryError::ConversionError("scripted failure".to_string()));
            }
            Ok(())
        }
    }

    fn registry(names: &[&'static str]) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for name in names {
            registry.register(Box::new(Scripted(*name)));
        }
        registry
    }

    #[test]
    fn test_register_lookup_and_order() {
        let registry = registry(&["url", "decode", "query", "url"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.list_commands(), vec!["decode", "query", "url"]);
        assert_eq!(registry.get("query").map(|c| c.help()), Some("scripted"));
        assert!(registry.get("encode").is_none());
        assert!(CommandRegistry::new().is_empty());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let cli = registry(&["url"]).build_cli();
        assert!(cli.clone().try_get_matches_from(["urlquery"]).is_err());
        assert!(cli.try_get_matches_from(["urlquery", "url"]).is_ok());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let matches = registry(&["read"])
            .build_cli()
            .try_get_matches_from(["urlquery", "read", "--config", "urlquery.toml"])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("urlquery.toml"))
        );
    }

    #[tokio::test]
    async fn test_execute_dispatches() {
        let registry = registry(&["decode", "encode"]);
        let settings = Settings::default();

        let ok = registry
            .build_cli()
            .try_get_matches_from(["urlquery", "encode"])
            .unwrap();
        assert!(registry.execute(&ok, &settings).await.is_ok());

        let failing = registry
            .build_cli()
            .try_get_matches_from(["urlquery", "decode", "--fail"])
            .unwrap();
        let err = registry.execute(&failing, &settings).await.unwrap_err();
        assert!(matches!(err, UrlQueryError::ConversionError(_)));
    }

    #[test]
    fn test_load_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urlquery.toml");
        std::fs::write(&path, "pretty_json = false\nlog_level = \"trace\"\n").unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert!(!settings.pretty_json);
        assert_eq!(settings.log_level, "trace");

        let missing = load_settings(Some(Path::new("/nonexistent/urlquery.toml")));
        assert!(missing.unwrap_err().is_configuration());
    }
}
