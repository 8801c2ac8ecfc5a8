//! The `query` command.
//!
//! Parses a raw query string and prints the resulting mapping as JSON. Values
//! are not percent-decoded; bare keys print as `true`.

use async_trait::async_trait;

use urlquery_core::{Settings, UrlQueryError};
use urlquery_http::QueryMap;

use crate::command::ManagementCommand;
use crate::commands::strip_question_mark;
use crate::serialization::serializer_for;

/// Prints the mapping parsed from a query string.
pub struct QueryCommand;

/// Parses a query string, with or without its leading `?`.
pub fn parse_query(input: &str) -> QueryMap {
    QueryMap::parse(strip_question_mark(input.trim()))
}

#[async_trait]
impl ManagementCommand for QueryCommand {
    fn name(&self) -> &'static str {
        "query"
    }

    fn help(&self) -> &'static str {
        "Parse a raw query string into a key/value mapping"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("query")
                .required(true)
                .allow_hyphen_values(true)
                .help("The query string, e.g. 'a=1&b'"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), UrlQueryError> {
        let input = matches
            .get_one::<String>("query")
            .ok_or_else(|| UrlQueryError::ConfigurationError("missing query".to_string()))?;

        let value = serde_json::to_value(parse_query(input))?;
        println!("{}", serializer_for(settings).serialize(&value)?);
        Ok(())
    }
}
