//! The `url` command.
//!
//! Decomposes a URL and prints its components, path segments, and parsed
//! query as JSON.

use async_trait::async_trait;
use serde_json::Value;

use urlquery_core::{Settings, UrlQueryError, UrlQueryResult};
use urlquery_http::Url;

use crate::command::ManagementCommand;
use crate::serialization::serializer_for;

/// Prints the decomposition of a URL.
pub struct UrlCommand;

/// Decomposes `input` into a JSON object.
///
/// The object holds the URL components plus `path_parts` and `query_map`.
pub fn describe_url(input: &str) -> UrlQueryResult<Value> {
    let url = Url::parse(input)?;
    let mut value = serde_json::to_value(&url)?;
    if let Value::Object(object) = &mut value {
        object.insert("path_parts".to_string(), serde_json::to_value(url.path_parts())?);
        object.insert("query_map".to_string(), serde_json::to_value(url.query_map())?);
    }
    Ok(value)
}

#[async_trait]
impl ManagementCommand for UrlCommand {
    fn name(&self) -> &'static str {
        "url"
    }

    fn help(&self) -> &'static str {
        "Decompose a URL into protocol, host, port, path, query, and hash"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("url")
                .required(true)
                .help("The URL to decompose"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), UrlQueryError> {
        let input = matches
            .get_one::<String>("url")
            .ok_or_else(|| UrlQueryError::ConfigurationError("missing URL".to_string()))?;

        let value = describe_url(input)?;
        println!("{}", serializer_for(settings).serialize(&value)?);
        Ok(())
    }
}
