//! The `read` command.
//!
//! Reads files that each hold a query string and prints one
//! `{name, query_map}` object per file, sorted by file name.

use std::path::PathBuf;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use serde::Serialize;

use urlquery_core::{Settings, UrlQueryError, UrlQueryResult};
use urlquery_http::{read_all_as_text, QueryMap};

use crate::command::ManagementCommand;
use crate::commands::strip_question_mark;
use crate::serialization::serializer_for;

/// Reads query strings from files.
pub struct ReadCommand;

/// The query mapping read from one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileQuery {
    /// The file name.
    pub name: String,
    /// The mapping parsed from the trimmed file contents.
    pub query_map: QueryMap,
}

/// Reads every file concurrently and parses its contents as a query string.
///
/// Fails on the first file that cannot be read or decoded.
pub async fn read_queries(paths: &[PathBuf], encoding: Option<&str>) -> UrlQueryResult<Vec<FileQuery>> {
    let mut queries: Vec<FileQuery> = read_all_as_text(paths, encoding)
        .map_ok(|file| FileQuery {
            query_map: QueryMap::parse(strip_question_mark(file.contents.trim())),
            name: file.name,
        })
        .try_collect()
        .await?;

    queries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(queries)
}

#[async_trait]
impl ManagementCommand for ReadCommand {
    fn name(&self) -> &'static str {
        "read"
    }

    fn help(&self) -> &'static str {
        "Read query strings from files"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("files")
                .required(true)
                .num_args(1..)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Files holding one query string each"),
        )
        .arg(
            clap::Arg::new("encoding")
                .long("encoding")
                .help("Text encoding (utf-8, latin1); defaults to the configured encoding"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), UrlQueryError> {
        let paths: Vec<PathBuf> = matches
            .get_many::<PathBuf>("files")
            .map(|files| files.cloned().collect())
            .unwrap_or_default();
        let encoding = matches
            .get_one::<String>("encoding")
            .map(String::as_str)
            .or(Some(settings.default_encoding.as_str()));

        let queries = read_queries(&paths, encoding).await?;
        let value = serde_json::to_value(&queries)?;
        println!("{}", serializer_for(settings).serialize(&value)?);
        Ok(())
    }
}
