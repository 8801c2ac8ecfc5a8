//! The `decode` command.
//!
//! Reads typed fields out of a query string. Each `--field` takes a
//! `name:converter[:url_key]` spec; the decoded fields print as a JSON
//! object keyed by field name.

use async_trait::async_trait;

use urlquery_core::{Settings, UrlQueryError, UrlQueryResult};
use urlquery_http::QueryMap;
use urlquery_params::dynamic::{parse_field_spec, FieldRecord};
use urlquery_params::read_fields;

use crate::command::ManagementCommand;
use crate::commands::strip_question_mark;
use crate::serialization::serializer_for;

/// Decodes typed fields from a query string.
pub struct DecodeCommand;

/// Decodes the fields described by `specs` from `query`.
///
/// Fields whose key is absent are left out of the record.
pub fn decode_query<S: AsRef<str>>(query: &str, specs: &[S]) -> UrlQueryResult<FieldRecord> {
    let fields = specs
        .iter()
        .map(|spec| parse_field_spec(spec.as_ref()))
        .collect::<UrlQueryResult<Vec<_>>>()?;

    let map = QueryMap::parse(strip_question_mark(query.trim()));
    let mut record = FieldRecord::new();
    read_fields(&map, &fields, &mut record)?;
    Ok(record)
}

#[async_trait]
impl ManagementCommand for DecodeCommand {
    fn name(&self) -> &'static str {
        "decode"
    }

    fn help(&self) -> &'static str {
        "Decode typed fields from a query string"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("query")
                .required(true)
                .allow_hyphen_values(true)
                .help("The query string to decode"),
        )
        .arg(
            clap::Arg::new("field")
                .long("field")
                .short('f')
                .required(true)
                .action(clap::ArgAction::Append)
                .value_name("NAME:CONVERTER[:URL_KEY]")
                .help("A field to decode; converters: string, int, bool, iso_date, int_array, string_array"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), UrlQueryError> {
        let query = matches
            .get_one::<String>("query")
            .ok_or_else(|| UrlQueryError::ConfigurationError("missing query".to_string()))?;
        let specs: Vec<&String> = matches
            .get_many::<String>("field")
            .map(Iterator::collect)
            .unwrap_or_default();

        let record = decode_query(query, &specs)?;
        let value = serde_json::to_value(&record)?;
        println!("{}", serializer_for(settings).serialize(&value)?);
        Ok(())
    }
}
