//! Asynchronous text file reading.
//!
//! [`read_as_text`] yields a single [`FileReaderResult`] for one file;
//! [`read_all_as_text`] reads many files concurrently and yields one result
//! per file in completion order, ending after the last file.

use std::path::{Path, PathBuf};

use futures_core::Stream;
use futures_util::stream::{self, FuturesUnordered};

use urlquery_core::{UrlQueryError, UrlQueryResult, SETTINGS};

/// The name and decoded contents of a file that was read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FileReaderResult {
    /// The file name (last path component).
    pub name: String,
    /// The decoded text contents.
    pub contents: String,
}

/// The text encodings understood by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8; invalid sequences become U+FFFD.
    Utf8,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    Latin1,
}

impl TextEncoding {
    /// Resolves an encoding label (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`UrlQueryError::UnsupportedEncoding`] for unknown labels.
    pub fn from_label(label: &str) -> UrlQueryResult<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" | "unicode-1-1-utf-8" => Ok(Self::Utf8),
            "latin1" | "iso-8859-1" | "iso8859-1" | "l1" | "us-ascii" | "ascii" => {
                Ok(Self::Latin1)
            }
            _ => Err(UrlQueryError::UnsupportedEncoding(label.to_string())),
        }
    }

    /// Decodes raw bytes into text.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Latin1 => bytes.iter().copied().map(char::from).collect(),
        }
    }
}

/// Reads one file as text.
///
/// The returned stream yields exactly one item. When `encoding` is `None`
/// the configured default encoding is used (UTF-8 if settings were never
/// configured).
pub fn read_as_text(
    path: impl AsRef<Path>,
    encoding: Option<&str>,
) -> impl Stream<Item = UrlQueryResult<FileReaderResult>> {
    let path = path.as_ref().to_path_buf();
    let encoding = encoding.map(str::to_owned);
    stream::once(read_file(path, encoding))
}

/// Reads every file as text, concurrently.
///
/// Yields one item per file, in the order the reads complete.
pub fn read_all_as_text<I, P>(
    paths: I,
    encoding: Option<&str>,
) -> impl Stream<Item = UrlQueryResult<FileReaderResult>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|path| read_file(path.as_ref().to_path_buf(), encoding.map(str::to_owned)))
        .collect::<FuturesUnordered<_>>()
}

async fn read_file(path: PathBuf, encoding: Option<String>) -> UrlQueryResult<FileReaderResult> {
    let label = encoding.unwrap_or_else(default_encoding);
    let encoding = TextEncoding::from_label(&label)?;

    let bytes = tokio::fs::read(&path).await?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    tracing::debug!(file = %name, bytes = bytes.len(), encoding = %label, "read file");

    Ok(FileReaderResult {
        name,
        contents: encoding.decode(&bytes),
    })
}

fn default_encoding() -> String {
    SETTINGS.default_encoding().to_string()
}
