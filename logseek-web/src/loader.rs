//! Event file loading.
//!
//! Event files are JSON Lines: one `{"EventId", "Message", "NanoTimeStamp"}`
//! object per line. Blank lines are skipped. With the `parquet` feature,
//! `*.parquet` files holding the same three columns are loaded as well.
//!
//! Stored timestamps are read leniently: a `NanoTimeStamp` that is not an
//! integer keeps its record and sorts as 0.

use std::path::{Path, PathBuf};

use logseek_search::{EventId, EventIndex, NanoTimestamp, SearchResult};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ServiceError;

/// File extension of event files, matched case-insensitively.
pub const EVENT_FILE_EXTENSION: &str = "jsonl";

/// File extension of Parquet event files, loaded with the `parquet` feature.
pub const PARQUET_FILE_EXTENSION: &str = "parquet";

/// Event record as stored on disk.
#[derive(Deserialize)]
struct StoredEvent {
    #[serde(rename = "EventId")]
    event_id: EventId,
    #[serde(rename = "Message")]
    message: String,
    #[serde(rename = "NanoTimeStamp", default)]
    timestamp: Value,
}

impl StoredEvent {
    fn into_record(self, path: &Path, line: usize) -> SearchResult {
        let nanos = match &self.timestamp {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => stored_timestamp(text),
            _ => None,
        };
        if nanos.is_none() {
            tracing::debug!(
                file = %path.display(),
                line,
                value = %self.timestamp,
                "Unparsable NanoTimeStamp, sorting as 0"
            );
        }

        SearchResult {
            event_id: self.event_id,
            message: self.message,
            timestamp: NanoTimestamp(nanos.unwrap_or(0)),
        }
    }
}

/// Parses a stored textual timestamp. `None` when it is not a base-10 integer.
pub(crate) fn stored_timestamp(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Loads every event file in `dir` into a fresh index.
///
/// A file that fails to load is logged and skipped so one corrupt file does
/// not take the service down.
///
/// # Errors
/// - `ServiceError::Read` - Directory cannot be listed
/// - `ServiceError::NoEventFiles` - Directory holds no event files
pub async fn load_event_dir(dir: &Path) -> Result<EventIndex, ServiceError> {
    let files = event_files(dir).await?;
    if files.is_empty() {
        return Err(ServiceError::NoEventFiles {
            dir: dir.to_path_buf(),
        });
    }

    let mut index = EventIndex::new();
    for path in &files {
        match load_path(path).await {
            Ok(records) => {
                tracing::info!(file = %path.display(), records = records.len(), "Loaded event file");
                index.add_records(records);
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), "Skipping event file: {e}");
            }
        }
    }

    tracing::info!(
        files = files.len(),
        records = index.len(),
        "Event index ready"
    );
    Ok(index)
}

async fn load_path(path: &Path) -> Result<Vec<SearchResult>, ServiceError> {
    #[cfg(feature = "parquet")]
    if has_extension(path, PARQUET_FILE_EXTENSION) {
        return crate::parquet_file::load_parquet_file(path).await;
    }
    load_event_file(path).await
}

/// Reads all records of one JSON Lines event file.
///
/// # Errors
/// - `ServiceError::Read` - File cannot be read
/// - `ServiceError::MalformedRecord` - A line does not decode as an event record
pub async fn load_event_file(path: &Path) -> Result<Vec<SearchResult>, ServiceError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ServiceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            serde_json::from_str::<StoredEvent>(line)
                .map(|event| event.into_record(path, number + 1))
                .map_err(|e| ServiceError::MalformedRecord {
                    path: path.to_path_buf(),
                    line: number + 1,
                    reason: e.to_string(),
                })
        })
        .collect()
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

fn is_event_file(path: &Path) -> bool {
    has_extension(path, EVENT_FILE_EXTENSION)
        || (cfg!(feature = "parquet") && has_extension(path, PARQUET_FILE_EXTENSION))
}

/// Event files in `dir`, sorted by name for a stable load order.
async fn event_files(dir: &Path) -> Result<Vec<PathBuf>, ServiceError> {
    let read_error = |source| ServiceError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_error)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
        let path = entry.path();
        if !is_event_file(&path) {
            continue;
        }
        // Follows symlinks so linked event files still load
        let is_file = match entry.file_type().await.map_err(read_error)? {
            kind if kind.is_symlink() => tokio::fs::metadata(&path)
                .await
                .is_ok_and(|meta| meta.is_file()),
            kind => kind.is_file(),
        };
        if is_file {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
