//! Parquet event files.
//!
//! Each row carries `EventId`, `Message` and `NanoTimeStamp` columns, stored
//! as UTF-8 strings or integers. Decoding runs on the blocking pool.

use std::fs::File;
use std::path::Path;

use logseek_search::{EventId, NanoTimestamp, SearchResult};
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::{Field, Row};

use crate::errors::ServiceError;
use crate::loader::stored_timestamp;

/// Reads all rows of one Parquet event file.
///
/// # Errors
/// - `ServiceError::Read` - File cannot be opened
/// - `ServiceError::Parquet` - File is not valid Parquet
/// - `ServiceError::MalformedRecord` - A row lacks the `EventId` or `Message` column
pub async fn load_parquet_file(path: &Path) -> Result<Vec<SearchResult>, ServiceError> {
    let owned = path.to_path_buf();
    tokio::task::spawn_blocking(move || read_rows(&owned))
        .await
        .map_err(|e| ServiceError::Parquet {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
}

fn read_rows(path: &Path) -> Result<Vec<SearchResult>, ServiceError> {
    let parquet_error = |e: parquet::errors::ParquetError| ServiceError::Parquet {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let file = File::open(path).map_err(|source| ServiceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = SerializedFileReader::new(file).map_err(parquet_error)?;
    let rows = reader.get_row_iter(None).map_err(parquet_error)?;

    rows.enumerate()
        .map(|(number, row)| {
            let row = row.map_err(parquet_error)?;
            record_from_row(&row, path).map_err(|reason| ServiceError::MalformedRecord {
                path: path.to_path_buf(),
                line: number + 1,
                reason,
            })
        })
        .collect()
}

fn record_from_row(row: &Row, path: &Path) -> Result<SearchResult, String> {
    let mut event_id = None;
    let mut message = None;
    let mut timestamp = None;

    for (name, field) in row.get_column_iter() {
        match name.as_str() {
            "EventId" => event_id = event_id_field(field),
            "Message" => message = text_field(field),
            "NanoTimeStamp" => timestamp = timestamp_field(field),
            _ => {}
        }
    }

    let event_id = event_id.ok_or("missing EventId")?;
    let message = message.ok_or("missing Message")?;
    if timestamp.is_none() {
        tracing::debug!(file = %path.display(), %event_id, "Unparsable NanoTimeStamp, sorting as 0");
    }

    Ok(SearchResult {
        event_id,
        message,
        timestamp: NanoTimestamp(timestamp.unwrap_or(0)),
    })
}

fn text_field(field: &Field) -> Option<String> {
    match field {
        Field::Str(text) => Some(text.clone()),
        Field::Bytes(bytes) => bytes.as_utf8().ok().map(str::to_string),
        _ => None,
    }
}

fn event_id_field(field: &Field) -> Option<EventId> {
    match field {
        Field::Long(n) => Some(EventId::Number((*n).into())),
        Field::Int(n) => Some(EventId::Number((*n).into())),
        other => text_field(other).map(EventId::Text),
    }
}

fn timestamp_field(field: &Field) -> Option<i64> {
    match field {
        Field::Long(n) => Some(*n),
        Field::Int(n) => Some(i64::from(*n)),
        other => text_field(other).as_deref().and_then(stored_timestamp),
    }
}
