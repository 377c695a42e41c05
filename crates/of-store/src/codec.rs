//! Snapshot serialization.
//!
//! A snapshot file is a JSON document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "entries": [
//!     {"id": "...", "date": "2024-01-15", "time": "08:00", "kind": "workout", ...},
//!     ...
//!   ]
//! }
//! ```
//!
//! Entries keep their `kind` discriminator. Entries of a kind this build
//! does not know are skipped with a warning, so files written by a newer
//! version still load. A malformed entry of a known kind is an error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use of_core::{LogEntry, LogKind};

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot version {found}")]
    UnsupportedVersion { found: u32 },
    #[error("invalid entry at index {index}: {message}")]
    Entry { index: usize, message: String },
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    entries: &'a [LogEntry],
}

#[derive(Deserialize)]
struct SnapshotIn {
    version: u32,
    #[serde(default)]
    entries: Vec<Value>,
}

/// Encodes entries as a pretty-printed snapshot document.
pub fn serialize(entries: &[LogEntry]) -> Result<Vec<u8>, CodecError> {
    let snapshot = SnapshotOut {
        version: SNAPSHOT_VERSION,
        entries,
    };
    let mut bytes = serde_json::to_vec_pretty(&snapshot)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decodes a snapshot document, preserving entry order.
pub fn deserialize(bytes: &[u8]) -> Result<Vec<LogEntry>, CodecError> {
    let snapshot: SnapshotIn = serde_json::from_slice(bytes)?;
    if snapshot.version > SNAPSHOT_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: snapshot.version,
        });
    }

    let mut entries = Vec::with_capacity(snapshot.entries.len());
    for (index, value) in snapshot.entries.into_iter().enumerate() {
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| CodecError::Entry {
                index,
                message: "missing kind".to_string(),
            })?;
        if let Err(err) = kind.parse::<LogKind>() {
            tracing::warn!(index, %err, "skipping entry");
            continue;
        }
        let entry: LogEntry = serde_json::from_value(value).map_err(|err| CodecError::Entry {
            index,
            message: err.to_string(),
        })?;
        entries.push(entry);
    }

    tracing::debug!(count = entries.len(), "decoded snapshot");
    Ok(entries)
}

/// Writes a snapshot file, replacing any existing one.
pub fn write_file(path: &Path, entries: &[LogEntry]) -> Result<(), CodecError> {
    let bytes = serialize(entries)?;
    fs::write(path, bytes).map_err(|source| CodecError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn read_file(path: &Path) -> Result<Vec<LogEntry>, CodecError> {
    let bytes = fs::read(path).map_err(|source| CodecError::Io {
        path: path.display().to_string(),
        source,
    })?;
    deserialize(&bytes)
}
