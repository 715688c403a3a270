// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the measurement and record engine.
//!
//! Persistence reads never fail outward (they fall back to defaults), so
//! these types only describe failures the user has to hear about.

use thiserror::Error;

/// A dimension field that is not blank and not a number.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("not a number: {input:?}")]
pub struct NumericParseError {
    pub input: String,
}

/// Failure writing to the key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O error on key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure of a record list operation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("index {index} out of range (list has {len} records)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The in-memory list was updated but could not be written out.
    #[error("changes not saved: {0}")]
    Storage(#[from] StorageError),
}

/// Failure generating the PDF report.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to load font: {0}")]
    Font(String),

    #[error("failed to render document: {0}")]
    Render(String),

    #[error("{field} contains {character:?}, which the report font cannot show")]
    UnsupportedCharacter { field: String, character: char },

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
