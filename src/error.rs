// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors raised at the store boundary and by the add/manage flows.
///
/// The aggregation engine never returns these: malformed amounts coerce to
/// zero and undated records are left out of period windows instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Failed to read '{key}' from store: {reason}")]
    StorageRead { key: String, reason: String },
    #[error("Failed to write '{key}' to store: {reason}")]
    StorageWrite { key: String, reason: String },
    #[error("Stored '{0}' is not a JSON list")]
    MalformedBlob(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
