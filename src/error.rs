// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the ledger core. Every variant is recoverable: the caller
/// reports the message and the ledger stays as it was before the call.
#[derive(Debug, Error)]
pub enum Error {
    /// A date or amount did not match the expected format.
    #[error("parse error: {0}")]
    Parse(String),

    /// A record or selection was rejected before touching the ledger.
    #[error("{0}")]
    Validation(String),

    /// The backing store could not be read or written.
    #[error("could not persist ledger to {target}: {source}")]
    Persistence {
        target: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn persistence<E>(target: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Persistence {
            target: target.into(),
            source: source.into(),
        }
    }
}
