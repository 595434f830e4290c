// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::coding::{DecodeError, EncodeError};

/// Represents errors that can occur while building, serializing or
/// searching an NCL index.
#[derive(Debug)]
pub enum Error {
    /// I/O error, e.g. opening or reading one of the four bundle files
    Io(std::io::Error),

    /// Serialization failed
    Encode(EncodeError),

    /// Deserialization failed
    Decode(DecodeError),

    /// The number of records the caller claimed to provide did not match
    /// how many were actually supplied
    InputCountMismatch {
        /// Declared record count
        expected: usize,
        /// Actually observed record count
        actual: usize,
    },

    /// A `.size`/`.index`/`.subhead` file did not satisfy the invariants of
    /// the bundle format (e.g. `nii` disagreeing with `ntop`/`div`/sublist
    /// lengths)
    InvalidBundle(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Encode(e) => write!(f, "encode error: {e}"),
            Self::Decode(e) => write!(f, "decode error: {e}"),
            Self::InputCountMismatch { expected, actual } => write!(
                f,
                "expected {expected} records, parsed {actual}"
            ),
            Self::InvalidBundle(msg) => write!(f, "invalid index bundle: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<EncodeError> for Error {
    fn from(value: EncodeError) -> Self {
        Self::Encode(value)
    }
}

impl From<DecodeError> for Error {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

/// NCL index result
pub type Result<T> = std::result::Result<T, Error>;
