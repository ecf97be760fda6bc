use std::{collections::BTreeMap, fmt};

use thiserror::Error;

/// Configuration-time validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The allow-list contains no entries, so every file would be rejected.
    #[error("MIME type allow-list cannot be empty")]
    EmptyAllowList,
    /// An allow-list entry is malformed.
    #[error("invalid MIME type entry `{entry}`")]
    InvalidMimeEntry {
        /// The invalid entry value.
        entry: String,
    },
}

/// Named failure codes reported by a failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureCode {
    /// The file does not exist or cannot be read.
    NotReadable,
    /// No MIME type could be established for the file.
    NotDetected,
    /// The detected MIME type is not in the allow-list.
    FalseType,
}

impl FailureCode {
    /// Returns the code name used as the message key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotReadable => "NotReadable",
            Self::NotDetected => "NotDetected",
            Self::FalseType => "FalseType",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure messages keyed by code. Holds at most one entry per validation.
pub type Messages = BTreeMap<FailureCode, String>;

/// Validation failure for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The file does not exist, is not a regular file, or could not be read.
    #[error("File '{file}' is not readable or does not exist: {reason}")]
    NotReadable {
        /// Basename of the file used in messages.
        file: String,
        /// Underlying I/O failure description.
        reason: String,
    },
    /// Neither the declared type, the header, nor the filename yielded a MIME type.
    #[error("The MIME type of file '{file}' could not be detected")]
    NotDetected {
        /// Basename of the file used in messages.
        file: String,
    },
    /// The effective MIME type matched no allow-list entry.
    #[error("File '{file}' has a false MIME type of '{detected}' (allowed: {allowed})")]
    FalseType {
        /// Basename of the file used in messages.
        file: String,
        /// Effective MIME type that was compared.
        detected: String,
        /// Comma-joined allow-list at the time of the call.
        allowed: String,
    },
}

impl ValidationError {
    /// Returns the failure code for this error.
    pub fn code(&self) -> FailureCode {
        match self {
            Self::NotReadable { .. } => FailureCode::NotReadable,
            Self::NotDetected { .. } => FailureCode::NotDetected,
            Self::FalseType { .. } => FailureCode::FalseType,
        }
    }

    /// Returns the basename of the file the error refers to.
    pub fn file(&self) -> &str {
        match self {
            Self::NotReadable { file, .. }
            | Self::NotDetected { file }
            | Self::FalseType { file, .. } => file,
        }
    }

    /// Renders this error as a single-entry message map.
    pub fn messages(&self) -> Messages {
        let mut messages = Messages::new();
        messages.insert(self.code(), self.to_string());
        messages
    }
}
