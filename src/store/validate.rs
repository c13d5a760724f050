//! Non-failing structural parsing of project documents.
//!
//! `safe_parse` never panics and never returns a crate error: malformed JSON,
//! a missing field, a type mismatch or a failed [`Validate`] check all come
//! back as a [`ValidationFailure`]. Whether that is fatal is the caller's
//! decision.

use std::fmt;
use std::path::PathBuf;

use serde::de::DeserializeOwned;

/// Structural checks serde cannot express.
pub trait Validate {
    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// File name or label of the document that failed.
    pub source: String,
    pub reason: String,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.reason)
    }
}

/// A successfully parsed entity plus the canonical path it is written back to.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub path: PathBuf,
}

pub fn safe_parse<T>(content: &str, source: &str) -> std::result::Result<T, ValidationFailure>
where
    T: DeserializeOwned + Validate,
{
    let failure = |reason: String| ValidationFailure {
        source: source.to_string(),
        reason,
    };

    let value: T = serde_json::from_str(content).map_err(|err| failure(err.to_string()))?;
    value.validate().map_err(failure)?;
    Ok(value)
}
