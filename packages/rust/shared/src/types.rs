//! Core domain types for the ADR index.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle state of an ADR. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Approved,
    #[serde(rename = "Partially Implemented")]
    PartiallyImplemented,
    Implemented,
}

impl Status {
    /// All recognized statuses, in the order they are reported to users.
    pub const ALL: [Status; 3] = [
        Status::Approved,
        Status::PartiallyImplemented,
        Status::Implemented,
    ];

    /// The exact text expected in the `Status` metadata row.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Approved => "Approved",
            Status::PartiallyImplemented => "Partially Implemented",
            Status::Implemented => "Implemented",
        }
    }

    /// Comma-joined list of accepted values, for error messages.
    pub fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = UnknownStatus;

    /// Case-sensitive match against [`Status::ALL`].
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(UnknownStatus)
    }
}

/// Returned when a string is not a recognized [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownStatus;

// ---------------------------------------------------------------------------
// AdrRecord
// ---------------------------------------------------------------------------

/// One validated ADR document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdrRecord {
    /// ADR index taken from the filename; unique across the corpus.
    pub sequence_number: u64,
    /// Document title; empty if the document has no `= ` heading.
    pub heading: String,
    /// Trimmed, non-empty author list.
    pub authors: Vec<String>,
    pub date: NaiveDate,
    pub status: Status,
    /// Trimmed, non-empty tag list, in document order.
    pub tags: Vec<String>,
    /// Where the document was read from.
    pub source_path: PathBuf,
}

impl AdrRecord {
    /// Whether this record carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

// ---------------------------------------------------------------------------
// TagGroup
// ---------------------------------------------------------------------------

/// All records sharing one tag, ascending by sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagGroup {
    pub tag: String,
    pub records: Vec<AdrRecord>,
}
