//! Metadata extraction from AsciiDoc ADR documents.
//!
//! Recognizes exactly two conventions and nothing else:
//! - a document heading line, `= Title`
//! - a metadata table opened by a line starting `|Metadata`, holding
//!   `|<key>|<value>` rows, and closed by a line starting `|===`
//!
//! Extraction never fails. Missing headings or tables come back empty and are
//! rejected later, when the record is built.

mod table;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// Metadata keys
// ---------------------------------------------------------------------------

pub const KEY_DATE: &str = "Date";
pub const KEY_AUTHOR: &str = "Author";
pub const KEY_STATUS: &str = "Status";
pub const KEY_TAGS: &str = "Tags";

/// Keys that feed the record. Others are reported, not used.
pub const RECOGNIZED_KEYS: [&str; 4] = [KEY_DATE, KEY_AUTHOR, KEY_STATUS, KEY_TAGS];

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Raw, unvalidated content pulled out of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// Heading text without the `= ` marker; empty if there is none.
    pub heading: String,
    /// Metadata rows with recognized keys.
    pub metadata: BTreeMap<String, String>,
    /// Keys found in the table that are not in [`RECOGNIZED_KEYS`], sorted.
    pub unrecognized_keys: Vec<String>,
}

impl Extracted {
    /// Raw value for `key`, if the table had that row.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Matches a level-0 heading: a single `=` followed by whitespace.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=\s+(.*)$").expect("heading regex"));

/// Extract the heading and metadata rows from raw document text.
#[instrument(skip_all, fields(len = content.len()))]
pub fn extract(content: &str) -> Extracted {
    let content = strip_bom(content);
    let heading = extract_heading(content);

    let mut metadata = table::scan_metadata(content);
    let unrecognized_keys: Vec<String> = metadata
        .keys()
        .filter(|key| !RECOGNIZED_KEYS.contains(&key.as_str()))
        .cloned()
        .collect();
    metadata.retain(|key, _| RECOGNIZED_KEYS.contains(&key.as_str()));

    debug!(
        heading = %heading,
        keys = metadata.len(),
        unrecognized = unrecognized_keys.len(),
        "metadata extracted"
    );

    Extracted {
        heading,
        metadata,
        unrecognized_keys,
    }
}

/// Text of the first `= Title` line, or an empty string.
pub fn extract_heading(content: &str) -> String {
    strip_bom(content)
        .lines()
        .find_map(|line| HEADING_RE.captures(line))
        .map(|caps| caps[1].trim_end().to_string())
        .unwrap_or_default()
}

/// Drop a leading UTF-8 byte order mark.
fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}
