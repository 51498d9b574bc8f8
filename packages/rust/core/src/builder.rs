//! Record builder: raw metadata → validated [`AdrRecord`].
//!
//! Every field check runs even after one fails, so the log shows all the
//! problems in a document. The first failing check (sequence, date, authors,
//! status, tags) is the error returned.

use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, warn};

use adrindex_asciidoc::{Extracted, KEY_AUTHOR, KEY_DATE, KEY_STATUS, KEY_TAGS};
use adrindex_shared::{AdrIndexError, AdrRecord, Result, Status};

use crate::sequence::SequenceScheme;

/// `DD-MM-YYYY`, digits only, zero-padded.
static DATE_SHAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("date regex"));

const DATE_FORMAT: &str = "%d-%m-%Y";

/// Build a record for the document at `path` from its extracted content.
pub fn build_record(
    path: &Path,
    extracted: &Extracted,
    scheme: &dyn SequenceScheme,
) -> Result<AdrRecord> {
    for key in &extracted.unrecognized_keys {
        warn!(path = %path.display(), key = %key, "unexpected metadata key");
    }

    let sequence = scheme.sequence(path);
    let date = parse_date(path, extracted.get(KEY_DATE));
    let authors = required_list(extracted.get(KEY_AUTHOR))
        .ok_or_else(|| AdrIndexError::MissingAuthors { path: path.into() });
    let status = parse_status(path, extracted.get(KEY_STATUS));
    let tags = required_list(extracted.get(KEY_TAGS))
        .ok_or_else(|| AdrIndexError::MissingTags { path: path.into() });

    {
        let mut failures = [
            sequence.as_ref().err(),
            date.as_ref().err(),
            authors.as_ref().err(),
            status.as_ref().err(),
            tags.as_ref().err(),
        ]
        .into_iter()
        .flatten();
        if let Some(first) = failures.next() {
            for other in failures {
                warn!(path = %path.display(), error = %other, "additional metadata problem");
            }
            debug!(path = %path.display(), error = %first, "record rejected");
        }
    }

    // Fields are evaluated in check order.
    let record = AdrRecord {
        sequence_number: sequence?,
        date: date?,
        authors: authors?,
        status: status?,
        tags: tags?,
        heading: extracted.heading.clone(),
        source_path: path.to_path_buf(),
    };

    debug!(
        path = %path.display(),
        sequence = record.sequence_number,
        "record built"
    );
    Ok(record)
}

/// Parse the `Date` row.
///
/// An absent row, or a date equal to the zero date (`01-01-0001`), is
/// reported as missing.
fn parse_date(path: &Path, raw: Option<&str>) -> Result<NaiveDate> {
    let Some(raw) = raw else {
        return Err(AdrIndexError::MissingDate { path: path.into() });
    };

    let invalid = || AdrIndexError::InvalidDate {
        path: path.into(),
        value: raw.to_string(),
    };
    if !DATE_SHAPE_RE.is_match(raw) {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())?;

    if Some(date) == NaiveDate::from_ymd_opt(1, 1, 1) {
        return Err(AdrIndexError::MissingDate { path: path.into() });
    }
    Ok(date)
}

/// Parse the `Status` row against the recognized set.
fn parse_status(path: &Path, raw: Option<&str>) -> Result<Status> {
    let raw = raw.unwrap_or_default();
    raw.parse().map_err(|_| AdrIndexError::InvalidStatus {
        path: path.into(),
        value: raw.to_string(),
        valid: Status::valid_values(),
    })
}

/// Split a comma-separated list, trimming each entry and dropping empty ones.
pub fn parse_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn required_list(raw: Option<&str>) -> Option<Vec<String>> {
    let items = parse_comma_list(raw?);
    (!items.is_empty()).then_some(items)
}
