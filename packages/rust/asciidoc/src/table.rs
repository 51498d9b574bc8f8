//! Line scanner for the `|Metadata` ... `|===` table.

use std::collections::BTreeMap;

use tracing::debug;

/// Marks the line that opens the metadata region. Not itself a row.
const TABLE_START: &str = "|Metadata";

/// Marks the line that closes the metadata region.
const TABLE_END: &str = "|===";

/// Where the scanner is relative to the metadata table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeTable,
    InTable,
    AfterTable,
}

/// Collect `key -> value` rows from the metadata table.
///
/// Only the first table is read; anything after its closing `|===` is
/// ignored. A repeated key keeps its last value.
pub(crate) fn scan_metadata(content: &str) -> BTreeMap<String, String> {
    let mut state = ScanState::BeforeTable;
    let mut rows = BTreeMap::new();

    for line in content.lines() {
        state = match state {
            ScanState::BeforeTable if line.starts_with(TABLE_START) => ScanState::InTable,
            ScanState::BeforeTable => ScanState::BeforeTable,
            ScanState::InTable if line.starts_with(TABLE_END) => ScanState::AfterTable,
            ScanState::InTable => {
                if let Some((key, value)) = parse_row(line) {
                    if let Some(previous) = rows.insert(key.to_string(), value.to_string()) {
                        debug!(key, %previous, value, "repeated metadata key, keeping last value");
                    }
                }
                ScanState::InTable
            }
            ScanState::AfterTable => break,
        };
    }

    rows
}

/// Split `|<key>|<value>` into its trimmed cells.
///
/// Lines with fewer than two cells are not rows. Cells past the second are
/// ignored.
fn parse_row(line: &str) -> Option<(&str, &str)> {
    let mut cells = line.trim().split('|');
    let _leading = cells.next()?;
    let key = cells.next()?.trim();
    let value = cells.next()?.trim();
    Some((key, value))
}
