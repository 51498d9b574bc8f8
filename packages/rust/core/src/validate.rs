//! Cross-record checks on the whole corpus.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, instrument};

use adrindex_shared::{AdrIndexError, AdrRecord, Result};

/// Fail on the first sequence number seen twice, scanning in input order.
#[instrument(skip_all, fields(records = records.len()))]
pub fn verify_unique_sequences(records: &[AdrRecord]) -> Result<()> {
    let mut seen: HashMap<u64, &Path> = HashMap::with_capacity(records.len());

    for record in records {
        if let Some(first) = seen.insert(record.sequence_number, &record.source_path) {
            return Err(AdrIndexError::DuplicateSequence {
                sequence: record.sequence_number,
                first: first.to_path_buf(),
                second: record.source_path.clone(),
            });
        }
    }

    debug!("sequence numbers are unique");
    Ok(())
}
