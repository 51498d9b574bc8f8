//! Tag index builder.
//!
//! Groups records by tag into render-ready [`TagGroup`]s. Output order is
//! fixed by the data alone:
//! 1. Tags sorted lexicographically (byte order)
//! 2. Records within a tag ascending by sequence number

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use adrindex_shared::{AdrRecord, TagGroup};

/// Build the tag index for a corpus.
///
/// Sequence numbers are assumed unique (see
/// [`verify_unique_sequences`](crate::validate::verify_unique_sequences)),
/// so no secondary sort key is needed.
#[instrument(skip_all, fields(records = records.len()))]
pub fn build_tag_index(records: &[AdrRecord]) -> Vec<TagGroup> {
    let tags: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.tags.iter().map(String::as_str))
        .collect();

    let groups: Vec<TagGroup> = tags
        .into_iter()
        .map(|tag| {
            let mut matched: Vec<AdrRecord> = records
                .iter()
                .filter(|record| record.has_tag(tag))
                .cloned()
                .collect();
            matched.sort_by_key(|record| record.sequence_number);

            TagGroup {
                tag: tag.to_string(),
                records: matched,
            }
        })
        .collect();

    debug!(tags = groups.len(), "tag index built");
    groups
}

/// All records ascending by sequence number.
pub fn sorted_by_sequence(records: &[AdrRecord]) -> Vec<AdrRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|record| record.sequence_number);
    sorted
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
