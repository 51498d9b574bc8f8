//! End-to-end batch pipeline: directory → records → validation → tag index.
//!
//! The run is all-or-nothing. The first bad document, duplicate sequence
//! number, or render failure aborts it; no partial index is produced.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use adrindex_shared::{AdrRecord, IndexConfig, Result, TagGroup};

use crate::builder::build_record;
use crate::index::{build_tag_index, sorted_by_sequence};
use crate::loader::{discover_documents, load_document};
use crate::render::{Renderer, load_layout, render_json};
use crate::sequence::{LeadingNumber, SequenceScheme};
use crate::validate::verify_unique_sequences;

/// Result of indexing a corpus.
#[derive(Debug, Clone)]
pub struct IndexResult {
    /// Every record, ascending by sequence number.
    pub records: Vec<AdrRecord>,
    /// Tag groups in index order.
    pub groups: Vec<TagGroup>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Load, build, and validate every document under `config.adr_dir`.
///
/// Records come back in discovery (file name) order.
#[instrument(skip_all, fields(dir = %config.adr_dir.display()))]
pub fn load_records(config: &IndexConfig, scheme: &dyn SequenceScheme) -> Result<Vec<AdrRecord>> {
    let paths = discover_documents(&config.adr_dir, &config.extension)?;
    info!(count = paths.len(), "loading ADR documents");

    let mut records = Vec::with_capacity(paths.len());
    for path in &paths {
        let content = load_document(path)?;
        let extracted = adrindex_asciidoc::extract(&content);
        records.push(build_record(path, &extracted, scheme)?);
    }

    verify_unique_sequences(&records)?;
    Ok(records)
}

/// Run the full indexing pipeline with the default filename scheme.
pub fn build_index(config: &IndexConfig) -> Result<IndexResult> {
    let scheme = LeadingNumber {
        separator: config.separator,
    };
    build_index_with(config, &scheme)
}

/// Run the full indexing pipeline with a caller-supplied filename scheme.
pub fn build_index_with(config: &IndexConfig, scheme: &dyn SequenceScheme) -> Result<IndexResult> {
    let start = Instant::now();

    let records = load_records(config, scheme)?;
    let groups = build_tag_index(&records);
    let records = sorted_by_sequence(&records);

    let elapsed = start.elapsed();
    info!(
        records = records.len(),
        tags = groups.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "index built"
    );

    Ok(IndexResult {
        records,
        groups,
        elapsed,
    })
}

/// Render an index through the configured layout (or the built-in one).
pub fn render_text(config: &IndexConfig, result: &IndexResult) -> Result<String> {
    let layout = load_layout(config.template.as_deref())?;
    debug!(custom = config.template.is_some(), "layout loaded");
    Renderer::new().render(&layout, &result.groups, &result.records)
}

/// Render an index as JSON tag groups.
pub fn render_json_index(result: &IndexResult) -> Result<String> {
    render_json(&result.groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adrindex_shared::{AdrIndexError, Status};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const FIXTURE_DIR: &str = "../../../fixtures/adr";
    const FIXTURE_TEMPLATE: &str = "../../../fixtures/templates/readme.j2";

    fn adr(heading: &str, status: &str, tags: &str) -> String {
        format!(
            "= {heading}\n\n|===\n|Metadata |\n|Date |01-02-2023\n|Author |Alice\n\
             |Status |{status}\n|Tags |{tags}\n|===\n"
        )
    }

    fn config_for(dir: &Path) -> IndexConfig {
        IndexConfig {
            adr_dir: dir.to_path_buf(),
            ..IndexConfig::default()
        }
    }

    #[test]
    fn fixture_corpus_indexes() {
        let config = config_for(Path::new(FIXTURE_DIR));
        let result = build_index(&config).expect("index fixtures");

        let sequences: Vec<u64> = result.records.iter().map(|r| r.sequence_number).collect();
        assert_eq!(sequences, vec![1, 2, 3, 10]);

        let tags: Vec<&str> = result.groups.iter().map(|g| g.tag.as_str()).collect();
        assert_eq!(tags, vec!["api", "infra", "naming", "storage"]);

        let infra = &result.groups[1];
        let infra_seqs: Vec<u64> = infra.records.iter().map(|r| r.sequence_number).collect();
        assert_eq!(infra_seqs, vec![2, 3, 10]);

        let adopt = result.records.iter().find(|r| r.sequence_number == 2).unwrap();
        assert_eq!(adopt.heading, "Adopt X");
        assert_eq!(adopt.authors, vec!["Alice", "Bob"]);
        assert_eq!(adopt.status, Status::Approved);
        assert_eq!(adopt.tags, vec!["infra", "naming"]);
    }

    #[test]
    fn fixture_corpus_renders_with_fixture_layout() {
        let mut config = config_for(Path::new(FIXTURE_DIR));
        config.template = Some(PathBuf::from(FIXTURE_TEMPLATE));

        let result = build_index(&config).unwrap();
        let out = render_text(&config, &result).unwrap();
        assert!(out.contains("### Infra"));
        assert!(out.contains("1-use-rest.adoc"));
        assert!(out.contains("Adopt X"));
    }

    #[test]
    fn invalid_status_aborts_run() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("1-a.adoc"), adr("A", "Approved", "x")).unwrap();
        fs::write(dir.path().join("2-b.adoc"), adr("B", "Draft", "x")).unwrap();

        let err = build_index(&config_for(dir.path())).unwrap_err();
        assert!(matches!(err, AdrIndexError::InvalidStatus { ref path, .. }
            if path.ends_with("2-b.adoc")));
    }

    #[test]
    fn duplicate_sequences_abort_run() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("1-a.adoc"), adr("A", "Approved", "x")).unwrap();
        fs::write(dir.path().join("1-b.adoc"), adr("B", "Implemented", "y")).unwrap();

        let err = build_index(&config_for(dir.path())).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, AdrIndexError::DuplicateSequence { sequence: 1, .. }));
        assert!(msg.contains("1-a.adoc") && msg.contains("1-b.adoc"));
    }

    #[test]
    fn non_documents_are_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("1-a.adoc"), adr("A", "Approved", "x")).unwrap();
        fs::write(dir.path().join("README.md"), "not an adr").unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts/2-b.adoc"), adr("B", "Draft", "x")).unwrap();

        let result = build_index(&config_for(dir.path())).unwrap();
        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn empty_directory_renders_header_only() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path());
        let result = build_index(&config).unwrap();
        assert!(result.groups.is_empty());

        let out = render_text(&config, &result).unwrap();
        assert!(out.starts_with("# Architecture Decision Records"));
        assert!(!out.contains("##"));
    }

    #[test]
    fn custom_separator_and_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("4_a.txt"), adr("A", "Approved", "x")).unwrap();

        let config = IndexConfig {
            adr_dir: dir.path().to_path_buf(),
            extension: "txt".into(),
            separator: '_',
            template: None,
        };
        let result = build_index(&config).unwrap();
        assert_eq!(result.records[0].sequence_number, 4);
        assert!(render_json_index(&result).unwrap().contains("\"tag\": \"x\""));
    }

    #[test]
    fn missing_template_fails_render() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(dir.path());
        config.template = Some(dir.path().join("missing.j2"));

        let result = build_index(&config).unwrap();
        assert!(matches!(
            render_text(&config, &result),
            Err(AdrIndexError::Io { .. })
        ));
    }
}
