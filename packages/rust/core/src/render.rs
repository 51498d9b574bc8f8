//! Index rendering.
//!
//! Feeds the tag index to a `minijinja` layout. The layout sees:
//! - `groups`: the [`TagGroup`]s in index order
//! - `records`: every record ascending by sequence number
//!
//! Two filters replace the built-ins: `join` joins a list with `", "` unless
//! given a separator, and `title` upper-cases the first letter of each word
//! without touching the rest.

use std::path::Path;

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use tracing::{debug, instrument};

use adrindex_shared::{AdrIndexError, AdrRecord, Result, TagGroup};

/// Layout used when no template file is configured.
pub const DEFAULT_LAYOUT: &str = include_str!("../templates/index.md.j2");

#[derive(Serialize)]
struct IndexContext<'a> {
    groups: &'a [TagGroup],
    records: &'a [AdrRecord],
}

/// Renders the index through a layout.
#[derive(Debug)]
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("join", join_filter);
        env.add_filter("title", title_filter);
        Self { env }
    }

    /// Render `layout` with the tag index and the sequence-ordered records.
    #[instrument(skip_all, fields(groups = groups.len(), records = records.len()))]
    pub fn render(
        &self,
        layout: &str,
        groups: &[TagGroup],
        records: &[AdrRecord],
    ) -> Result<String> {
        let output = self
            .env
            .render_str(layout, IndexContext { groups, records })
            .map_err(|e| AdrIndexError::Render(format!("{e:#}")))?;

        debug!(len = output.len(), "index rendered");
        Ok(output)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a layout file, or fall back to [`DEFAULT_LAYOUT`] when `path` is `None`.
pub fn load_layout(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| AdrIndexError::io(path, e)),
        None => Ok(DEFAULT_LAYOUT.to_string()),
    }
}

/// Serialize the tag index as pretty JSON.
pub fn render_json(groups: &[TagGroup]) -> Result<String> {
    serde_json::to_string_pretty(groups).map_err(|e| AdrIndexError::Render(e.to_string()))
}

fn join_filter(items: Vec<String>, sep: Option<String>) -> String {
    items.join(sep.as_deref().unwrap_or(", "))
}

fn title_filter(value: String) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = is_word_separator(c);
    }
    out
}

/// ASCII punctuation and whitespace end a word; `_` and non-ASCII
/// punctuation do not.
fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        !(c.is_ascii_alphanumeric() || c == '_')
    } else if c.is_alphanumeric() {
        false
    } else {
        c.is_whitespace()
    }
}
