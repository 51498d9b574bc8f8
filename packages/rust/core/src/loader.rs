//! Document discovery and loading.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use adrindex_shared::{AdrIndexError, Result};

/// List the documents in `dir` whose extension is `extension`.
///
/// Not recursive. Subdirectories and other files are skipped. The result is
/// sorted by file name so processing order does not depend on the platform.
#[instrument(skip_all, fields(dir = %dir.display(), extension = %extension))]
pub fn discover_documents(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| AdrIndexError::io(dir, e))?;

    let mut documents = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AdrIndexError::io(dir, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| AdrIndexError::io(entry.path(), e))?;
        if file_type.is_dir() {
            continue;
        }

        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == extension) {
            documents.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-document file");
        }
    }

    documents.sort();
    debug!(count = documents.len(), "documents discovered");
    Ok(documents)
}

/// Read one document's raw text.
pub fn load_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| AdrIndexError::io(path, e))
}
