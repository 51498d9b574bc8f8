//! Filename → sequence number.
//!
//! Kept behind [`SequenceScheme`] so another naming convention can replace
//! the default without touching extraction or validation.

use std::path::Path;

use adrindex_shared::{AdrIndexError, Result};

/// Derives an ADR's sequence number from its path.
pub trait SequenceScheme {
    /// Return the positive sequence number encoded in `path`.
    fn sequence(&self, path: &Path) -> Result<u64>;
}

/// `<number><sep><slug>.<ext>`, e.g. `12-use-postgres.adoc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadingNumber {
    pub separator: char,
}

impl Default for LeadingNumber {
    fn default() -> Self {
        Self { separator: '-' }
    }
}

impl SequenceScheme for LeadingNumber {
    fn sequence(&self, path: &Path) -> Result<u64> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut segments = stem.split(self.separator);
        let first = segments.next().unwrap_or_default();
        if segments.next().is_none() {
            return Err(AdrIndexError::InvalidFilename {
                path: path.to_path_buf(),
                stem,
            });
        }

        match first.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(AdrIndexError::InvalidSequence {
                path: path.to_path_buf(),
                segment: first.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(name: &str) -> Result<u64> {
        LeadingNumber::default().sequence(Path::new(name))
    }

    #[test]
    fn parses_leading_segment() {
        assert_eq!(seq("adr/2-adopt-x.adoc").unwrap(), 2);
        assert_eq!(seq("0042-use-postgres.adoc").unwrap(), 42);
        assert_eq!(seq("7-.adoc").unwrap(), 7);
    }

    #[test]
    fn accepts_numbers_wider_than_32_bits() {
        assert_eq!(seq("5000000000-x.adoc").unwrap(), 5_000_000_000);
        assert!(matches!(
            seq("99999999999999999999-x.adoc"),
            Err(AdrIndexError::InvalidSequence { .. })
        ));
    }

    #[test]
    fn single_segment_is_invalid_filename() {
        let err = seq("adr/README.adoc").unwrap_err();
        assert!(matches!(err, AdrIndexError::InvalidFilename { ref stem, .. } if stem == "README"));
        assert!(matches!(seq("12.adoc"), Err(AdrIndexError::InvalidFilename { .. })));
    }

    #[test]
    fn non_numeric_or_zero_is_invalid_sequence() {
        let err = seq("adr/draft-idea.adoc").unwrap_err();
        assert!(
            matches!(err, AdrIndexError::InvalidSequence { ref segment, .. } if segment == "draft")
        );
        assert!(matches!(seq("0-zero.adoc"), Err(AdrIndexError::InvalidSequence { .. })));
        assert!(matches!(seq("-3-neg.adoc"), Err(AdrIndexError::InvalidSequence { .. })));
        assert!(matches!(seq("1x-a.adoc"), Err(AdrIndexError::InvalidSequence { .. })));
    }

    #[test]
    fn custom_separator() {
        let scheme = LeadingNumber { separator: '_' };
        assert_eq!(scheme.sequence(Path::new("3_use_grpc.adoc")).unwrap(), 3);
        assert!(matches!(
            scheme.sequence(Path::new("3-use-grpc.adoc")),
            Err(AdrIndexError::InvalidFilename { .. })
        ));
    }
}
