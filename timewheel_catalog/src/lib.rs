// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme catalog loading for the timeline widget.
//!
//! Catalogs are JSON arrays of themes:
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "name": "Technology",
//!     "period": { "start": 1981, "end": 1985 },
//!     "facts": [{ "year": 1984, "description": "Apple launches the Macintosh." }]
//!   }
//! ]
//! ```
//!
//! Every loader parses the array and validates it into a
//! [`ThemeCatalog`]: the ids must be exactly `1..=n`, in order.
//! [`bundled`] returns the six themes shipped with the crate.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use timewheel_core::catalog::{CatalogError, Theme, ThemeCatalog};

/// The catalog shipped with the crate, as JSON.
pub const BUNDLED_JSON: &str = include_str!("../data/themes.json");

/// Why a catalog could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to open theme catalog {}", .path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// The input is not a JSON array of themes.
    #[error("malformed theme catalog JSON")]
    Json(#[from] serde_json::Error),
    /// The themes parsed but do not form a valid catalog.
    #[error("invalid theme catalog")]
    Invalid(#[from] CatalogError),
}

/// Loads the catalog shipped with the crate.
pub fn bundled() -> Result<ThemeCatalog, LoadError> {
    from_json_str(BUNDLED_JSON)
}

/// Parses a catalog from a JSON string.
pub fn from_json_str(json: &str) -> Result<ThemeCatalog, LoadError> {
    let themes: Vec<Theme> = serde_json::from_str(json)?;
    Ok(ThemeCatalog::new(themes)?)
}

/// Parses a catalog from a reader.
pub fn from_reader<R: io::Read>(reader: R) -> Result<ThemeCatalog, LoadError> {
    let themes: Vec<Theme> = serde_json::from_reader(io::BufReader::new(reader))?;
    Ok(ThemeCatalog::new(themes)?)
}

/// Loads a catalog from a JSON file.
pub fn from_path(path: impl AsRef<Path>) -> Result<ThemeCatalog, LoadError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_reader(file)
}

/// Serializes a catalog back to pretty-printed JSON.
pub fn to_json_string(catalog: &ThemeCatalog) -> Result<String, LoadError> {
    Ok(serde_json::to_string_pretty(catalog.themes())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn bundled_catalog_is_valid() {
        let catalog = bundled().unwrap();
        assert_eq!(catalog.len(), 6);
        for theme in &catalog {
            assert!(!theme.facts.is_empty(), "{} has no facts", theme.name);
            assert!(theme.period.start <= theme.period.end, "{}", theme.name);
            for fact in &theme.facts {
                assert!(
                    (theme.period.start..=theme.period.end).contains(&fact.year),
                    "{} lies outside {}",
                    fact.year,
                    theme.name
                );
            }
        }
    }

    #[test]
    fn round_trips_through_json() {
        let catalog = bundled().unwrap();
        let json = to_json_string(&catalog).unwrap();
        assert_eq!(from_json_str(&json).unwrap(), catalog);
    }

    #[test]
    fn reader_and_str_agree() {
        let loaded = from_reader(BUNDLED_JSON.as_bytes()).unwrap();
        assert_eq!(loaded, bundled().unwrap());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        assert_eq!(err.to_string(), "malformed theme catalog JSON");
        assert!(err.source().is_some());
    }

    #[test]
    fn missing_fields_are_rejected() {
        let err = from_json_str(r#"[{ "id": 1, "name": "No period" }]"#).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn validation_errors_are_wrapped() {
        let err = from_json_str("[]").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(CatalogError::Empty)));

        let json = r#"[
            { "id": 2, "name": "Out of order", "period": { "start": 1, "end": 2 }, "facts": [] }
        ]"#;
        let err = from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(CatalogError::UnexpectedId {
                index: 0,
                expected: 1,
                found: 2
            })
        ));
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("theme at position 0 has id 2, expected 1")
        );
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = from_path("/definitely/not/here/themes.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here/themes.json"));
    }
}
