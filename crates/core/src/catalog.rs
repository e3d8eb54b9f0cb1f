use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::intent::ReservedIntent;
use crate::responses;

pub const REQUIRED_ENTRIES: [ReservedIntent; 3] = ReservedIntent::ALL;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is missing required entry `{0}`")]
    MissingEntry(&'static str),
    #[error("duplicate catalog entry `{0}`")]
    DuplicateEntry(String),
    #[error("catalog entry names must not be empty")]
    EmptyName,
    #[error("catalog entry `{0}` must map to a string")]
    InvalidText(String),
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Zero-argument producer of a response payload.
#[derive(Clone)]
pub enum ResponseHandler {
    Builtin(fn() -> &'static str),
    Text(Arc<str>),
}

impl ResponseHandler {
    pub fn text(value: impl Into<Arc<str>>) -> Self {
        Self::Text(value.into())
    }

    pub fn respond(&self) -> String {
        match self {
            Self::Builtin(handler) => handler().to_string(),
            Self::Text(text) => text.to_string(),
        }
    }
}

impl fmt::Debug for ResponseHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(_) => f.write_str("Builtin(..)"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
        }
    }
}

/// Immutable table from lowercase intent name to response handler.
#[derive(Debug, Clone)]
pub struct ResponseCatalog {
    entries: BTreeMap<String, ResponseHandler>,
}

impl ResponseCatalog {
    pub fn builtin() -> Self {
        let table: [(&str, fn() -> &'static str); 6] = [
            ("launch", responses::launch),
            ("help", responses::help),
            ("end", responses::end),
            ("about", responses::about),
            ("contact", responses::contact),
            ("upcoming", responses::upcoming),
        ];

        Self {
            entries: table
                .into_iter()
                .map(|(name, handler)| (name.to_string(), ResponseHandler::Builtin(handler)))
                .collect(),
        }
    }

    pub fn from_entries<I, K>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (K, ResponseHandler)>,
        K: AsRef<str>,
    {
        let mut table = BTreeMap::new();
        for (name, handler) in entries {
            let key = name.as_ref().trim().to_lowercase();
            if key.is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if table.insert(key.clone(), handler).is_some() {
                return Err(CatalogError::DuplicateEntry(key));
            }
        }

        for required in REQUIRED_ENTRIES {
            if !table.contains_key(required.as_str()) {
                return Err(CatalogError::MissingEntry(required.as_str()));
            }
        }

        Ok(Self { entries: table })
    }

    /// Builds a catalog from a flat `{ "name": "text" }` object.
    pub fn from_json_str(input: &str) -> Result<Self, CatalogError> {
        let object: Map<String, Value> = serde_json::from_str(input)?;
        let mut entries = Vec::with_capacity(object.len());
        for (name, value) in object {
            match value {
                Value::String(text) => entries.push((name, ResponseHandler::text(text))),
                _ => return Err(CatalogError::InvalidText(name)),
            }
        }
        Self::from_entries(entries)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn lookup(&self, name: &str) -> Option<&ResponseHandler> {
        self.entries
            .get(name)
            .or_else(|| self.entries.get(&name.to_lowercase()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResponseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_required_and_fact_entries() {
        let catalog = ResponseCatalog::builtin();
        for required in REQUIRED_ENTRIES {
            assert!(catalog.contains(required.as_str()));
        }
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(
            names,
            vec!["about", "contact", "end", "help", "launch", "upcoming"]
        );
    }

    #[test]
    fn handlers_are_deterministic() {
        let catalog = ResponseCatalog::builtin();
        let handler = catalog.lookup("contact").unwrap();
        assert_eq!(handler.respond(), handler.respond());
        assert!(handler.respond().starts_with("<speak>"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = ResponseCatalog::builtin();
        assert!(catalog.lookup("About").is_some());
        assert!(catalog.lookup("unknown").is_none());
    }

    #[test]
    fn json_catalog_requires_reserved_entries() {
        let error = ResponseCatalog::from_json_str(r#"{"launch": "a", "help": "b"}"#).unwrap_err();
        assert!(matches!(error, CatalogError::MissingEntry("end")));
    }

    #[test]
    fn json_catalog_rejects_case_folded_duplicates() {
        let error = ResponseCatalog::from_json_str(
            r#"{"launch": "a", "help": "b", "end": "c", "About": "d", "about": "e"}"#,
        )
        .unwrap_err();
        assert!(matches!(error, CatalogError::DuplicateEntry(name) if name == "about"));
    }

    #[test]
    fn json_catalog_rejects_non_string_text() {
        let error = ResponseCatalog::from_json_str(r#"{"launch": 1}"#).unwrap_err();
        assert!(matches!(error, CatalogError::InvalidText(name) if name == "launch"));
    }

    #[test]
    fn json_catalog_passes_markup_through_unchanged() {
        let catalog = ResponseCatalog::from_json_str(
            r#"{"launch": "a", "help": "b", "end": "<speak.Bye </speak>"}"#,
        )
        .unwrap();
        assert_eq!(catalog.lookup("end").unwrap().respond(), "<speak.Bye </speak>");
    }

    #[test]
    fn missing_file_reports_path() {
        let error = ResponseCatalog::from_json_file("/nonexistent/catalog.json").unwrap_err();
        assert!(error.to_string().contains("/nonexistent/catalog.json"));
    }
}
