/*
 * map.rs
 * Copyright (c) 2026 stampa developers
 */

//! The JSON source-map carrier.
//!
//! This is the standard v3 source-map shape, serialized with the field names
//! downstream tooling expects (`sourcesContent`, not `sources_content`). The
//! compiler treats the `mappings` string as opaque: it is produced by the
//! external precompiler and remains valid only as long as the generated
//! module keeps the precompiled template expression intact at a single
//! occurrence, which the code generator guarantees.

use serde::{Deserialize, Serialize};

/// Source-map format version emitted and accepted by stampa.
pub const SOURCE_MAP_VERSION: u32 = 3;

/// A v3 source map, carried through the pipeline unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    /// Always [`SOURCE_MAP_VERSION`].
    pub version: u32,

    /// Name of the generated file, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Names of the original source files.
    pub sources: Vec<String>,

    /// Full text of the original sources, parallel to `sources`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<String>>,

    /// Symbol names referenced by the mappings.
    pub names: Vec<String>,

    /// Base64-VLQ mapping data, opaque to this crate.
    pub mappings: String,
}

impl SourceMap {
    /// The empty map: no sources, no mappings.
    ///
    /// Returned for modules compiled without source maps so downstream
    /// consumers always receive a map descriptor, never an absent one.
    pub fn empty() -> Self {
        Self {
            version: SOURCE_MAP_VERSION,
            file: None,
            sources: Vec::new(),
            sources_content: None,
            names: Vec::new(),
            mappings: String::new(),
        }
    }

    /// A map declaring a single original source with no mapping data yet.
    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            sources: vec![source.into()],
            ..Self::empty()
        }
    }

    /// Whether this is the empty map.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.mappings.is_empty()
    }
}

impl Default for SourceMap {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_map() {
        let map = SourceMap::empty();
        assert_eq!(map.version, SOURCE_MAP_VERSION);
        assert!(map.is_empty());
        assert_eq!(map.mappings, "");
    }

    #[test]
    fn test_for_source() {
        let map = SourceMap::for_source("greeting.stp");
        assert_eq!(map.sources, vec!["greeting.stp".to_string()]);
        assert!(!map.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let map = SourceMap {
            sources_content: Some(vec!["Hello {{name}}".to_string()]),
            ..SourceMap::for_source("greeting.stp")
        };
        let json = serde_json::to_value(&map).unwrap();
        assert!(json.get("sourcesContent").is_some());
        assert!(json.get("sources_content").is_none());
        // `file` is omitted entirely when unknown
        assert!(json.get("file").is_none());
    }

    #[test]
    fn test_round_trips_through_json() {
        let map = SourceMap {
            file: Some("greeting.js".to_string()),
            names: vec!["name".to_string()],
            mappings: "AAAA;AACA".to_string(),
            ..SourceMap::for_source("greeting.stp")
        };
        let json = serde_json::to_string(&map).unwrap();
        let back: SourceMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
