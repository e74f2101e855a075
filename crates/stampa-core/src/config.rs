/*
 * config.rs
 * Copyright (c) 2026 stampa developers
 */

//! Compiler configuration.
//!
//! [`Options`] is the surface hosts hand us, accepting every historical
//! shape (singular or plural roots and helpers, a format list or a flag
//! map). It normalizes into [`Config`], the one canonical record the rest
//! of the pipeline reads, at the compiler boundary; no component ever sees
//! a raw option. Data-only fields deserialize from JSON plugin config; the
//! partial predicate and a custom precompiler are set programmatically.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::formats::{FormatSet, FormatsOption};
use crate::helpers::{HelperInitStrategy, HelperSpec};
use crate::precompile::Precompiler;

/// Default extension identifying compilable template files.
pub const DEFAULT_TEMPLATE_EXTENSION: &str = ".stp";

/// Default module id of the template runtime imported by generated code.
pub const DEFAULT_RUNTIME_MODULE_ID: &str = "stampa/runtime";

/// Contradictory or incomplete configuration.
///
/// These are fatal before any file is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A custom precompiler was supplied without pinning the runtime module
    /// id; the compiler and runtime versions must match.
    #[error("a custom precompiler requires an explicit runtime module id")]
    MissingRuntimeModuleId,

    /// A format name outside the supported set.
    #[error("unknown format name: {name}")]
    UnknownFormat { name: String },

    /// The `collection` format was requested but no wrapper module id is
    /// configured to convert with.
    #[error("the collection format requires a wrapper module id")]
    CollectionWithoutWrapper,

    /// A helper module id was empty.
    #[error("helper module ids must be non-empty")]
    EmptyHelperId,
}

/// A configuration value accepted as a single item or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Normalize to a list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// Decides whether a template file is a partial, from its base name.
#[derive(Clone)]
pub enum PartialPredicate {
    /// Base name begins with an underscore (the default).
    LeadingUnderscore,
    /// Host-supplied predicate.
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl PartialPredicate {
    /// Evaluate the predicate against a file's base name.
    pub fn matches(&self, base_name: &str) -> bool {
        match self {
            PartialPredicate::LeadingUnderscore => base_name.starts_with('_'),
            PartialPredicate::Custom(predicate) => predicate(base_name),
        }
    }
}

impl Default for PartialPredicate {
    fn default() -> Self {
        PartialPredicate::LeadingUnderscore
    }
}

impl fmt::Debug for PartialPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialPredicate::LeadingUnderscore => f.write_str("LeadingUnderscore"),
            PartialPredicate::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Compiler options as hosts supply them.
///
/// Every field is optional; see [`Config`] for the applied defaults.
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// File extension of compilable templates.
    pub template_extension: Option<String>,

    /// Path prefix(es) stripped from a file's own id before deriving its
    /// partial registration name.
    pub partial_root: Option<OneOrMany<String>>,

    /// Enabled output formats, as a list or legacy flag map.
    pub formats: Option<FormatsOption>,

    /// Module id of a DOM-collection wrapper; configuring one enables the
    /// `collection` format.
    pub wrapper_module_id: Option<String>,

    /// Module id(s) whose default export registers render helpers, invoked
    /// once per build.
    pub helpers: Option<OneOrMany<String>>,

    /// Whether to request and propagate source maps.
    pub source_map: Option<bool>,

    /// Override for the runtime module id generated code imports.
    pub runtime_module_id: Option<String>,

    /// How compiled templates trigger helper initialization.
    pub helper_init: Option<HelperInitStrategy>,

    /// Predicate deciding which templates self-register as partials.
    #[serde(skip)]
    pub is_partial: Option<PartialPredicate>,

    /// Custom toolchain replacing the bundled one. Requires
    /// `runtime_module_id`.
    #[serde(skip)]
    pub precompiler: Option<Arc<dyn Precompiler>>,
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("template_extension", &self.template_extension)
            .field("partial_root", &self.partial_root)
            .field("formats", &self.formats)
            .field("wrapper_module_id", &self.wrapper_module_id)
            .field("helpers", &self.helpers)
            .field("source_map", &self.source_map)
            .field("runtime_module_id", &self.runtime_module_id)
            .field("helper_init", &self.helper_init)
            .field("is_partial", &self.is_partial)
            .field("precompiler", &self.precompiler.as_ref().map(|_| ".."))
            .finish()
    }
}

/// The canonical configuration record, shared read-only across every
/// template compilation in a build.
#[derive(Debug, Clone)]
pub struct Config {
    pub template_extension: String,
    pub partial_roots: Vec<String>,
    pub formats: FormatSet,
    pub wrapper_module_id: Option<String>,
    pub helpers: HelperSpec,
    pub source_map: bool,
    pub runtime_module_id: String,
    pub helper_init: HelperInitStrategy,
    pub is_partial: PartialPredicate,
}

impl Config {
    /// Normalize options into the canonical record.
    ///
    /// The `precompiler` field is validated here (it gates the runtime
    /// module id default) but carried separately by the compiler.
    pub fn from_options(options: Options) -> Result<Config, ConfigError> {
        if options.precompiler.is_some() && options.runtime_module_id.is_none() {
            return Err(ConfigError::MissingRuntimeModuleId);
        }

        let wrapper_module_id = options.wrapper_module_id;
        let formats = FormatSet::from_config(options.formats.as_ref(), wrapper_module_id.is_some())?;

        let helper_ids = options.helpers.map(OneOrMany::into_vec).unwrap_or_default();
        if helper_ids.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyHelperId);
        }

        Ok(Config {
            template_extension: options
                .template_extension
                .unwrap_or_else(|| DEFAULT_TEMPLATE_EXTENSION.to_string()),
            partial_roots: options
                .partial_root
                .map(OneOrMany::into_vec)
                .unwrap_or_default(),
            formats,
            wrapper_module_id,
            helpers: HelperSpec::new(helper_ids),
            source_map: options.source_map.unwrap_or(true),
            runtime_module_id: options
                .runtime_module_id
                .unwrap_or_else(|| DEFAULT_RUNTIME_MODULE_ID.to_string()),
            helper_init: options.helper_init.unwrap_or_default(),
            is_partial: options.is_partial.unwrap_or_default(),
        })
    }
}
