/*
 * precompile.rs
 * Copyright (c) 2026 stampa developers
 */

//! Interface to the external parser and precompiler.
//!
//! The template-grammar toolchain is a black box to this crate: text plus
//! options produce an AST, and an AST plus options produce compiled
//! template code with an optional source map. Hosts supply an
//! implementation of [`Precompiler`]; the pipeline wraps its failures into
//! per-file [`CompileError`](crate::CompileError)s with the file id
//! attached and never masks them.

use std::collections::HashMap;

use stampa_ast::TemplateAst;
use stampa_source_map::{Location, SourceMap};
use thiserror::Error;

/// Options passed to both parse and precompile steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecompileOptions {
    /// Whether to produce a source map alongside the compiled code.
    pub source_map: bool,

    /// Name the map declares for the original source. When unset and a map
    /// is requested, the pipeline fills in the template file's base name.
    pub source_name: Option<String>,
}

/// The precompiler's output for one template.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    /// A JavaScript expression evaluating to the template spec. The code
    /// generator embeds it verbatim, exactly once.
    pub code: String,

    /// Source map for `code`, present when requested.
    pub map: Option<SourceMap>,
}

/// A failure reported by the external toolchain.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct PrecompilerError {
    /// Human-readable description.
    pub message: String,
    /// Position in the template source, when the toolchain knows it.
    pub location: Option<Location>,
}

impl PrecompilerError {
    /// Create an error with no position information.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Create an error pointing at a source location.
    pub fn at(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location: Some(location),
        }
    }
}

/// The external template toolchain: parser plus precompiler.
///
/// Implementations may be backed by a native grammar, a scripting runtime,
/// or canned data (see [`StaticPrecompiler`]). Either step may fail; the
/// pipeline propagates failures without masking them. Implementations must
/// be `Send + Sync` because independent templates may compile concurrently.
pub trait Precompiler: Send + Sync {
    /// Parse template text into an AST.
    fn parse(&self, text: &str, options: &PrecompileOptions)
    -> Result<TemplateAst, PrecompilerError>;

    /// Compile a parsed AST into directly executable template code.
    fn precompile(
        &self,
        ast: &TemplateAst,
        options: &PrecompileOptions,
    ) -> Result<CompiledTemplate, PrecompilerError>;
}

/// A precompiler backed by an in-memory table of registered templates.
///
/// Useful for tests and for scenarios where the real toolchain is not
/// available: `parse` looks the source text up in the table, and
/// `precompile` emits a deterministic placeholder expression. Unregistered
/// text fails the way a real parser fails on malformed input.
#[derive(Debug, Default)]
pub struct StaticPrecompiler {
    templates: HashMap<String, TemplateAst>,
}

impl StaticPrecompiler {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Register a template source with its parsed form.
    pub fn add(&mut self, text: impl Into<String>, ast: TemplateAst) -> &mut Self {
        self.templates.insert(text.into(), ast);
        self
    }

    /// Create a table with the given templates.
    pub fn with_templates(
        templates: impl IntoIterator<Item = (impl Into<String>, TemplateAst)>,
    ) -> Self {
        let mut precompiler = Self::new();
        for (text, ast) in templates {
            precompiler.add(text, ast);
        }
        precompiler
    }
}

impl Precompiler for StaticPrecompiler {
    fn parse(
        &self,
        text: &str,
        _options: &PrecompileOptions,
    ) -> Result<TemplateAst, PrecompilerError> {
        self.templates
            .get(text)
            .cloned()
            .ok_or_else(|| PrecompilerError::new("unrecognized template text"))
    }

    fn precompile(
        &self,
        ast: &TemplateAst,
        options: &PrecompileOptions,
    ) -> Result<CompiledTemplate, PrecompilerError> {
        let map = options.source_map.then(|| SourceMap {
            mappings: "AAAA".to_string(),
            ..SourceMap::for_source(options.source_name.clone().unwrap_or_default())
        });
        Ok(CompiledTemplate {
            code: format!("{{\"nodes\":{}}}", ast.body.len()),
            map,
        })
    }
}
