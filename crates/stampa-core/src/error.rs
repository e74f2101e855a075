/*
 * error.rs
 * Copyright (c) 2026 stampa developers
 */

//! Error types for the compilation pipeline.
//!
//! Compiler-side errors ([`CompileError`]) are per-file fatal: a failing
//! template produces no partial output, and a multi-file build isolates
//! them so one bad template does not abort unrelated ones (see
//! [`Compiler::transform_all`](crate::Compiler::transform_all)).
//!
//! Render-side failures ([`RenderError`]) are the generated module's
//! responsibility: they are thrown synchronously by the emitted JavaScript.
//! The Rust enum exists so [`resolve_format`](crate::formats::resolve_format)
//! models the same behavior and so tests can hold the emitted message text
//! and the model to the same wording.

use stampa_source_map::{Location, Span};
use thiserror::Error;

use crate::config::ConfigError;
use crate::formats::{
    ELEMENT_CARDINALITY_MSG_PREFIX, ELEMENT_CARDINALITY_MSG_SUFFIX, FRAGMENT_ENVIRONMENT_MSG,
    UNSUPPORTED_FORMAT_MSG_PREFIX,
};

/// Errors raised while compiling template files.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Contradictory or incomplete configuration. Surfaced when the
    /// compiler is constructed, before any file is processed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A partial reference could not be statically resolved.
    #[error("{id}: dynamic partial names are not supported (line {}, column {})", .span.start.row + 1, .span.start.column + 1)]
    DynamicPartial { id: String, span: Span },

    /// Malformed template text, propagated from the parser with the file id
    /// attached.
    #[error("{id}: syntax error: {message}")]
    Syntax {
        id: String,
        message: String,
        location: Option<Location>,
    },

    /// The precompiler rejected a parsed template.
    #[error("{id}: precompile error: {message}")]
    Precompile { id: String, message: String },
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;

/// Failures raised at render time by the generated module.
///
/// The emitted JavaScript throws with exactly this wording; keeping the
/// variants here lets the Rust format model and the code generator share
/// one message vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A render call requested a format not enabled for this build.
    #[error("{}{}", UNSUPPORTED_FORMAT_MSG_PREFIX, .format)]
    UnsupportedFormat { format: String },

    /// A DOM-dependent format is enabled but the executing environment has
    /// no DOM range capability.
    #[error("{}", FRAGMENT_ENVIRONMENT_MSG)]
    FragmentEnvironment,

    /// Element conversion found zero or more than one top-level element.
    #[error("{}{}{}", ELEMENT_CARDINALITY_MSG_PREFIX, .count, ELEMENT_CARDINALITY_MSG_SUFFIX)]
    ElementCardinality { count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use stampa_source_map::Location;

    #[test]
    fn test_dynamic_partial_message_is_one_indexed() {
        let err = CompileError::DynamicPartial {
            id: "page.stp".to_string(),
            span: Span::new(Location::new(12, 2, 4), Location::new(20, 2, 12)),
        };
        assert_eq!(
            err.to_string(),
            "page.stp: dynamic partial names are not supported (line 3, column 5)"
        );
    }

    #[test]
    fn test_syntax_message_carries_file_id() {
        let err = CompileError::Syntax {
            id: "broken.stp".to_string(),
            message: "unclosed block".to_string(),
            location: Some(Location::new(5, 0, 5)),
        };
        assert_eq!(err.to_string(), "broken.stp: syntax error: unclosed block");
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = RenderError::UnsupportedFormat {
            format: "fragment".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported format: fragment");
    }

    #[test]
    fn test_element_cardinality_message() {
        let err = RenderError::ElementCardinality { count: 3 };
        assert_eq!(
            err.to_string(),
            "element format produced 3 top-level elements, expected exactly one"
        );
    }
}
