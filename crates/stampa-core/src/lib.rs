/*
 * lib.rs
 * Copyright (c) 2026 stampa developers
 */

//! Template-to-module compilation pipeline for stampa.
//!
//! This crate turns block-structured template source files into standalone
//! ES-module source at build time. A compiled module, when evaluated,
//! renders its template against runtime data and returns the output as a
//! plain string, a single DOM element, a DOM fragment, or a wrapped
//! DOM-collection object, depending on configuration and the render call.
//!
//! The pipeline covers:
//!
//! - static dependency discovery: which partials a template includes
//!   ([`scan`](scan::scan))
//! - format-validity resolution ([`formats`])
//! - exactly-once helper initialization shared across every compiled
//!   template in a build ([`helpers`], [`BuildSession`])
//! - code generation of the output module ([`codegen`])
//!
//! The template-grammar parser and precompiler are external collaborators
//! behind the [`Precompiler`] trait; the host bundler owns module
//! resolution and file access. This crate never executes templates or
//! touches a live DOM — it only synthesizes the code that will later do
//! so.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use stampa_core::{Compiler, Options};
//!
//! let compiler = Compiler::new(Options::default(), Arc::new(toolchain))?;
//!
//! // Per-file transform hook: non-templates pass through as None.
//! if let Some(module) = compiler.transform(text, "/app/greeting.stp")? {
//!     emit(module.code, module.map);
//! }
//!
//! // Module-load hook: serve the generated virtual modules.
//! if let Some(source) = compiler.load(id) {
//!     return source;
//! }
//! ```

pub mod codegen;
pub mod compiler;
pub mod config;
pub mod error;
pub mod formats;
pub mod helpers;
pub mod partials;
pub mod precompile;
pub mod scan;
pub mod session;

// Re-export main types at crate root
pub use codegen::{ModuleDescriptor, generate};
pub use compiler::Compiler;
pub use config::{
    Config, ConfigError, DEFAULT_RUNTIME_MODULE_ID, DEFAULT_TEMPLATE_EXTENSION, OneOrMany,
    Options, PartialPredicate,
};
pub use error::{CompileError, CompileResult, RenderError};
pub use formats::{
    Format, FormatSet, FormatsOption, RenderOptions, SUPPORT_MODULE_ID, resolve_format,
};
pub use helpers::{HELPERS_MODULE_ID, HelperInitStrategy, HelperSpec};
pub use partials::{base_name, resolve_partial_name};
pub use precompile::{
    CompiledTemplate, PrecompileOptions, Precompiler, PrecompilerError, StaticPrecompiler,
};
pub use scan::{DynamicPartial, PartialReference, scan};
pub use session::BuildSession;
