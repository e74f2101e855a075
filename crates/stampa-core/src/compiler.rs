/*
 * compiler.rs
 * Copyright (c) 2026 stampa developers
 */

//! The per-file compilation entry point.
//!
//! A [`Compiler`] is one build's view of the pipeline: the canonical
//! configuration, the precompiler toolchain, and the shared
//! [`BuildSession`]. Compiling independent templates is side-effect-free
//! and may proceed concurrently; the session registry is the only shared
//! mutable state. Hosts wire [`Compiler::transform`] into their per-file
//! transform hook and [`Compiler::load`] into their module-load hook so
//! the two virtual modules resolve.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::codegen::{ModuleDescriptor, generate};
use crate::config::{Config, Options};
use crate::error::{CompileError, CompileResult};
use crate::formats::{SUPPORT_MODULE_ID, support_module_source};
use crate::helpers::{HELPERS_MODULE_ID, helper_module_source};
use crate::partials::base_name;
use crate::precompile::{PrecompileOptions, Precompiler};
use crate::scan::scan;
use crate::session::BuildSession;

/// One build's compilation pipeline.
pub struct Compiler {
    config: Config,
    precompiler: Arc<dyn Precompiler>,
    session: Arc<BuildSession>,
}

impl Compiler {
    /// Create a compiler with a fresh build session.
    ///
    /// `bundled` is the toolchain used when the options name no custom
    /// precompiler. Configuration errors surface here, before any file is
    /// processed.
    pub fn new(options: Options, bundled: Arc<dyn Precompiler>) -> CompileResult<Self> {
        Self::with_session(options, bundled, Arc::new(BuildSession::new()))
    }

    /// Create a compiler sharing an existing build session.
    ///
    /// Concurrent builds must not share a session; this is for hosts that
    /// construct several compilers within one build invocation.
    pub fn with_session(
        options: Options,
        bundled: Arc<dyn Precompiler>,
        session: Arc<BuildSession>,
    ) -> CompileResult<Self> {
        let precompiler = options.precompiler.clone().unwrap_or(bundled);
        let config = Config::from_options(options)?;
        Ok(Self {
            config,
            precompiler,
            session,
        })
    }

    /// The canonical configuration for this build.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The build session owning the helper registry.
    pub fn session(&self) -> &Arc<BuildSession> {
        &self.session
    }

    /// Compile one template file.
    ///
    /// Returns `Ok(None)` when `id` does not end with the configured
    /// template extension, leaving the file untouched. Otherwise runs
    /// parse → scan → precompile → generate and returns the module
    /// descriptor. All failures are per-file fatal: no partial output is
    /// produced for a failing file.
    pub fn transform(&self, text: &str, id: &str) -> CompileResult<Option<ModuleDescriptor>> {
        if !id.ends_with(&self.config.template_extension) {
            return Ok(None);
        }
        tracing::debug!(id, "compiling template");

        let precompile_options = PrecompileOptions {
            source_map: self.config.source_map,
            source_name: self
                .config
                .source_map
                .then(|| base_name(id).to_string()),
        };

        let ast = self
            .precompiler
            .parse(text, &precompile_options)
            .map_err(|err| CompileError::Syntax {
                id: id.to_string(),
                message: err.message,
                location: err.location,
            })?;

        // Dependency discovery happens before precompilation so dynamic
        // partials fail without invoking the precompiler at all.
        let partials = scan(&ast).map_err(|err| CompileError::DynamicPartial {
            id: id.to_string(),
            span: err.span,
        })?;
        tracing::trace!(id, partials = partials.len(), "scanned partial references");

        let compiled = self
            .precompiler
            .precompile(&ast, &precompile_options)
            .map_err(|err| CompileError::Precompile {
                id: id.to_string(),
                message: err.message,
            })?;

        Ok(Some(generate(&compiled, &partials, &self.config, id)))
    }

    /// Serve the generated virtual modules by their reserved ids.
    ///
    /// Returns `None` for any other id so hosts can chain their own
    /// resolution.
    pub fn load(&self, id: &str) -> Option<String> {
        match id {
            HELPERS_MODULE_ID => {
                tracing::debug!(id, "generating helper init module");
                Some(helper_module_source(
                    &self.config.helpers,
                    self.config.helper_init,
                    &self.config.runtime_module_id,
                    &self.session,
                ))
            }
            SUPPORT_MODULE_ID => {
                tracing::debug!(id, "generating runtime support module");
                Some(support_module_source(
                    self.config.formats,
                    self.config.wrapper_module_id.as_deref(),
                ))
            }
            _ => None,
        }
    }

    /// Compile many files, isolating per-file failures.
    ///
    /// One bad template never aborts compilation of unrelated templates;
    /// each entry carries its own result, keyed by id in input order.
    pub fn transform_all<'a>(
        &self,
        files: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> IndexMap<String, CompileResult<Option<ModuleDescriptor>>> {
        files
            .into_iter()
            .map(|(text, id)| (id.to_string(), self.transform(text, id)))
            .collect()
    }
}
