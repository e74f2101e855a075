/*
 * helpers.rs
 * Copyright (c) 2026 stampa developers
 */

//! Helper-initialization module synthesis.
//!
//! Helper modules extend the template runtime; each exports a registration
//! function that must run exactly once per process no matter how many
//! compiled templates want it. This module synthesizes one shared virtual
//! module that imports every configured helper and invokes it behind an
//! explicit per-helper registry keyed by module id. Re-running a
//! registration is observably different from running it once (helpers
//! double-register), so the guard is the component's central invariant,
//! not an optimization.
//!
//! Two strategies, selected by configuration:
//!
//! - [`HelperInitStrategy::Eager`]: the module registers everything as a
//!   side effect of being imported; every template imports it
//!   unconditionally.
//! - [`HelperInitStrategy::Inline`]: the module exports the initializer,
//!   and each template calls it immediately before constructing its
//!   template object. An unused template then keeps no live reference to
//!   the initializer, letting a bundler's dead-code elimination drop it
//!   along with its imports.

use serde::Deserialize;

use crate::codegen::{ExportDecl, Import, ModuleIr, Stmt, js_string};
use crate::session::BuildSession;

/// Module id under which the generated helper-init module is served.
pub const HELPERS_MODULE_ID: &str = "\0stampa-helpers.js";

/// Ordered list of helper module ids for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelperSpec {
    ids: Vec<String>,
}

impl HelperSpec {
    /// Create a spec from helper module ids, preserving order.
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    /// The helper module ids, in configured order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Whether no helpers are configured.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of configured helpers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// How compiled templates trigger helper initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelperInitStrategy {
    /// Registration runs as an import side effect.
    #[default]
    Eager,
    /// Templates call the exported initializer before instantiation.
    Inline,
}

/// Synthesize the helper-init module and record the emitted helpers in the
/// session registry.
///
/// The session is only marked after the module text is fully built, so an
/// aborted generation never leaves helpers spuriously marked.
pub fn helper_module_source(
    helpers: &HelperSpec,
    strategy: HelperInitStrategy,
    runtime_module_id: &str,
    session: &BuildSession,
) -> String {
    tracing::debug!(
        helpers = helpers.len(),
        ?strategy,
        "generating helper init module"
    );

    let mut ir = ModuleIr::new();
    ir.imports.push(Import::Default {
        local: "Runtime".to_string(),
        specifier: runtime_module_id.to_string(),
    });
    for (index, id) in helpers.ids().iter().enumerate() {
        ir.imports.push(Import::Default {
            local: format!("helper{index}"),
            specifier: id.clone(),
        });
    }

    ir.statements.push(Stmt::Raw(
        "var initialized = Object.create(null);".to_string(),
    ));
    let mut body = String::from("function initialize() {\n");
    for (index, id) in helpers.ids().iter().enumerate() {
        let key = js_string(id);
        body.push_str(&format!(
            "  if (!initialized[{key}]) {{\n    helper{index}(Runtime);\n    initialized[{key}] = true;\n  }}\n"
        ));
    }
    body.push_str("  return Runtime;\n}");
    ir.statements.push(Stmt::Raw(body));

    match strategy {
        HelperInitStrategy::Eager => {
            ir.statements.push(Stmt::Raw("initialize();".to_string()));
        }
        HelperInitStrategy::Inline => {
            ir.exports
                .push(ExportDecl::Raw("export default initialize;".to_string()));
        }
    }

    let source = ir.render();
    for id in helpers.ids() {
        session.mark_initialized(id);
    }
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spec(ids: &[&str]) -> HelperSpec {
        HelperSpec::new(ids.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_eager_module_registers_on_import() {
        let session = BuildSession::new();
        let source = helper_module_source(
            &spec(&["app/date.js"]),
            HelperInitStrategy::Eager,
            "stampa/runtime",
            &session,
        );
        assert!(source.contains("import Runtime from 'stampa/runtime';"));
        assert!(source.contains("import helper0 from 'app/date.js';"));
        assert!(source.contains("if (!initialized['app/date.js'])"));
        assert!(source.contains("initialize();"));
        assert!(!source.contains("export default"));
    }

    #[test]
    fn test_inline_module_exports_initializer() {
        let session = BuildSession::new();
        let source = helper_module_source(
            &spec(&["app/date.js"]),
            HelperInitStrategy::Inline,
            "stampa/runtime",
            &session,
        );
        assert!(source.contains("export default initialize;"));
        assert!(!source.contains("\ninitialize();"));
    }

    #[test]
    fn test_helpers_registered_in_configured_order() {
        let session = BuildSession::new();
        let source = helper_module_source(
            &spec(&["b.js", "a.js"]),
            HelperInitStrategy::Eager,
            "stampa/runtime",
            &session,
        );
        let b = source.find("helper0(Runtime)").unwrap();
        let a = source.find("helper1(Runtime)").unwrap();
        assert!(b < a);
        assert!(source.find("import helper0 from 'b.js';").unwrap() < a);
    }

    #[test]
    fn test_generation_marks_session_once() {
        let session = BuildSession::new();
        let first = helper_module_source(
            &spec(&["app/date.js"]),
            HelperInitStrategy::Eager,
            "stampa/runtime",
            &session,
        );
        assert!(session.is_initialized("app/date.js"));

        // A second request in the same build is idempotent.
        let second = helper_module_source(
            &spec(&["app/date.js"]),
            HelperInitStrategy::Eager,
            "stampa/runtime",
            &session,
        );
        assert_eq!(first, second);
        assert_eq!(session.initialized_helpers(), vec!["app/date.js"]);
    }

    #[test]
    fn test_no_helpers_still_yields_runtime_initializer() {
        let session = BuildSession::new();
        let source = helper_module_source(
            &HelperSpec::default(),
            HelperInitStrategy::Inline,
            "stampa/runtime",
            &session,
        );
        assert!(source.contains("function initialize() {\n  return Runtime;\n}"));
        assert!(session.initialized_helpers().is_empty());
    }

    #[test]
    fn test_specifier_escaping() {
        let session = BuildSession::new();
        let source = helper_module_source(
            &spec(&["C:\\helpers\\date.js"]),
            HelperInitStrategy::Eager,
            "stampa/runtime",
            &session,
        );
        assert!(source.contains("import helper0 from 'C:\\\\helpers\\\\date.js';"));
        assert!(source.contains("initialized['C:\\\\helpers\\\\date.js']"));
    }
}
