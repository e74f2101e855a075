/*
 * codegen.rs
 * Copyright (c) 2026 stampa developers
 */

//! Module source generation.
//!
//! Generated modules are assembled through a small structured form — an
//! ordered import list, an ordered statement list, and an export list —
//! rendered by one serializer that owns all string escaping. Nothing else
//! in the crate builds JavaScript string literals by hand.
//!
//! The template-instantiation expression embeds the precompiler's output
//! verbatim and exactly once: the precompiler's source map assumes a
//! single, first occurrence of that text in the output, so the serializer
//! must never split or duplicate it.

use stampa_source_map::SourceMap;

use crate::config::Config;
use crate::formats::{Format, SUPPORT_MODULE_ID};
use crate::helpers::{HELPERS_MODULE_ID, HelperInitStrategy};
use crate::partials::{base_name, resolve_partial_name};
use crate::precompile::CompiledTemplate;
use crate::scan::PartialReference;

/// The final output handed back per compiled file.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDescriptor {
    /// The generated module source.
    pub code: String,
    /// The precompiler's map, or the empty map when none was requested.
    pub map: SourceMap,
}

/// Serialize a string as a single-quoted JavaScript literal.
pub(crate) fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            // Virtual module ids lead with NUL; keep the emitted source
            // printable.
            '\0' => out.push_str("\\u0000"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

/// An import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Import {
    /// `import 'specifier';`
    SideEffect { specifier: String },
    /// `import local from 'specifier';`
    Default { local: String, specifier: String },
    /// `import { a, b } from 'specifier';`
    Named {
        names: Vec<String>,
        specifier: String,
    },
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Stmt {
    /// The template-instantiation expression. `receiver` is the runtime
    /// binding, or an initializer call that returns it.
    TemplateDecl { receiver: String, code: String },
    /// Self-registration of a partial under its derived name.
    RegisterPartial { name: String },
    /// Pre-rendered statement text.
    Raw(String),
}

/// An export declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExportDecl {
    /// The default render function implementing the full call contract.
    DefaultRender,
    /// A named per-format render function with the format fixed.
    FormatFn(Format),
    /// Pre-rendered export text.
    Raw(String),
}

/// Structured form of one generated module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ModuleIr {
    pub imports: Vec<Import>,
    pub statements: Vec<Stmt>,
    pub exports: Vec<ExportDecl>,
}

impl ModuleIr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render to module source. Imports, then statements, then exports,
    /// each in insertion order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for import in &self.imports {
            match import {
                Import::SideEffect { specifier } => {
                    out.push_str(&format!("import {};\n", js_string(specifier)));
                }
                Import::Default { local, specifier } => {
                    out.push_str(&format!("import {local} from {};\n", js_string(specifier)));
                }
                Import::Named { names, specifier } => {
                    out.push_str(&format!(
                        "import {{ {} }} from {};\n",
                        names.join(", "),
                        js_string(specifier)
                    ));
                }
            }
        }
        for statement in &self.statements {
            match statement {
                Stmt::TemplateDecl { receiver, code } => {
                    out.push_str(&format!(
                        "var Template = /*#__PURE__*/{receiver}.template({code});\n"
                    ));
                }
                Stmt::RegisterPartial { name } => {
                    out.push_str(&format!(
                        "Runtime.registerPartial({}, Template);\n",
                        js_string(name)
                    ));
                }
                Stmt::Raw(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
        for export in &self.exports {
            match export {
                ExportDecl::DefaultRender => {
                    out.push_str(
                        "export default function (data, options, asString) {\n  \
                           var resolved = getFormat(options, asString);\n  \
                           return converters[resolved[1]](Template(data, resolved[0]));\n\
                         }\n",
                    );
                }
                ExportDecl::FormatFn(Format::String) => {
                    out.push_str(
                        "export function string(data, options) {\n  \
                           return Template(data, options);\n\
                         }\n",
                    );
                }
                ExportDecl::FormatFn(format) => {
                    let name = format.name();
                    out.push_str(&format!(
                        "export function {name}(data, options) {{\n  \
                           return converters.{name}(Template(data, options));\n\
                         }}\n"
                    ));
                }
                ExportDecl::Raw(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Compose the final module for one template.
///
/// Emission order: runtime import, helper-init import (or inline
/// initializer wrap), one import per partial reference (raw name plus the
/// template extension — root-stripping applies only to the template's own
/// id), the template instantiation, optional partial self-registration,
/// the default export, and one named export per enabled format.
pub fn generate(
    compiled: &CompiledTemplate,
    partials: &[PartialReference],
    config: &Config,
    self_id: &str,
) -> ModuleDescriptor {
    let mut ir = ModuleIr::new();

    ir.imports.push(Import::Default {
        local: "Runtime".to_string(),
        specifier: config.runtime_module_id.clone(),
    });

    let receiver = if config.helpers.is_empty() {
        "Runtime".to_string()
    } else {
        match config.helper_init {
            HelperInitStrategy::Eager => {
                ir.imports.push(Import::SideEffect {
                    specifier: HELPERS_MODULE_ID.to_string(),
                });
                "Runtime".to_string()
            }
            HelperInitStrategy::Inline => {
                ir.imports.push(Import::Default {
                    local: "initHelpers".to_string(),
                    specifier: HELPERS_MODULE_ID.to_string(),
                });
                "initHelpers()".to_string()
            }
        }
    };

    ir.imports.push(Import::Named {
        names: vec!["getFormat".to_string(), "converters".to_string()],
        specifier: SUPPORT_MODULE_ID.to_string(),
    });

    for partial in partials {
        ir.imports.push(Import::SideEffect {
            specifier: format!("{}{}", partial.raw_name, config.template_extension),
        });
    }

    ir.statements.push(Stmt::TemplateDecl {
        receiver,
        code: compiled.code.clone(),
    });

    if config.is_partial.matches(base_name(self_id)) {
        ir.statements.push(Stmt::RegisterPartial {
            name: resolve_partial_name(self_id, &config.partial_roots, &config.template_extension),
        });
    }

    ir.exports.push(ExportDecl::DefaultRender);
    for format in config.formats.enabled() {
        ir.exports.push(ExportDecl::FormatFn(format));
    }

    ModuleDescriptor {
        code: ir.render(),
        map: compiled.map.clone().unwrap_or_else(SourceMap::empty),
    }
}
