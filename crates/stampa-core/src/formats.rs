/*
 * formats.rs
 * Copyright (c) 2026 stampa developers
 */

//! Output-format registry.
//!
//! A build statically supports a fixed set of output formats, computed once
//! from configuration ([`FormatSet`]). At render time the generated module
//! picks one per call; [`resolve_format`] is the Rust model of that
//! per-call logic, and [`support_module_source`] synthesizes the shared
//! runtime module whose `getFormat` mirrors it. The format flags are
//! emitted as boolean literals so a bundler's dead-code elimination can
//! drop the conversion paths a build never enables.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codegen::{ExportDecl, Import, ModuleIr, Stmt, js_string};
use crate::config::ConfigError;
use crate::error::RenderError;

/// Module id under which the generated runtime support module is served.
///
/// The leading NUL marks it as virtual, keeping it out of the way of real
/// file resolution the way bundler plugin conventions expect.
pub const SUPPORT_MODULE_ID: &str = "\0stampa-support.js";

pub(crate) const UNSUPPORTED_FORMAT_MSG_PREFIX: &str = "unsupported format: ";
pub(crate) const FRAGMENT_ENVIRONMENT_MSG: &str =
    "element or fragment output enabled, but no DOM range capability is available";
pub(crate) const ELEMENT_CARDINALITY_MSG_PREFIX: &str = "element format produced ";
pub(crate) const ELEMENT_CARDINALITY_MSG_SUFFIX: &str = " top-level elements, expected exactly one";

/// An output representation of a rendered template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// The rendered markup itself.
    String,
    /// A single DOM element.
    Element,
    /// A DOM document fragment.
    Fragment,
    /// A wrapped DOM-collection object.
    Collection,
}

impl Format {
    /// Every format, in the order named exports are emitted.
    pub const ALL: [Format; 4] = [
        Format::String,
        Format::Element,
        Format::Fragment,
        Format::Collection,
    ];

    /// The format's name as it appears in configuration, render options,
    /// and generated exports.
    pub fn name(self) -> &'static str {
        match self {
            Format::String => "string",
            Format::Element => "element",
            Format::Fragment => "fragment",
            Format::Collection => "collection",
        }
    }

    /// Parse a format name.
    pub fn parse(name: &str) -> Option<Format> {
        match name {
            "string" => Some(Format::String),
            "element" => Some(Format::Element),
            "fragment" => Some(Format::Fragment),
            "collection" => Some(Format::Collection),
            _ => None,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The `formats` configuration option, in either accepted shape.
///
/// An explicit list (`["element", "fragment"]`) and the legacy per-format
/// flag map (`{"element": true}`) normalize identically.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FormatsOption {
    /// Explicit list of enabled format names.
    List(Vec<String>),
    /// Legacy per-format boolean flags; only `true` entries enable.
    Flags(IndexMap<String, bool>),
}

/// The fixed set of output formats a build supports.
///
/// `string` is always enabled and has no flag here; the other three are
/// derived once from configuration and never change for a given build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSet {
    element: bool,
    fragment: bool,
    collection: bool,
}

impl FormatSet {
    /// Compute the format set from configuration.
    ///
    /// `wrapper_configured` enables `collection` independently of the
    /// explicit list; listing `collection` without a wrapper module is a
    /// configuration error because there would be nothing to convert with.
    pub fn from_config(
        formats: Option<&FormatsOption>,
        wrapper_configured: bool,
    ) -> Result<FormatSet, ConfigError> {
        let mut set = FormatSet {
            element: false,
            fragment: false,
            collection: wrapper_configured,
        };

        let enable = |set: &mut FormatSet, name: &str| -> Result<(), ConfigError> {
            match Format::parse(name) {
                Some(Format::String) => Ok(()),
                Some(Format::Element) => {
                    set.element = true;
                    Ok(())
                }
                Some(Format::Fragment) => {
                    set.fragment = true;
                    Ok(())
                }
                Some(Format::Collection) => {
                    if !wrapper_configured {
                        return Err(ConfigError::CollectionWithoutWrapper);
                    }
                    set.collection = true;
                    Ok(())
                }
                None => Err(ConfigError::UnknownFormat {
                    name: name.to_string(),
                }),
            }
        };

        match formats {
            None => {}
            Some(FormatsOption::List(names)) => {
                for name in names {
                    enable(&mut set, name)?;
                }
            }
            Some(FormatsOption::Flags(flags)) => {
                for (name, on) in flags {
                    if *on {
                        enable(&mut set, name)?;
                    } else if Format::parse(name).is_none() {
                        return Err(ConfigError::UnknownFormat { name: name.clone() });
                    }
                }
            }
        }

        Ok(set)
    }

    /// Whether a format is enabled. `string` always is.
    pub fn contains(self, format: Format) -> bool {
        match format {
            Format::String => true,
            Format::Element => self.element,
            Format::Fragment => self.fragment,
            Format::Collection => self.collection,
        }
    }

    /// The enabled formats, in emission order.
    pub fn enabled(self) -> impl Iterator<Item = Format> {
        Format::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    /// The format used when a render call names none: the wrapper format
    /// when enabled, plain `string` otherwise.
    pub fn default_format(self) -> Format {
        if self.collection {
            Format::Collection
        } else {
            Format::String
        }
    }

    /// Whether any enabled format needs a DOM range to parse markup.
    pub fn dom_dependent(self) -> bool {
        self.element || self.fragment
    }
}

/// Render-call options, minus whatever the resolution consumed.
pub type RenderOptions = serde_json::Map<String, Value>;

/// Resolve which format one render call should produce.
///
/// Precedence, in order:
/// 1. A legacy boolean third argument wins: `true` forces `string`,
///    `false` forces the wrapper format when enabled.
/// 2. Options with no `format` key use the build's static default.
/// 3. An explicit `format` key is honored and stripped from the options
///    passed through to the template body.
/// 4. A resolved format that is not enabled fails.
///
/// The generated module's `getFormat` implements exactly this logic in
/// JavaScript; this function is the testable model of it.
pub fn resolve_format(
    set: FormatSet,
    options: Option<&RenderOptions>,
    as_string: Option<bool>,
) -> Result<(Option<RenderOptions>, Format), RenderError> {
    if let Some(as_string) = as_string {
        let format = if set.contains(Format::Collection) && !as_string {
            Format::Collection
        } else {
            Format::String
        };
        return Ok((options.cloned(), format));
    }

    let Some(options) = options else {
        return Ok((None, set.default_format()));
    };
    let Some(requested) = options.get("format") else {
        return Ok((Some(options.clone()), set.default_format()));
    };

    let mut passthrough = options.clone();
    passthrough.remove("format");

    // Falsy format values fall back to the default, like the generated code.
    let name = match requested {
        Value::Null => None,
        Value::String(name) if name.is_empty() => None,
        Value::String(name) => Some(name.clone()),
        other => Some(other.to_string()),
    };
    let format = match name {
        None => set.default_format(),
        Some(name) => Format::parse(&name)
            .filter(|f| set.contains(*f))
            .ok_or(RenderError::UnsupportedFormat { format: name })?,
    };
    Ok((Some(passthrough), format))
}

/// Synthesize the shared runtime support module.
///
/// Evaluated once per process by the module system, it owns the format
/// table, the default format, the DOM range used for markup parsing (with
/// its environment precondition checked at evaluation time, not per render
/// call), and the `getFormat` resolution shared by every template's
/// default export.
pub(crate) fn support_module_source(set: FormatSet, wrapper_module_id: Option<&str>) -> String {
    let mut ir = ModuleIr::new();

    if set.contains(Format::Collection) {
        if let Some(wrapper) = wrapper_module_id {
            ir.imports.push(Import::Default {
                local: "Wrapper".to_string(),
                specifier: wrapper.to_string(),
            });
        }
    }

    ir.statements.push(Stmt::Raw(format!(
        "var FORMATS = {{ string: true, element: {}, fragment: {}, collection: {} }};",
        set.contains(Format::Element),
        set.contains(Format::Fragment),
        set.contains(Format::Collection),
    )));
    ir.statements.push(Stmt::Raw(format!(
        "var DEFAULT_FORMAT = {};",
        js_string(set.default_format().name())
    )));

    if set.dom_dependent() {
        ir.statements.push(Stmt::Raw(format!(
            "if (typeof document === 'undefined' || !document.createRange) {{\n  throw new Error({});\n}}",
            js_string(FRAGMENT_ENVIRONMENT_MSG)
        )));
        ir.statements.push(Stmt::Raw(
            "var parsingRange = /*@__PURE__*/ document.createRange();".to_string(),
        ));
    }
    if set.contains(Format::Element) {
        ir.statements.push(Stmt::Raw(format!(
            "function toElement(markup) {{\n  \
               var children = parsingRange.createContextualFragment(markup).children;\n  \
               if (children.length !== 1) {{\n    \
                 throw new Error({prefix} + children.length + {suffix});\n  \
               }}\n  \
               return children[0];\n\
             }}",
            prefix = js_string(ELEMENT_CARDINALITY_MSG_PREFIX),
            suffix = js_string(ELEMENT_CARDINALITY_MSG_SUFFIX),
        )));
    }
    if set.contains(Format::Fragment) {
        ir.statements.push(Stmt::Raw(
            "function toFragment(markup) {\n  return parsingRange.createContextualFragment(markup);\n}"
                .to_string(),
        ));
    }

    ir.statements.push(Stmt::Raw(
        "var converters = { string: function (markup) { return markup; } };".to_string(),
    ));
    if set.contains(Format::Element) {
        ir.statements
            .push(Stmt::Raw("converters.element = toElement;".to_string()));
    }
    if set.contains(Format::Fragment) {
        ir.statements
            .push(Stmt::Raw("converters.fragment = toFragment;".to_string()));
    }
    if set.contains(Format::Collection) {
        ir.statements
            .push(Stmt::Raw("converters.collection = Wrapper;".to_string()));
    }

    ir.exports
        .push(ExportDecl::Raw("export { converters };".to_string()));
    ir.exports.push(ExportDecl::Raw(format!(
        "export function getFormat(options, asString) {{\n  \
           if (asString !== undefined) {{\n    \
             return [options, FORMATS.collection && !asString ? 'collection' : 'string'];\n  \
           }}\n  \
           if (!options || options.format === undefined) {{\n    \
             return [options, DEFAULT_FORMAT];\n  \
           }}\n  \
           var format = options.format || DEFAULT_FORMAT;\n  \
           var passthrough = {{}};\n  \
           for (var key in options) {{\n    \
             if (key !== 'format') passthrough[key] = options[key];\n  \
           }}\n  \
           if (!FORMATS[format]) {{\n    \
             throw new TypeError({unsupported} + format);\n  \
           }}\n  \
           return [passthrough, format];\n\
         }}",
        unsupported = js_string(UNSUPPORTED_FORMAT_MSG_PREFIX),
    )));

    ir.render()
}
