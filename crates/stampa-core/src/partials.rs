/*
 * partials.rs
 * Copyright (c) 2026 stampa developers
 */

//! Partial registration naming.
//!
//! A template that is itself a partial registers under a name derived from
//! its own module id. Roots are tried in configured order and the first
//! match wins (not the longest); the remainder keeps its separators
//! verbatim, so distinct roots that collapse to the same remainder collide
//! deliberately rather than being silently disambiguated.

/// Derive the registration name for a template's own module id.
///
/// Strips the first configured root that prefixes `id`, then a trailing
/// `extension`. The result is used verbatim as the registration key: no
/// case folding, no separator translation.
pub fn resolve_partial_name(id: &str, roots: &[String], extension: &str) -> String {
    let mut name = id;
    for root in roots {
        if let Some(stripped) = name.strip_prefix(root.as_str()) {
            name = stripped;
            break;
        }
    }
    if !extension.is_empty() {
        name = name.strip_suffix(extension).unwrap_or(name);
    }
    name.to_string()
}

/// The base name of a module id: everything after the last `/`.
pub fn base_name(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roots(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_strips_root_and_extension() {
        // Leading separator is retained.
        assert_eq!(
            resolve_partial_name("/templates/_row.stp", &roots(&["/templates"]), ".stp"),
            "/_row"
        );
    }

    #[test]
    fn test_first_matching_root_wins() {
        // "/app" matches first even though "/app/templates" is longer.
        assert_eq!(
            resolve_partial_name(
                "/app/templates/_row.stp",
                &roots(&["/app", "/app/templates"]),
                ".stp"
            ),
            "/templates/_row"
        );
    }

    #[test]
    fn test_no_matching_root() {
        assert_eq!(
            resolve_partial_name("/other/_row.stp", &roots(&["/templates"]), ".stp"),
            "/other/_row"
        );
    }

    #[test]
    fn test_only_first_match_is_stripped() {
        // A second root is never applied to the already-stripped remainder.
        assert_eq!(
            resolve_partial_name("/a/b/_x.stp", &roots(&["/a", "/b"]), ".stp"),
            "/b/_x"
        );
    }

    #[test]
    fn test_extension_only_stripped_from_end() {
        assert_eq!(
            resolve_partial_name("/x/_row.stp.bak", &[], ".stp"),
            "/x/_row.stp.bak"
        );
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("/templates/_row.stp"), "_row.stp");
        assert_eq!(base_name("_row.stp"), "_row.stp");
    }
}
