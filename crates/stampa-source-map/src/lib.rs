/*
 * lib.rs
 * Copyright (c) 2026 stampa developers
 */

//! Source locations and source-map carrier types for stampa.
//!
//! This crate provides the location types used throughout the compiler for
//! error reporting ([`Location`], [`Span`]) and the JSON source-map carrier
//! ([`SourceMap`]) handed back with every generated module. The compiler
//! never *computes* mappings itself; maps are produced by the external
//! precompiler and carried through unchanged. What this crate guarantees is
//! a uniform contract: a module that was compiled without a map still gets a
//! well-formed [`SourceMap::empty`] descriptor rather than an absent one.

pub mod map;
pub mod types;

// Re-export main types
pub use map::SourceMap;
pub use types::{Location, Span};
