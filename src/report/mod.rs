//! Renderers for batch extraction results.
//!
//! - [`terminal`] — colored summary box plus failure and diagnostic tables;
//!   respects `--verbose` / `--quiet`.
//! - [`json`] — the full records as a JSON array, for piping into worksheet writers.

pub mod json;
pub mod terminal;
