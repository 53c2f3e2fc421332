//! `mods-migrate` — flatten legacy MODS metadata into migration worksheet fields.
//!
//! The core is [`Extractor::extract`]: MODS XML text in, a
//! [`NormalizedRecord`](models::NormalizedRecord) plus
//! [`Diagnostic`](models::Diagnostic)s out. It does no I/O and keeps no state
//! between calls.
//!
//! - [`mods`] — XML tree, name parsing and the field flattening steps.
//! - [`date`] — free-text date repair into EDTF, and an EDTF validator.
//! - [`vocab`] — MARC relator vocabulary.
//! - [`source`], [`report`], [`config`] — the batch driver's collaborators.

pub mod config;
pub mod date;
pub mod error;
pub mod models;
pub mod mods;
pub mod report;
pub mod source;
pub mod vocab;

pub use error::ExtractError;
pub use mods::{ExtractOptions, Extractor};
