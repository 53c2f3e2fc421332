//! Controlled vocabularies used when flattening MODS.
//!
//! - [`relators`] — contributor role label -> MARC relator code.

pub mod relators;
