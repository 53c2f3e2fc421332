use thiserror::Error;

/// Fatal errors raised while turning a MODS document into a [`NormalizedRecord`].
///
/// Data problems that still allow a record to be produced (unreadable dates,
/// unknown roles) are not errors; they travel as
/// [`Diagnostic`](crate::models::Diagnostic)s next to the record.
///
/// [`NormalizedRecord`]: crate::models::NormalizedRecord
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input is not well-formed XML. No partial record is returned.
    #[error("malformed MODS XML at byte {position}: {message}")]
    Parse { position: u64, message: String },

    /// A structural element the extractor cannot work without is absent.
    #[error("missing required element <{0}>")]
    MissingRequiredField(&'static str),
}

impl ExtractError {
    pub(crate) fn parse(position: u64, message: impl std::fmt::Display) -> Self {
        ExtractError::Parse {
            position,
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
