//! Error types for the argument lexer.

use thiserror::Error;

/// Convenience type alias for lexer results.
pub type Result<T, E = ArgsError> = std::result::Result<T, E>;

/// Errors produced while splitting a chat line into arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ArgsError {
    /// Input ended inside an open quote.
    #[error("expected closing {0}")]
    UnterminatedQuote(char),

    /// A `<` had no `</...>` closer after it.
    #[error("malformed markup starting at byte {offset}")]
    MalformedMarkup {
        /// Byte offset of the unmatched `<`.
        offset: usize,
    },

    /// Input ended right after a backslash.
    #[error("unexpected end of line after escape")]
    UnterminatedEscape,
}

impl ArgsError {
    /// Static error code for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnterminatedQuote(_) => "unterminated_quote",
            Self::MalformedMarkup { .. } => "malformed_markup",
            Self::UnterminatedEscape => "unterminated_escape",
        }
    }
}
