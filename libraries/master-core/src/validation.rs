/// Validation errors for playlist documents
use crate::datetime::StampKind;
use thiserror::Error;

/// Result type alias using `ValidationError`
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Reasons a playlist document (or its name) is refused before saving
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A date/time literal does not follow the TOML datetime grammar
    #[error("Invalid date/time literal: {literal:?}")]
    InvalidDateTime { literal: String },

    /// Working hours exception key is not a calendar date
    #[error("Invalid exception date: {key:?}")]
    InvalidExceptionDate { key: String },

    /// Range opens after it closes
    #[error("{context}: {start} is after {end}")]
    InvertedRange {
        context: String,
        start: String,
        end: String,
    },

    /// Range bound is the wrong kind of literal (e.g. a date where a time
    /// of day is stored)
    #[error("{context}: {literal} is not a {expected}")]
    UnexpectedKind {
        context: String,
        literal: String,
        expected: StampKind,
    },

    /// Only one of the start/end jingles is set
    #[error("Start and end jingles must be set together")]
    IncompleteJingles,

    /// Advertisement slot key is not a time of day
    #[error("Invalid advertisement slot: {key:?}")]
    InvalidAdSlot { key: String },

    /// Playlist name is unusable as a server file name
    #[error("Invalid playlist name {name:?}: {reason}")]
    InvalidPlaylistName { name: String, reason: String },

    /// The default playlist cannot be removed
    #[error("The default playlist cannot be deleted")]
    DefaultPlaylistProtected,
}
