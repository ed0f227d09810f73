use thiserror::Error;

use std::io;

#[cfg(feature = "serde")]
use serde::Serialize;

/// What went wrong at one point of a parse. Carried by every [`Diagnostic`] and
/// rendered to the human-readable diagnostic text.
///
/// [`Diagnostic`]: crate::result::Diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ErrorKind {
    #[error("expected `{expected}` {context}, found {found}")]
    Expected {
        expected: &'static str,
        context: &'static str,
        found: String,
    },

    #[error("expected identifier after type, found {found}")]
    InvalidIdentifier { found: String },

    #[error("expected integer after `[` in array dimension, found {found}")]
    InvalidDimension { found: String },

    #[error("array dimension `{digits}` is too large")]
    DimensionOverflow { digits: String },

    #[error(
        "{pointer_depth} pointer level(s) and {dims} array dimension(s) do not add up to a string table"
    )]
    RankMismatch { pointer_depth: u8, dims: usize },

    #[error("unsupported escape sequence `\\{escape}`")]
    UnsupportedEscape { escape: char },

    #[error("`\\{escape}` used with no following hex digits")]
    MissingHexDigits { escape: char },

    #[error("escape value {value:#x} is not a valid character")]
    EscapeOutOfRange { value: u32 },

    #[error("character {byte:#04x} must be escaped inside a string literal")]
    UnescapedCharacter { byte: u8 },

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("no string table declaration found")]
    NoDeclaration,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("syntax at line {line}, column {column}: {kind}")]
    Syntax {
        line: usize,
        column: usize,
        kind: ErrorKind,
    },

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = core::result::Result<T, Error>;
