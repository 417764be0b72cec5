//! Error types for the PDF object reader

use std::io;
use thiserror::Error;
use crate::pdf::ObjectRef;

/// Main error type for object reading operations
#[derive(Error, Debug)]
pub enum PDFObjectError {
    /// Input ran out before a construct was complete
    #[error("Unexpected end of input at byte {offset}")]
    EndOfInput {
        offset: u64,
    },

    /// Keyword bytes did not match the expected literal
    #[error("Unexpected keyword at byte {offset}: expected '{expected}'")]
    UnexpectedKeyword {
        expected: &'static str,
        offset: u64,
    },

    /// A structural delimiter was expected but something else was found
    #[error("Unexpected token at byte {offset}: expected {expected}, found {}", describe_byte(.found))]
    UnexpectedToken {
        expected: &'static str,
        found: Option<u8>,
        offset: u64,
    },

    /// Numeric lexeme could not be interpreted
    #[error("Malformed number at byte {offset}")]
    MalformedNumber {
        offset: u64,
    },

    /// Name contains an invalid `#` escape
    #[error("Malformed name at byte {offset}")]
    MalformedName {
        offset: u64,
    },

    /// Hex string contains a non-hex byte
    #[error("Malformed string at byte {offset}")]
    MalformedString {
        offset: u64,
    },

    /// Dictionary key is not a name
    #[error("Malformed dictionary key at byte {offset}")]
    MalformedDictionaryKey {
        offset: u64,
    },

    /// No object starts with the byte found
    #[error("Unrecognized object at byte {offset}: {}", describe_found(.found))]
    UnrecognizedObject {
        found: u8,
        offset: u64,
    },

    /// Arrays and dictionaries nested past the configured limit
    #[error("Nesting too deep at byte {offset}: limit is {depth}")]
    NestingTooDeep {
        depth: usize,
        offset: u64,
    },

    /// Stream dictionary has no usable Length entry
    #[error("Invalid stream length in dictionary ending before byte {offset}")]
    InvalidStreamLength {
        offset: u64,
    },

    /// Stream Length is an indirect reference that nobody resolved
    #[error("Unresolved stream length {reference} for data at byte {offset}")]
    UnresolvedStreamLength {
        reference: ObjectRef,
        offset: u64,
    },

    /// IO error from the underlying source
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for object reading operations
pub type PDFObjectResult<T> = Result<T, PDFObjectError>;

fn describe_byte(byte: &Option<u8>) -> String {
    match byte {
        Some(b) => describe_found(b),
        None => "end of input".to_string(),
    }
}

fn describe_found(byte: &u8) -> String {
    if byte.is_ascii_graphic() {
        format!("'{}'", *byte as char)
    } else {
        format!("0x{:02X}", byte)
    }
}

impl PDFObjectError {
    /// Create a new end of input error
    pub fn end_of_input(offset: u64) -> Self {
        Self::EndOfInput { offset }
    }

    /// Create a new unexpected keyword error
    pub fn unexpected_keyword(expected: &'static str, offset: u64) -> Self {
        Self::UnexpectedKeyword { expected, offset }
    }

    /// Create a new unexpected token error
    pub fn unexpected_token(expected: &'static str, found: Option<u8>, offset: u64) -> Self {
        Self::UnexpectedToken {
            expected,
            found,
            offset,
        }
    }

    /// Create a new malformed number error
    pub fn malformed_number(offset: u64) -> Self {
        Self::MalformedNumber { offset }
    }

    /// Byte offset at which the failure was detected
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::EndOfInput { offset }
            | Self::UnexpectedKeyword { offset, .. }
            | Self::UnexpectedToken { offset, .. }
            | Self::MalformedNumber { offset }
            | Self::MalformedName { offset }
            | Self::MalformedString { offset }
            | Self::MalformedDictionaryKey { offset }
            | Self::UnrecognizedObject { offset, .. }
            | Self::NestingTooDeep { offset, .. }
            | Self::InvalidStreamLength { offset }
            | Self::UnresolvedStreamLength { offset, .. } => Some(*offset),
            Self::Io(_) => None,
        }
    }

    /// Check if error is caused by truncated input
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::EndOfInput { .. })
    }

    /// Check if error is caused by the bytes themselves rather than the source
    pub fn is_syntax_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
