//! PDF stream object implementation

use std::io::{Read, Seek};
use log::debug;
use crate::error::{PDFObjectError, PDFObjectResult};
use super::lexer;
use super::{ByteCursor, Dictionary, Object, ObjectRef};

/// Location of stream data in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// Offset of the first data byte
    pub start: u64,
    /// Declared data length
    pub length: u64,
}

impl ByteRange {
    /// Offset one past the last data byte
    pub fn end(&self) -> u64 {
        self.start + self.length
    }

    /// Check for zero-length data
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Supplies integer values for `Length` entries given as indirect references.
///
/// The object reader cannot follow references itself; a cross-reference
/// resolver implements this and attaches it to the reader.
pub trait LengthResolver {
    /// Resolved length, or `None` if the reference cannot be resolved
    fn resolve_length(&self, reference: ObjectRef) -> Option<u64>;
}

/// PDF stream object.
///
/// Holds the stream dictionary and where the raw data lives; the data
/// itself is left in the source for a filter pipeline to fetch and decode.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    /// Stream dictionary
    dictionary: Dictionary,
    /// Raw data location
    data: ByteRange,
}

impl Stream {
    /// Create new stream object
    pub fn new(dictionary: Dictionary, data: ByteRange) -> Self {
        Self { dictionary, data }
    }

    /// Stream dictionary
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Raw data location
    pub fn data_range(&self) -> ByteRange {
        self.data
    }

    /// Decode filters named in the dictionary, outermost first
    pub fn filters(&self) -> Vec<&[u8]> {
        match self.dictionary.get("Filter") {
            Some(Object::Name(name)) => vec![name.as_bytes()],
            Some(Object::Array(array)) => array
                .iter()
                .filter_map(Object::as_name)
                .map(|name| name.as_bytes())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Parse stream data bounds.
    ///
    /// Expects the cursor just past the `stream` keyword. Consumes the
    /// mandated end of line, records the data range from `Length` and leaves
    /// the cursor at the end of the data so the caller can check `endstream`.
    pub fn parse<R: Read + Seek>(
        dictionary: Dictionary,
        cursor: &mut ByteCursor<R>,
        resolver: Option<&dyn LengthResolver>,
    ) -> PDFObjectResult<Self> {
        lexer::match_stream_eol(cursor)?;
        let start = cursor.position();

        let length = Self::declared_length(&dictionary, start, resolver)?;
        if start.checked_add(length).is_none() {
            return Err(PDFObjectError::InvalidStreamLength { offset: start });
        }
        let data = ByteRange { start, length };
        debug!("Stream data at {}..{}", data.start, data.end());

        if length > 0 {
            // the last data byte must exist
            cursor.seek(data.end() - 1)?;
            cursor.read_byte()?;
        }

        Ok(Self::new(dictionary, data))
    }

    /// Get stream length from dictionary
    fn declared_length(
        dictionary: &Dictionary,
        start: u64,
        resolver: Option<&dyn LengthResolver>,
    ) -> PDFObjectResult<u64> {
        match dictionary.get("Length") {
            Some(Object::Integer(n)) => u64::try_from(*n)
                .map_err(|_| PDFObjectError::InvalidStreamLength { offset: start }),
            Some(Object::Reference(reference)) => resolver
                .and_then(|r| r.resolve_length(*reference))
                .ok_or(PDFObjectError::UnresolvedStreamLength {
                    reference: *reference,
                    offset: start,
                }),
            _ => Err(PDFObjectError::InvalidStreamLength { offset: start }),
        }
    }

    /// Write stream header: dictionary and `stream` keyword
    pub fn write_to(&self, output: &mut Vec<u8>) {
        self.dictionary.write_to(output);
        output.extend_from_slice(b"\nstream\n");
    }
}
