//! Position-tracked byte cursor over a seekable source

use std::io::{self, Read, Seek, SeekFrom};
use crate::error::{PDFObjectError, PDFObjectResult};

/// Seekable byte source with one byte of lookahead.
///
/// The cursor reads the source one byte at a time and performs no buffering
/// of its own; wrap files in a `BufReader` before handing them over.
/// `position` is always the offset of the next byte `read_byte` will return,
/// regardless of whether that byte has already been peeked.
#[derive(Debug)]
pub struct ByteCursor<R> {
    inner: R,
    position: u64,
    peeked: Option<u8>,
}

impl<'a> ByteCursor<io::Cursor<&'a [u8]>> {
    /// Create cursor over an in-memory buffer
    pub fn from_bytes(data: &'a [u8]) -> Self {
        Self {
            inner: io::Cursor::new(data),
            position: 0,
            peeked: None,
        }
    }
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Create cursor starting at the source's current position
    pub fn new(mut inner: R) -> PDFObjectResult<Self> {
        let position = inner.stream_position()?;
        Ok(Self {
            inner,
            position,
            peeked: None,
        })
    }

    /// Current read offset
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Move to an absolute offset
    pub fn seek(&mut self, offset: u64) -> PDFObjectResult<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        self.position = offset;
        self.peeked = None;
        Ok(())
    }

    /// Look at the next byte without consuming it
    pub fn peek(&mut self) -> PDFObjectResult<Option<u8>> {
        if self.peeked.is_none() {
            self.peeked = self.fetch()?;
        }
        Ok(self.peeked)
    }

    /// Consume the next byte, `None` at end of input
    pub fn next_byte(&mut self) -> PDFObjectResult<Option<u8>> {
        let byte = match self.peeked.take() {
            Some(b) => Some(b),
            None => self.fetch()?,
        };
        if byte.is_some() {
            self.position += 1;
        }
        Ok(byte)
    }

    /// Consume the next byte, failing at end of input
    pub fn read_byte(&mut self) -> PDFObjectResult<u8> {
        let offset = self.position;
        self.next_byte()?
            .ok_or_else(|| PDFObjectError::end_of_input(offset))
    }

    /// Borrow the underlying source
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Return the source, positioned at the cursor's offset
    pub fn into_inner(mut self) -> PDFObjectResult<R> {
        if self.peeked.is_some() {
            self.inner.seek(SeekFrom::Start(self.position))?;
        }
        Ok(self.inner)
    }

    fn fetch(&mut self) -> PDFObjectResult<Option<u8>> {
        let mut byte = [0u8];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
