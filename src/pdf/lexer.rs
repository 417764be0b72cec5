//! Lexical helpers shared by the object readers

use std::io::{Read, Seek};
use crate::error::{PDFObjectError, PDFObjectResult};
use super::ByteCursor;

/// PDF whitespace: NUL, TAB, LF, FF, CR, SPACE
#[inline]
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x00)
}

/// Structural delimiters that end any unquoted token
#[inline]
pub fn is_delimiter(byte: u8) -> bool {
    matches!(byte, b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%')
}

/// Bytes allowed inside numbers, keywords and names
#[inline]
pub fn is_regular(byte: u8) -> bool {
    !is_whitespace(byte) && !is_delimiter(byte)
}

/// Skip whitespace and `%` comments.
///
/// Stops at the first significant byte or at end of input. A comment runs up
/// to, not including, the next CR or LF; the line break is then eaten as
/// ordinary whitespace.
pub fn skip_whitespace_and_comments<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> PDFObjectResult<()> {
    let mut in_comment = false;

    while let Some(byte) = cursor.peek()? {
        if in_comment {
            if byte == b'\r' || byte == b'\n' {
                in_comment = false;
            }
        } else if byte == b'%' {
            in_comment = true;
        } else if !is_whitespace(byte) {
            break;
        }
        cursor.next_byte()?;
    }

    Ok(())
}

/// Consume `expected` exactly.
///
/// On failure the cursor is rolled back to where the match started, so a
/// caller can try an alternative at the same offset. Running out of input
/// is `EndOfInput`; a differing byte is `UnexpectedKeyword`.
pub fn match_keyword<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    expected: &'static str,
) -> PDFObjectResult<()> {
    let start = cursor.position();

    for &want in expected.as_bytes() {
        let offset = cursor.position();
        let failure = match cursor.next_byte()? {
            Some(got) if got == want => continue,
            Some(_) => PDFObjectError::unexpected_keyword(expected, offset),
            None => PDFObjectError::end_of_input(offset),
        };
        cursor.seek(start)?;
        return Err(failure);
    }

    Ok(())
}

/// Check, without consuming anything, that `expected` comes next as a whole
/// token: followed by whitespace, a delimiter or end of input.
pub fn at_keyword<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    expected: &'static str,
) -> PDFObjectResult<bool> {
    if cursor.peek()? != expected.as_bytes().first().copied() {
        return Ok(false);
    }

    let start = cursor.position();
    let found = match match_keyword(cursor, expected) {
        Ok(()) => !matches!(cursor.peek()?, Some(b) if is_regular(b)),
        Err(e) if e.is_syntax_error() => false,
        Err(e) => return Err(e),
    };

    cursor.seek(start)?;
    Ok(found)
}

/// Consume `byte` if it comes next; otherwise fail without consuming.
/// Running out of input is `EndOfInput`.
pub fn expect_byte<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    byte: u8,
    expected: &'static str,
) -> PDFObjectResult<()> {
    let offset = cursor.position();
    match cursor.peek()? {
        Some(b) if b == byte => {
            cursor.next_byte()?;
            Ok(())
        }
        Some(other) => Err(PDFObjectError::unexpected_token(expected, Some(other), offset)),
        None => Err(PDFObjectError::end_of_input(offset)),
    }
}

/// Consume the end-of-line marker that must follow `stream`: CRLF or LF
pub fn match_stream_eol<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> PDFObjectResult<()> {
    let offset = cursor.position();
    match cursor.next_byte()? {
        Some(b'\n') => Ok(()),
        Some(b'\r') => match cursor.next_byte()? {
            Some(b'\n') => Ok(()),
            Some(other) => Err(PDFObjectError::unexpected_token("LF after CR", Some(other), offset + 1)),
            None => Err(PDFObjectError::end_of_input(offset + 1)),
        },
        Some(other) => Err(PDFObjectError::unexpected_token("end of line after 'stream'", Some(other), offset)),
        None => Err(PDFObjectError::end_of_input(offset)),
    }
}
