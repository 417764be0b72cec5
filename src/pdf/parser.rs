//! PDF object reader: primitive readers and the generic dispatcher

use std::fmt;
use std::io::{Read, Seek};
use log::{debug, trace, warn};

use crate::error::{PDFObjectError, PDFObjectResult};
use super::lexer::{self, is_regular, is_whitespace};
use super::{
    ByteCursor, Dictionary, IndirectObject, LengthResolver, Name, Number, Object, ObjectRef, Stream,
};

/// Default limit for nested arrays and dictionaries
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Reader configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Deepest allowed nesting of arrays and dictionaries; one container
    /// with no containers inside it has depth 1
    pub max_nesting_depth: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Reads PDF objects from a [`ByteCursor`].
///
/// Every read starts at the cursor's current position and, on success,
/// leaves the cursor immediately after the last byte of the object. Callers
/// chain reads without re-seeking. The reader itself holds only
/// configuration, so one instance serves any number of cursors.
#[derive(Clone, Copy, Default)]
pub struct ObjectReader<'r> {
    config: ReaderConfig,
    resolver: Option<&'r dyn LengthResolver>,
}

impl fmt::Debug for ObjectReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectReader")
            .field("config", &self.config)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

impl<'r> ObjectReader<'r> {
    /// Create reader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create reader with the given configuration
    pub fn with_config(config: ReaderConfig) -> Self {
        Self {
            config,
            resolver: None,
        }
    }

    /// Attach a resolver for indirect stream lengths
    pub fn with_length_resolver(mut self, resolver: &'r dyn LengthResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Configuration this reader was built with
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read the next object of any kind.
    ///
    /// Skips leading whitespace and comments, then routes on the first
    /// significant byte. Non-negative integers are checked for a following
    /// `G R` and collapse into a reference when one is present; dictionaries
    /// are checked for a following `stream` keyword.
    pub fn read<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<Object> {
        self.dispatch(cursor, 0)
    }

    /// Read `null` (exactly 4 bytes)
    pub fn read_null<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<()> {
        lexer::match_keyword(cursor, "null")
    }

    /// Read `true` or `false` (exactly 4 or 5 bytes)
    pub fn read_boolean<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<bool> {
        let offset = cursor.position();
        match cursor.peek()? {
            Some(b't') => lexer::match_keyword(cursor, "true").map(|_| true),
            Some(b'f') => lexer::match_keyword(cursor, "false").map(|_| false),
            Some(_) => Err(PDFObjectError::unexpected_keyword("true' or 'false", offset)),
            None => Err(PDFObjectError::end_of_input(offset)),
        }
    }

    /// Read an integer or real number.
    ///
    /// The lexeme ends at the first byte that is neither a digit nor `.`;
    /// that byte is left unread. Presence of `.` alone makes it real.
    pub fn read_number<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<Number> {
        let start = cursor.position();
        let mut lexeme = String::new();

        if let Some(sign @ (b'+' | b'-')) = cursor.peek()? {
            lexeme.push(sign as char);
            cursor.next_byte()?;
        }

        let mut seen_point = false;
        let mut digits = 0usize;
        while let Some(byte) = cursor.peek()? {
            match byte {
                b'0'..=b'9' => digits += 1,
                b'.' if !seen_point => seen_point = true,
                b'.' => return Err(PDFObjectError::malformed_number(cursor.position())),
                _ => break,
            }
            lexeme.push(byte as char);
            cursor.next_byte()?;
        }

        if digits == 0 {
            return Err(PDFObjectError::malformed_number(start));
        }

        // a real too large for f64 parses as infinity, which has no textual form
        let number = if seen_point {
            lexeme.parse::<f64>().ok().filter(|r| r.is_finite()).map(Number::Real)
        } else {
            lexeme.parse::<i64>().map(Number::Integer).ok()
        };
        number.ok_or_else(|| PDFObjectError::malformed_number(start))
    }

    /// Read `/Name`, decoding `#xx` escapes.
    ///
    /// The name ends at whitespace, a delimiter or end of input, none of
    /// which is consumed.
    pub fn read_name<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<Name> {
        lexer::expect_byte(cursor, b'/', "'/'")?;
        let mut bytes = Vec::new();

        while let Some(byte) = cursor.peek()? {
            if !is_regular(byte) {
                break;
            }
            let offset = cursor.position();
            cursor.next_byte()?;

            if byte == b'#' {
                let high = Self::name_hex_digit(cursor, offset)?;
                let low = Self::name_hex_digit(cursor, offset)?;
                bytes.push(high << 4 | low);
            } else {
                bytes.push(byte);
            }
        }

        Ok(Name::new(bytes))
    }

    fn name_hex_digit<R: Read + Seek>(cursor: &mut ByteCursor<R>, escape_offset: u64) -> PDFObjectResult<u8> {
        match cursor.peek()?.and_then(hex_value) {
            Some(value) => {
                cursor.next_byte()?;
                Ok(value)
            }
            None => Err(PDFObjectError::MalformedName { offset: escape_offset }),
        }
    }

    /// Read a string in either literal or hexadecimal form
    pub fn read_string<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<Vec<u8>> {
        let offset = cursor.position();
        match cursor.peek()? {
            Some(b'(') => self.read_literal_string(cursor),
            Some(b'<') => self.read_hex_string(cursor),
            Some(other) => Err(PDFObjectError::unexpected_token("'(' or '<'", Some(other), offset)),
            None => Err(PDFObjectError::end_of_input(offset)),
        }
    }

    /// Read `( ... )` with balanced parentheses and backslash escapes
    pub fn read_literal_string<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<Vec<u8>> {
        lexer::expect_byte(cursor, b'(', "'('")?;
        let mut content = Vec::new();
        let mut nesting = 1usize;

        loop {
            match cursor.read_byte()? {
                b'(' => {
                    nesting += 1;
                    content.push(b'(');
                }
                b')' => {
                    nesting -= 1;
                    if nesting == 0 {
                        break;
                    }
                    content.push(b')');
                }
                b'\\' => Self::read_escape(cursor, &mut content)?,
                byte => content.push(byte),
            }
        }

        Ok(content)
    }

    fn read_escape<R: Read + Seek>(cursor: &mut ByteCursor<R>, content: &mut Vec<u8>) -> PDFObjectResult<()> {
        match cursor.read_byte()? {
            b'n' => content.push(b'\n'),
            b'r' => content.push(b'\r'),
            b't' => content.push(b'\t'),
            b'b' => content.push(0x08),
            b'f' => content.push(0x0C),
            digit @ b'0'..=b'7' => {
                let mut value = u32::from(digit - b'0');
                for _ in 0..2 {
                    match cursor.peek()? {
                        Some(d @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(d - b'0');
                            cursor.next_byte()?;
                        }
                        _ => break,
                    }
                }
                content.push((value & 0xFF) as u8);
            }
            // line continuation
            b'\n' => {}
            b'\r' => {
                if cursor.peek()? == Some(b'\n') {
                    cursor.next_byte()?;
                }
            }
            // \( \) \\ and unknown escapes keep the escaped byte
            other => content.push(other),
        }
        Ok(())
    }

    /// Read `< ... >` hex digits; whitespace is ignored and an odd final
    /// digit is padded with `0`
    pub fn read_hex_string<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<Vec<u8>> {
        lexer::expect_byte(cursor, b'<', "'<'")?;
        Self::read_hex_body(cursor)
    }

    fn read_hex_body<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> PDFObjectResult<Vec<u8>> {
        let start = cursor.position();
        let mut digits = String::new();

        loop {
            let offset = cursor.position();
            match cursor.read_byte()? {
                b'>' => break,
                byte if is_whitespace(byte) => continue,
                byte if byte.is_ascii_hexdigit() => digits.push(byte as char),
                _ => return Err(PDFObjectError::MalformedString { offset }),
            }
        }

        if digits.len() % 2 != 0 {
            digits.push('0');
        }

        hex::decode(&digits).map_err(|_| PDFObjectError::MalformedString { offset: start })
    }

    /// Read `[ ... ]`
    pub fn read_array<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<Vec<Object>> {
        self.read_array_at(cursor, 0)
    }

    fn read_array_at<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>, depth: usize) -> PDFObjectResult<Vec<Object>> {
        let offset = cursor.position();
        lexer::expect_byte(cursor, b'[', "'['")?;
        let depth = self.enter(depth, offset)?;
        let mut array = Vec::new();

        loop {
            lexer::skip_whitespace_and_comments(cursor)?;
            match cursor.peek()? {
                Some(b']') => {
                    cursor.next_byte()?;
                    break;
                }
                Some(_) => array.push(self.dispatch(cursor, depth)?),
                None => return Err(PDFObjectError::end_of_input(cursor.position())),
            }
        }

        Ok(array)
    }

    /// Read `<< ... >>`. Does not look for a following stream.
    pub fn read_dictionary<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<Dictionary> {
        let offset = cursor.position();
        lexer::expect_byte(cursor, b'<', "'<<'")?;
        lexer::expect_byte(cursor, b'<', "'<<'")?;
        let depth = self.enter(0, offset)?;
        self.read_dictionary_body(cursor, depth)
    }

    fn read_dictionary_body<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>, depth: usize) -> PDFObjectResult<Dictionary> {
        let mut dict = Dictionary::new();

        loop {
            lexer::skip_whitespace_and_comments(cursor)?;
            let offset = cursor.position();
            match cursor.peek()? {
                Some(b'>') => {
                    cursor.next_byte()?;
                    match cursor.next_byte()? {
                        Some(b'>') => break,
                        Some(other) => {
                            return Err(PDFObjectError::unexpected_token("'>>'", Some(other), offset + 1))
                        }
                        None => return Err(PDFObjectError::end_of_input(offset + 1)),
                    }
                }
                Some(b'/') => {
                    let key = self.read_name(cursor)?;
                    let value = self.dispatch(cursor, depth)?;
                    dict.set(key, value);
                }
                Some(_) => return Err(PDFObjectError::MalformedDictionaryKey { offset }),
                None => return Err(PDFObjectError::end_of_input(offset)),
            }
        }

        Ok(dict)
    }

    /// Read `N G obj <object> endobj`.
    ///
    /// For a stream body the `endstream` keyword is matched as well, so the
    /// cursor always ends up after `endobj`.
    pub fn read_indirect_object<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<IndirectObject> {
        lexer::skip_whitespace_and_comments(cursor)?;
        let number = self.read_unsigned::<R, u32>(cursor)?;
        lexer::skip_whitespace_and_comments(cursor)?;
        let generation = self.read_unsigned::<R, u16>(cursor)?;
        lexer::skip_whitespace_and_comments(cursor)?;
        lexer::match_keyword(cursor, "obj")?;

        let reference = ObjectRef::new(number, generation);
        debug!("Reading indirect object {} {} at {}", number, generation, cursor.position());

        let object = self.dispatch(cursor, 0)?;
        if let Object::Stream(_) = object {
            self.read_endstream(cursor)?;
        }

        lexer::skip_whitespace_and_comments(cursor)?;
        lexer::match_keyword(cursor, "endobj")?;

        Ok(IndirectObject { reference, object })
    }

    /// Match the `endstream` keyword after a stream's data
    pub fn read_endstream<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<()> {
        lexer::skip_whitespace_and_comments(cursor)?;
        lexer::match_keyword(cursor, "endstream")
    }

    fn read_unsigned<R: Read + Seek, T: TryFrom<i64>>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<T> {
        let offset = cursor.position();
        match self.read_number(cursor)? {
            Number::Integer(n) => T::try_from(n).map_err(|_| PDFObjectError::malformed_number(offset)),
            Number::Real(_) => Err(PDFObjectError::malformed_number(offset)),
        }
    }

    fn dispatch<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>, depth: usize) -> PDFObjectResult<Object> {
        lexer::skip_whitespace_and_comments(cursor)?;
        let offset = cursor.position();
        let first = cursor.peek()?.ok_or_else(|| PDFObjectError::end_of_input(offset))?;
        trace!("Reading object at {} starting with 0x{:02X}", offset, first);

        match first {
            b'/' => self.read_name(cursor).map(Object::Name),
            b'(' => self.read_literal_string(cursor).map(Object::String),
            b'<' => {
                cursor.next_byte()?;
                if cursor.peek()? == Some(b'<') {
                    cursor.next_byte()?;
                    let depth = self.enter(depth, offset)?;
                    let dict = self.read_dictionary_body(cursor, depth)?;
                    self.read_stream_or_dictionary(cursor, dict)
                } else {
                    Self::read_hex_body(cursor).map(Object::String)
                }
            }
            b'[' => self.read_array_at(cursor, depth).map(Object::Array),
            b'0'..=b'9' | b'+' | b'-' | b'.' => self.read_number_or_reference(cursor),
            b't' | b'f' => self.read_boolean(cursor).map(Object::Boolean),
            b'n' => self.read_null(cursor).map(|_| Object::Null),
            found => Err(PDFObjectError::UnrecognizedObject { found, offset }),
        }
    }

    fn read_stream_or_dictionary<R: Read + Seek>(
        &self,
        cursor: &mut ByteCursor<R>,
        dict: Dictionary,
    ) -> PDFObjectResult<Object> {
        let after_dict = cursor.position();
        lexer::skip_whitespace_and_comments(cursor)?;

        if lexer::at_keyword(cursor, "stream")? {
            lexer::match_keyword(cursor, "stream")?;
            return Stream::parse(dict, cursor, self.resolver).map(Object::Stream);
        }

        if cursor.position() != after_dict {
            cursor.seek(after_dict)?;
        }
        Ok(Object::Dictionary(dict))
    }

    fn read_number_or_reference<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<Object> {
        let number = self.read_number(cursor)?;
        let object_number = match number {
            Number::Integer(n) => u32::try_from(n).ok(),
            Number::Real(_) => None,
        };
        let Some(object_number) = object_number else {
            return Ok(number.into());
        };

        let after_number = cursor.position();
        match self.read_reference_tail(cursor) {
            Ok(Some(generation)) => return Ok(Object::Reference(ObjectRef::new(object_number, generation))),
            Ok(None) => {}
            Err(e) if e.is_syntax_error() => trace!("Reference lookahead failed: {}", e),
            Err(e) => return Err(e),
        }

        if cursor.position() != after_number {
            trace!("Rolling back to {} after integer {}", after_number, object_number);
            cursor.seek(after_number)?;
        }
        Ok(number.into())
    }

    /// Lookahead for `G R` after an object number
    fn read_reference_tail<R: Read + Seek>(&self, cursor: &mut ByteCursor<R>) -> PDFObjectResult<Option<u16>> {
        lexer::skip_whitespace_and_comments(cursor)?;
        if !matches!(cursor.peek()?, Some(b'0'..=b'9')) {
            return Ok(None);
        }

        let generation = match self.read_number(cursor)? {
            Number::Integer(g) => u16::try_from(g).ok(),
            Number::Real(_) => None,
        };
        let Some(generation) = generation else {
            return Ok(None);
        };

        let after_generation = cursor.position();
        lexer::skip_whitespace_and_comments(cursor)?;
        if cursor.position() == after_generation || !lexer::at_keyword(cursor, "R")? {
            return Ok(None);
        }
        cursor.next_byte()?;

        Ok(Some(generation))
    }

    fn enter(&self, depth: usize, offset: u64) -> PDFObjectResult<usize> {
        let depth = depth + 1;
        if depth > self.config.max_nesting_depth {
            warn!("Nesting limit {} exceeded at byte {}", self.config.max_nesting_depth, offset);
            return Err(PDFObjectError::NestingTooDeep {
                depth: self.config.max_nesting_depth,
                offset,
            });
        }
        Ok(depth)
    }
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}
