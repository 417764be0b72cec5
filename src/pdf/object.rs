//! PDF object types and serialization

use std::borrow::Borrow;
use std::fmt;
use super::lexer::is_regular;
use super::{Dictionary, Stream};

/// PDF object types
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value (lexeme without a decimal point)
    Integer(i64),
    /// Real value (lexeme with a decimal point)
    Real(f64),
    /// String value (literal or hexadecimal)
    String(Vec<u8>),
    /// Name object
    Name(Name),
    /// Array object
    Array(Vec<Object>),
    /// Dictionary object
    Dictionary(Dictionary),
    /// Stream object
    Stream(Stream),
    /// Indirect reference
    Reference(ObjectRef),
}

/// Name payload, without the leading `/` and with `#xx` escapes decoded
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Vec<u8>);

/// Reference to an indirect object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number
    pub number: u32,
    /// Generation number
    pub generation: u16,
}

/// Result of the numeric reader
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

/// Object definition found at a cross-reference offset (`N G obj ... endobj`)
#[derive(Debug, Clone, PartialEq)]
pub struct IndirectObject {
    /// Object number and generation from the header
    pub reference: ObjectRef,
    /// Object body
    pub object: Object,
}

impl Name {
    /// Create name from raw bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw bytes of the name
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Name as text, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Check for the empty name `/`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Write `/Name`, escaping bytes that would end or corrupt the token
    pub fn write_to(&self, output: &mut Vec<u8>) {
        output.push(b'/');
        for &b in &self.0 {
            if is_regular(b) && b != b'#' && (0x21..=0x7E).contains(&b) {
                output.push(b);
            } else {
                output.extend_from_slice(format!("#{:02X}", b).as_bytes());
            }
        }
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self(name.as_bytes().to_vec())
    }
}

impl From<&[u8]> for Name {
    fn from(name: &[u8]) -> Self {
        Self(name.to_vec())
    }
}

impl Borrow<[u8]> for Name {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = Vec::new();
        self.write_to(&mut out);
        f.write_str(&String::from_utf8_lossy(&out))
    }
}

impl ObjectRef {
    /// Create new object reference
    pub fn new(number: u32, generation: u16) -> Self {
        Self { number, generation }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

impl From<Number> for Object {
    fn from(number: Number) -> Self {
        match number {
            Number::Integer(i) => Object::Integer(i),
            Number::Real(r) => Object::Real(r),
        }
    }
}

impl From<Dictionary> for Object {
    fn from(dict: Dictionary) -> Self {
        Object::Dictionary(dict)
    }
}

impl From<Name> for Object {
    fn from(name: Name) -> Self {
        Object::Name(name)
    }
}

impl From<ObjectRef> for Object {
    fn from(reference: ObjectRef) -> Self {
        Object::Reference(reference)
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Boolean(value)
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Integer(value)
    }
}

impl Object {
    /// Type name of this object, without data
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::String(_) => "String",
            Object::Name(_) => "Name",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Stream(_) => "Stream",
            Object::Reference(_) => "Reference",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value as f64; integers widen
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Object::Integer(i) => Some(*i as f64),
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Object::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Object]> {
        match self {
            Object::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Dictionary of a dictionary or stream object
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream(s) => Some(s.dictionary()),
            _ => None,
        }
    }

    pub fn as_stream(&self) -> Option<&Stream> {
        match self {
            Object::Stream(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Serialize to textual object syntax
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut output = Vec::new();
        self.write_to(&mut output);
        output
    }

    /// Write object in textual syntax.
    ///
    /// Reading the output back yields an equal object, except for streams,
    /// whose payload is not held in memory: only the dictionary and the
    /// `stream` keyword are written.
    pub fn write_to(&self, output: &mut Vec<u8>) {
        match self {
            Object::Null => output.extend_from_slice(b"null"),
            Object::Boolean(b) => output.extend_from_slice(if *b { b"true" } else { b"false" }),
            Object::Integer(i) => output.extend_from_slice(i.to_string().as_bytes()),
            Object::Real(r) => write_real(*r, output),
            Object::String(s) => write_string(s, output),
            Object::Name(n) => n.write_to(output),
            Object::Array(a) => {
                output.push(b'[');
                for (i, item) in a.iter().enumerate() {
                    if i > 0 {
                        output.push(b' ');
                    }
                    item.write_to(output);
                }
                output.push(b']');
            }
            Object::Dictionary(d) => d.write_to(output),
            Object::Stream(s) => s.write_to(output),
            Object::Reference(r) => output.extend_from_slice(r.to_string().as_bytes()),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}

// f64's Display never uses exponent notation, which the format lacks
fn write_real(value: f64, output: &mut Vec<u8>) {
    let text = value.to_string();
    output.extend_from_slice(text.as_bytes());
    if !text.contains('.') {
        output.extend_from_slice(b".0");
    }
}

fn write_string(data: &[u8], output: &mut Vec<u8>) {
    let unprintable = data
        .iter()
        .filter(|&&b| !(0x20..=0x7E).contains(&b) && !matches!(b, b'\n' | b'\r' | b'\t'))
        .count();

    if unprintable * 4 > data.len() {
        output.push(b'<');
        output.extend_from_slice(hex::encode_upper(data).as_bytes());
        output.push(b'>');
        return;
    }

    output.push(b'(');
    for &b in data {
        match b {
            b'(' | b')' | b'\\' => output.extend_from_slice(&[b'\\', b]),
            b'\n' => output.extend_from_slice(b"\\n"),
            b'\r' => output.extend_from_slice(b"\\r"),
            b'\t' => output.extend_from_slice(b"\\t"),
            0x08 => output.extend_from_slice(b"\\b"),
            0x0C => output.extend_from_slice(b"\\f"),
            0x20..=0x7E => output.push(b),
            _ => output.extend_from_slice(format!("\\{:03o}", b).as_bytes()),
        }
    }
    output.push(b')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(object: &Object) -> String {
        String::from_utf8(object.to_bytes()).unwrap()
    }

    #[test]
    fn test_scalar_serialization() {
        assert_eq!(text(&Object::Null), "null");
        assert_eq!(text(&Object::Boolean(false)), "false");
        assert_eq!(text(&Object::Integer(-42)), "-42");
        assert_eq!(text(&Object::Real(1.0)), "1.0");
        assert_eq!(text(&Object::Real(-0.25)), "-0.25");
        assert_eq!(text(&Object::Real(1e20)), "100000000000000000000.0");
        assert_eq!(text(&Object::Reference(ObjectRef::new(12, 0))), "12 0 R");
    }

    #[test]
    fn test_name_escaping() {
        assert_eq!(text(&Object::Name(Name::from("Type"))), "/Type");
        assert_eq!(text(&Object::Name(Name::from("A B#C"))), "/A#20B#23C");
        assert_eq!(text(&Object::Name(Name::from("a/b(c)"))), "/a#2Fb#28c#29");
        assert_eq!(text(&Object::Name(Name::new(vec![0xE9]))), "/#E9");
        assert_eq!(text(&Object::Name(Name::default())), "/");
    }

    #[test]
    fn test_string_serialization() {
        assert_eq!(text(&Object::String(b"spam".to_vec())), "(spam)");
        assert_eq!(text(&Object::String(b"a(b)\\c".to_vec())), "(a\\(b\\)\\\\c)");
        assert_eq!(text(&Object::String(b"line\nbreak".to_vec())), "(line\\nbreak)");
        assert_eq!(text(&Object::String(b"abc\x01".to_vec())), "(abc\\001)");
        assert_eq!(text(&Object::String(vec![0x00, 0xFF, 0x10])), "<00FF10>");
    }

    #[test]
    fn test_array_serialization() {
        let array = Object::Array(vec![
            Object::Integer(42),
            Object::String(b"spam".to_vec()),
            Object::Array(vec![]),
            Object::Reference(ObjectRef::new(3, 1)),
        ]);
        assert_eq!(text(&array), "[42 (spam) [] 3 1 R]");
    }

    #[test]
    fn test_accessors() {
        let obj = Object::Integer(7);
        assert_eq!(obj.type_name(), "Integer");
        assert_eq!(obj.as_integer(), Some(7));
        assert_eq!(obj.as_real(), Some(7.0));
        assert_eq!(obj.as_name(), None);

        let obj = Object::Real(7.0);
        assert_eq!(obj.as_integer(), None);
        assert_ne!(obj, Object::Integer(7));

        let obj: Object = Name::from("Font").into();
        assert_eq!(obj.as_name().and_then(Name::as_str), Some("Font"));
        assert!(Object::Null.is_null());
    }
}
