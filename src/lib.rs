//! PDF Object Reader for Rust
//!
//! Turns bytes of PDF object syntax into typed values: null, booleans,
//! numbers, strings, names, arrays, dictionaries, indirect references and
//! streams. This is the layer a cross-reference resolver or content-stream
//! interpreter calls once it has located an object's offset.
//!
//! ```
//! use pdf_object_reader::{read_object, ByteCursor, Object, ObjectRef};
//!
//! let mut cursor = ByteCursor::from_bytes(b"[12 0 R (spam)]");
//! let object = read_object(&mut cursor)?;
//! assert_eq!(
//!     object,
//!     Object::Array(vec![
//!         Object::Reference(ObjectRef::new(12, 0)),
//!         Object::String(b"spam".to_vec()),
//!     ])
//! );
//! assert_eq!(cursor.position(), 15);
//! # Ok::<(), pdf_object_reader::PDFObjectError>(())
//! ```
//!
//! Stream data is never copied: a [`Stream`] records where its bytes live
//! and leaves decoding to a filter pipeline.

use std::io::{Read, Seek};

mod error;
mod pdf;

pub use error::{PDFObjectError, PDFObjectResult};
pub use pdf::lexer;
pub use pdf::{
    ByteCursor, ByteRange, Dictionary, IndirectObject, LengthResolver, Name, Number, Object,
    ObjectReader, ObjectRef, ReaderConfig, Stream, DEFAULT_MAX_NESTING_DEPTH,
};

/// Read one object with the default configuration
pub fn read_object<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> PDFObjectResult<Object> {
    ObjectReader::new().read(cursor)
}
