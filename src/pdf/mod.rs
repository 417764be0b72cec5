//! PDF object syntax: byte cursor, lexer, object model and reader

mod cursor;
mod dict;
pub mod lexer;
mod object;
mod parser;
mod stream;

pub use cursor::ByteCursor;
pub use dict::Dictionary;
pub use object::{IndirectObject, Name, Number, Object, ObjectRef};
pub use parser::{ObjectReader, ReaderConfig, DEFAULT_MAX_NESTING_DEPTH};
pub use stream::{ByteRange, LengthResolver, Stream};
