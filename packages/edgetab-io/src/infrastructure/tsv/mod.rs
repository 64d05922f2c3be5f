//! Tab-separated edge files
//!
//! The first non-comment line is the header. Fields are never quoted, and a
//! leading UTF-8 byte order mark is dropped. `-` as a path means stdin
//! (reader) or stdout (writer).

mod reader;
mod writer;

pub use reader::TsvReader;
pub use writer::TsvWriter;

/// Path spelling for the standard streams
pub const STDIO_PATH: &str = "-";

const FIELD_SEPARATOR: u8 = b'\t';
const COMMENT_PREFIX: u8 = b'#';
