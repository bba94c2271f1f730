//! # Line/Segment Model
//!
//! The immutable [`Source`] buffer and the lightweight spans parsing produces
//! over it. Nothing here ever copies or mutates document text.
//!
//! - **`source`**: `Source`, an `xi_rope::Rope` plus its line index
//! - **`segment`**: `Segment`, a `[start, stop)` byte range with trimming helpers
//! - **`lines`**: `Lines`, the ordered segments owned by one tree node
//! - **`reader`**: `Reader`, the line cursor block parsers consume input through

pub mod lines;
pub mod reader;
pub mod segment;
pub mod source;

pub use lines::Lines;
pub use reader::Reader;
pub use segment::Segment;
pub use source::{Source, preview};

/// Whitespace as far as block structure is concerned.
#[must_use]
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// True for lines holding nothing but whitespace.
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.chars().all(is_space)
}

/// Returns `(columns, bytes)` of leading indentation, with tabs advancing to
/// the next multiple of four.
#[must_use]
pub fn indent_width(line: &str) -> (usize, usize) {
    let mut width = 0;
    let mut bytes = 0;
    for b in line.bytes() {
        match b {
            b' ' => width += 1,
            b'\t' => width += 4 - width % 4,
            _ => break,
        }
        bytes += 1;
    }
    (width, bytes)
}
