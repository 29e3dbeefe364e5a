//! # Byte Sources
//!
//! The framing layers consume a seekable, byte-oriented stream. This module
//! defines that contract ([`ByteSource`]) and two implementations:
//!
//! - [`FileSource`]: plain buffered-by-the-OS `std::fs::File` reads. The
//!   format is stream-oriented (headers are read in file order, bodies are
//!   skipped or copied), so ordinary reads and seeks fit it well.
//! - [`MmapSource`]: a read-only memory mapping with a cursor position.
//!   Useful when the same file is scanned repeatedly; reads become copies
//!   out of the mapping and seeks become pointer arithmetic.
//!
//! ## Error Classification
//!
//! A short read that hits end-of-file fails `UnexpectedEof`; any other
//! read or seek failure fails `Io`. Framing code relies on this split to
//! distinguish a truncated file from a faulty device.
//!
//! ## Resource Ownership
//!
//! A source exclusively owns its descriptor or mapping and releases it when
//! dropped, on every exit path. Sources carry no shared state.

mod source;

pub use source::{ByteSource, FileSource, MmapSource};
