//! # Representation Codes and Primitive Decoders
//!
//! An assembled logical record is a flat byte buffer; everything inside it
//! is a sequence of primitively encoded values. This module provides the
//! decoding layer:
//!
//! - [`Cursor`]: a bounds-checked cursor over a payload. Every read that
//!   would pass the end of the buffer fails with `TruncatedField` carrying
//!   the requested and remaining byte counts; decoders never read past the
//!   payload.
//! - [`ReprCode`]: the standard representation-code numbering.
//! - [`decode`]: one pure function per representation code, plus the
//!   [`decode_value`](decode::decode_value) dispatch and
//!   [`decode_vector`](decode::decode_vector) for homogeneous sequences.
//!
//! ## Wire Format
//!
//! All multi-byte integers and IEEE floats are big-endian. Three codes
//! carry legacy float formats that need conversion:
//!
//! | Code   | Format                                            |
//! |--------|---------------------------------------------------|
//! | FSHORT | sign + 12-bit two's-complement fraction + 4-bit exponent |
//! | ISINGL | IBM System/360 hexadecimal single                 |
//! | VSINGL | VAX F-floating (word-swapped, excess-128 exponent)|
//!
//! Variable-width fields:
//!
//! | Code   | Layout                                            |
//! |--------|---------------------------------------------------|
//! | UVARI  | 1, 2 or 4 bytes selected by the top bits of byte 0 (`0…` = 1, `10` = 2, `11` = 4) |
//! | IDENT  | u8 length prefix + ASCII payload                  |
//! | ASCII  | UVARI length prefix + payload                     |
//! | OBNAME | UVARI origin + u8 copy + IDENT id                 |
//!
//! ## Thread Safety
//!
//! Everything here is a pure function over a borrowed slice; there is no
//! module state of any kind.

mod cursor;
pub mod decode;
mod reprc;

pub use cursor::Cursor;
pub use decode::{decode_value, decode_vector};
pub use reprc::ReprCode;
