//! # dlis - DLIS (RP66 v1) Reader Core
//!
//! A reader for the binary, record-structured container format carrying
//! well-log measurements and their metadata. The crate decodes the nested
//! framing layers into addressable logical records and decodes explicitly
//! formatted records into a structured, queryable form.
//!
//! ## Quick Start
//!
//! ```ignore
//! use dlis::File;
//!
//! let mut file = File::open("survey.dlis")?;
//! let sul = file.sul()?;
//!
//! let mut residual = 0;
//! while !file.eof()? {
//!     let (bookmark, next) = file.index_next(residual)?;
//!     residual = next;
//!
//!     if bookmark.is_eflr {
//!         let record = file.parse_eflr(&bookmark)?;
//!         println!("{:?} with {} objects", record.set_type, record.len());
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │       Public handle (File)          │
//! ├─────────────────────────────────────┤
//! │  EFLR parser (template + objects)   │
//! ├─────────────────────────────────────┤
//! │  Record indexing & assembly         │
//! ├─────────────────────────────────────┤
//! │  Framing (SUL / VRL / LRSH)         │
//! ├─────────────────────────────────────┤
//! │  Primitive decoders (repr. codes)   │
//! ├─────────────────────────────────────┤
//! │  Byte sources (stream / mmap)       │
//! └─────────────────────────────────────┘
//! ```
//!
//! Control flow is caller-driven: `index_next` enumerates records without
//! buffering payload, then `assemble` and `parse_eflr` materialize the
//! records worth reading. Bookmarks are plain values and stay valid for as
//! long as the file content does.
//!
//! ## Errors and Diagnostics
//!
//! Every failure carries a [`DlisError`] kind recoverable via
//! `downcast_ref`; recoverable oddities surface as warnings through an
//! injected [`DiagnosticSink`] instead of failing the parse. There is no
//! global state of any kind.
//!
//! ## Module Overview
//!
//! - [`storage`]: seekable byte sources (plain file, memory mapping)
//! - [`framing`]: storage unit label, visible records, segment headers
//! - [`records`]: bookmark indexing and successor-chain assembly
//! - [`encoding`]: representation codes and primitive value decoding
//! - [`eflr`]: component descriptors and the record parser
//! - [`diagnostics`]: the injected warning channel

#[macro_use]
mod macros;

pub mod diagnostics;
pub mod eflr;
pub mod encoding;
pub mod error;
mod file;
pub mod framing;
pub mod records;
pub mod storage;
pub mod types;

pub use diagnostics::{CollectSink, DiagnosticSink, NullSink, Severity};
pub use eflr::{parse_eflr, parse_eflr_with, Attribute, EflrRecord, ObjectRow};
pub use encoding::ReprCode;
pub use error::DlisError;
pub use file::File;
pub use framing::{Layout, SegmentAttributes, StorageUnitLabel};
pub use records::{AssembledRecord, Bookmark};
pub use types::{DateTime, Obname, Value};
