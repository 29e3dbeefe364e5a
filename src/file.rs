//! # File Handle
//!
//! [`File`] ties the layers together for the common case: open a path, read
//! the storage unit label, enumerate bookmarks, assemble and parse the
//! records of interest.
//!
//! The handle exclusively owns its byte source and its diagnostic sink. All
//! operations take `&mut self`: indexing and assembly both move the stream
//! position, so interleaving them from multiple actors on one handle is
//! unsupported by construction. Closing is idempotent; operations on a
//! closed handle fail `Closed`, and dropping the handle releases the
//! underlying source on any exit path.

use std::path::Path;

use eyre::{Result, WrapErr};

use crate::diagnostics::{DiagnosticSink, NullSink};
use crate::eflr::{self, EflrRecord};
use crate::error::DlisError;
use crate::framing::{self, StorageUnitLabel};
use crate::records::{self, AssembledRecord, Bookmark};
use crate::storage::{ByteSource, FileSource, MmapSource};

pub struct File {
    source: Option<Box<dyn ByteSource>>,
    sink: Box<dyn DiagnosticSink>,
}

impl File {
    /// Opens a file with stream reads and diagnostics discarded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            source: Some(Box::new(FileSource::open(path)?)),
            sink: Box::new(NullSink),
        })
    }

    /// Opens a file backed by a read-only memory mapping.
    pub fn open_mapped<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            source: Some(Box::new(MmapSource::open(path)?)),
            sink: Box::new(NullSink),
        })
    }

    /// Opens a file with an injected diagnostic sink.
    pub fn with_sink<P: AsRef<Path>>(path: P, sink: Box<dyn DiagnosticSink>) -> Result<Self> {
        Ok(Self {
            source: Some(Box::new(FileSource::open(path)?)),
            sink,
        })
    }

    /// Releases the underlying source. Idempotent; later operations fail
    /// `Closed`.
    pub fn close(&mut self) {
        self.source = None;
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// True when no byte remains at the current position.
    pub fn eof(&mut self) -> Result<bool> {
        self.source()?.at_eof()
    }

    /// Reads the 80-byte storage unit label at the current position
    /// (offset 0 on a freshly opened file).
    pub fn sul(&mut self) -> Result<StorageUnitLabel> {
        framing::read_sul(self.source()?)
    }

    /// Advances past the next logical record and returns its bookmark plus
    /// the residual byte count to feed the next call. Start with residual 0
    /// immediately after the storage unit label.
    pub fn index_next(&mut self, residual: i64) -> Result<(Bookmark, i64)> {
        let source = self.source.as_deref_mut().ok_or(DlisError::Closed)?;
        records::index_next(source, residual, self.sink.as_mut())
            .wrap_err("indexing logical record")
    }

    /// Assembles the logical record at `bookmark` into one contiguous
    /// payload. Encrypted segments are rejected.
    pub fn assemble(&mut self, bookmark: &Bookmark) -> Result<AssembledRecord> {
        let source = self.source.as_deref_mut().ok_or(DlisError::Closed)?;
        records::assemble(source, bookmark, false, self.sink.as_mut())
            .wrap_err_with(|| format!("assembling record at offset {}", bookmark.position))
    }

    /// Assembles the record at `bookmark`, keeping encrypted segment bodies
    /// as raw, undecoded bytes.
    pub fn assemble_raw(&mut self, bookmark: &Bookmark) -> Result<AssembledRecord> {
        let source = self.source.as_deref_mut().ok_or(DlisError::Closed)?;
        records::assemble(source, bookmark, true, self.sink.as_mut())
    }

    /// Assembles and parses the explicitly formatted record at `bookmark`.
    pub fn parse_eflr(&mut self, bookmark: &Bookmark) -> Result<EflrRecord> {
        let assembled = self.assemble(bookmark)?;
        eflr::parse_eflr_with(&assembled.data, self.sink.as_mut())
    }

    fn source(&mut self) -> Result<&mut (dyn ByteSource + '_)> {
        match &mut self.source {
            Some(source) => Ok(source.as_mut()),
            None => Err(DlisError::Closed.into()),
        }
    }
}
