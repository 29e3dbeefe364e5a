//! # Framing Layers
//!
//! A storage unit is wrapped in three nested layers before any logical
//! record becomes visible:
//!
//! ```text
//! +--------------------------------------------------------------+
//! | SUL (80 bytes, ASCII)                                        |
//! +--------------------------------------------------------------+
//! | VRL | segment | segment | seg... | VRL | ...ment | segment   |
//! +--------------------------------------------------------------+
//!         ^ a logical record is a successor-chain of segments,
//!           and a visible record boundary may cut a chain (and
//!           even a segment stream) anywhere between segments
//! ```
//!
//! This module decodes the three header shapes — [`StorageUnitLabel`],
//! [`VisibleRecordLabel`], [`SegmentHeader`] plus its
//! [`SegmentAttributes`] flag bits — and provides the `read_*` operations
//! over a [`ByteSource`](crate::storage::ByteSource).
//!
//! ## Failure Model
//!
//! Malformed header content is `BadSul` (for the label) or `Framing` (for
//! the record layers); a header cut short by end-of-file is
//! `UnexpectedEof`. A visible record with a format version other than 1 is
//! only a warning: the length field is still trusted, which matches how
//! such files occur in the wild.

mod headers;
mod sul;

pub use headers::{
    SegmentAttributes, SegmentHeader, VisibleRecordLabel, SEGMENT_HEADER_SIZE, VRL_PAD_BYTE,
    VISIBLE_RECORD_LABEL_SIZE,
};
pub use sul::{Layout, StorageUnitLabel, SUL_SIZE};

use eyre::Result;
use zerocopy::FromBytes;

use crate::diagnostics::{DiagnosticSink, Severity};
use crate::error::DlisError;
use crate::storage::ByteSource;

/// Reads and decodes the 80-byte storage unit label at the current
/// position.
pub fn read_sul(src: &mut dyn ByteSource) -> Result<StorageUnitLabel> {
    let mut buf = [0u8; SUL_SIZE];
    src.read_exact(&mut buf)?;
    StorageUnitLabel::parse(&buf)
}

/// Reads a visible record label. A version other than 1 is reported as a
/// warning; the returned length is still usable.
pub fn read_vrl(
    src: &mut dyn ByteSource,
    sink: &mut dyn DiagnosticSink,
) -> Result<VisibleRecordLabel> {
    let mut buf = [0u8; VISIBLE_RECORD_LABEL_SIZE];
    src.read_exact(&mut buf)?;

    let vrl = VisibleRecordLabel::read_from_bytes(&buf[..])
        .map_err(|_| DlisError::Framing("visible record label too short".into()))?;

    if vrl.padding() != VRL_PAD_BYTE {
        return Err(DlisError::Framing(format!(
            "visible record label pad byte {:#04x}, expected {:#04x}",
            vrl.padding(),
            VRL_PAD_BYTE
        ))
        .into());
    }

    if vrl.version() != 1 {
        sink.report(
            Severity::Warning,
            &format!("visible record format version {}, expected 1", vrl.version()),
        );
    }

    Ok(vrl)
}

/// Reads a logical record segment header.
pub fn read_lrsh(src: &mut dyn ByteSource) -> Result<SegmentHeader> {
    let mut buf = [0u8; SEGMENT_HEADER_SIZE];
    src.read_exact(&mut buf)?;

    let seg = SegmentHeader::read_from_bytes(&buf[..])
        .map_err(|_| DlisError::Framing("segment header too short".into()))?;

    if (seg.length() as usize) < SEGMENT_HEADER_SIZE {
        return Err(DlisError::Framing(format!(
            "segment length {} shorter than its own header",
            seg.length()
        ))
        .into());
    }

    Ok(seg)
}
