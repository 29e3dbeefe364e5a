use eyre::Result;

use super::Bookmark;
use crate::diagnostics::DiagnosticSink;
use crate::error::DlisError;
use crate::framing::{read_lrsh, read_vrl, SegmentAttributes, SegmentHeader};
use crate::storage::ByteSource;

/// Walks one successor-chain of segments from the current position and
/// returns a bookmark for it, plus the residual byte count of the visible
/// record left open after the chain.
///
/// `residual` is the byte count remaining in the currently open visible
/// record (0 at a visible record boundary). Segment bodies are skipped,
/// not read; only headers are decoded.
pub fn index_next(
    src: &mut dyn ByteSource,
    residual: i64,
    sink: &mut dyn DiagnosticSink,
) -> Result<(Bookmark, i64)> {
    let mut bookmark = Bookmark {
        position: src.tell()?,
        residual,
        is_eflr: false,
    };

    let mut remaining = residual;
    let mut first = true;

    loop {
        while remaining > 0 {
            let seg = read_lrsh(src)?;
            remaining = debit(remaining, &seg)?;

            let attrs = SegmentAttributes::from_byte(seg.attributes());
            chain_flag(&mut bookmark.is_eflr, &mut first, &attrs)?;

            src.skip(seg.body_len())?;

            if !attrs.has_successor {
                return Ok((bookmark, remaining));
            }
        }

        // remaining hit 0 exactly: the next bytes are a visible record label
        remaining = read_vrl(src, sink)?.payload_len();
    }
}

/// Subtracts one segment from the open visible record's remaining bytes.
pub(super) fn debit(remaining: i64, seg: &SegmentHeader) -> Result<i64> {
    let next = remaining - seg.length() as i64;
    if next < 0 {
        return Err(DlisError::Framing(format!(
            "segment length {} overruns visible record ({} bytes left)",
            seg.length(),
            remaining
        ))
        .into());
    }
    Ok(next)
}

/// Stamps `is_eflr` from the chain's first segment; later segments must
/// agree.
pub(super) fn chain_flag(
    is_eflr: &mut bool,
    first: &mut bool,
    attrs: &SegmentAttributes,
) -> Result<()> {
    if *first {
        *is_eflr = attrs.is_eflr;
        *first = false;
    } else if attrs.is_eflr != *is_eflr {
        return Err(DlisError::ChainMismatch.into());
    }
    Ok(())
}
