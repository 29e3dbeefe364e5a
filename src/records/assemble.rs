use eyre::Result;

use super::index::{chain_flag, debit};
use super::{AssembledRecord, Bookmark};
use crate::diagnostics::DiagnosticSink;
use crate::error::DlisError;
use crate::framing::{read_lrsh, read_vrl, SegmentAttributes};
use crate::storage::ByteSource;

/// Initial buffer reservation; most records fit a single visible record.
const RECORD_RESERVE: usize = 8 * 1024;

/// Concatenates the successor-chain at `bookmark` into one contiguous
/// payload buffer.
///
/// Each segment body is appended, then its trailer is stripped from the
/// tail in the order trailing length (2 bytes), checksum (2 bytes),
/// padding (the last byte is the pad count P; the last P bytes go,
/// including that count byte). An encrypted segment fails with `Encrypted`
/// unless `allow_encrypted` opts into raw, undecoded bytes.
pub fn assemble(
    src: &mut dyn ByteSource,
    bookmark: &Bookmark,
    allow_encrypted: bool,
    sink: &mut dyn DiagnosticSink,
) -> Result<AssembledRecord> {
    src.seek(bookmark.position)?;

    let mut data = Vec::with_capacity(RECORD_RESERVE);
    let mut remaining = bookmark.residual;
    let mut is_eflr = bookmark.is_eflr;
    let mut first = true;

    loop {
        while remaining > 0 {
            let seg = read_lrsh(src)?;
            remaining = debit(remaining, &seg)?;

            let attrs = SegmentAttributes::from_byte(seg.attributes());
            chain_flag(&mut is_eflr, &mut first, &attrs)?;

            if attrs.is_encrypted && !allow_encrypted {
                return Err(DlisError::Encrypted.into());
            }

            let start = data.len();
            data.resize(start + seg.body_len() as usize, 0);
            src.read_exact(&mut data[start..])?;

            strip_trailer(&mut data, start, &attrs)?;

            if !attrs.has_successor {
                return Ok(AssembledRecord { data, is_eflr });
            }
        }

        remaining = read_vrl(src, sink)?.payload_len();
    }
}

/// Removes the current segment's trailer from the buffer tail. `start` is
/// where this segment's body begins; the trailer may never eat into
/// earlier segments.
fn strip_trailer(data: &mut Vec<u8>, start: usize, attrs: &SegmentAttributes) -> Result<()> {
    let mut len = data.len();

    if attrs.has_trailing_length {
        len = drop_tail(len, start, 2, "trailing length")?;
    }
    if attrs.has_checksum {
        len = drop_tail(len, start, 2, "checksum")?;
    }
    if attrs.has_padding {
        if len == start {
            return Err(trailer_overrun("pad count"));
        }
        let pad = data[len - 1] as usize;
        if pad == 0 {
            // the count covers its own byte, so 0 cannot occur
            return Err(DlisError::Framing("segment pad count is zero".into()).into());
        }
        len = drop_tail(len, start, pad, "padding")?;
    }

    data.truncate(len);
    Ok(())
}

fn drop_tail(len: usize, start: usize, n: usize, what: &str) -> Result<usize> {
    if len - start < n {
        return Err(trailer_overrun(what));
    }
    Ok(len - n)
}

fn trailer_overrun(what: &str) -> eyre::Report {
    DlisError::Framing(format!("segment {} trailer overruns its body", what)).into()
}
