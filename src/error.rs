//! # Error Kinds
//!
//! Every failure produced by this crate carries a [`DlisError`] as its root
//! cause inside the `eyre::Report` it propagates. Callers that need to react
//! to a specific condition recover the kind with
//! `report.downcast_ref::<DlisError>()`; callers that only want a message can
//! print the report as-is.
//!
//! Short reads are classified: a read that fails because the file ended is
//! `UnexpectedEof`, any other read or seek failure is `Io`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DlisError {
    #[error("i/o failure on byte source")]
    Io(#[source] std::io::Error),

    #[error("unexpected end of file while reading {0}")]
    UnexpectedEof(String),

    #[error("operation on closed file")]
    Closed,

    #[error("unable to parse storage unit label: {0}")]
    BadSul(String),

    #[error("framing violation: {0}")]
    Framing(String),

    #[error("successor segment disagrees with chain on explicit formatting")]
    ChainMismatch,

    #[error("encrypted logical record segment")]
    Encrypted,

    #[error("undecodable component descriptor {0:#010b}")]
    BadComponent(u8),

    #[error("expected set component, got {0}")]
    ExpectedSet(&'static str),

    #[error("expected attribute component, got {0}")]
    ExpectedAttribute(&'static str),

    #[error("expected object component, got {0}")]
    ExpectedObject(&'static str),

    #[error("template attribute without label")]
    TemplateMissingLabel,

    #[error("truncated field: needed {needed} bytes, {remaining} remaining")]
    TruncatedField { needed: usize, remaining: usize },

    #[error("unknown representation code {0}")]
    UnknownReprc(u8),
}

/// Maps a failed read to `UnexpectedEof` or `Io` depending on whether the
/// source ran out of bytes. `what` names the structure being read.
pub(crate) fn classify_read(err: std::io::Error, what: &str) -> DlisError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        DlisError::UnexpectedEof(what.to_string())
    } else {
        DlisError::Io(err)
    }
}
