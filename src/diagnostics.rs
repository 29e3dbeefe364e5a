//! # Diagnostics Channel
//!
//! Recoverable oddities in a file (a visible record with an unexpected format
//! version, a stray label on an object attribute, a duplicate object name)
//! are reported as warnings rather than failing the parse. Warnings flow
//! through a [`DiagnosticSink`] injected into the [`File`](crate::File)
//! handle or passed to the standalone parser entry point; there is no global
//! logger and no process-wide state.
//!
//! [`NullSink`] discards everything and is the default. [`CollectSink`] is a
//! cheaply cloneable handle over a shared buffer, so a caller can keep one
//! clone, hand the other to the file, and inspect what accumulated.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// Receiver for non-fatal parse events.
pub trait DiagnosticSink {
    fn report(&mut self, severity: Severity, message: &str);
}

/// Discards every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _severity: Severity, _message: &str) {}
}

/// Buffers diagnostics for later inspection. Clones share one buffer.
#[derive(Debug, Default, Clone)]
pub struct CollectSink {
    entries: Rc<RefCell<Vec<(Severity, String)>>>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Messages recorded at `Severity::Warning`.
    pub fn warnings(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(severity, _)| *severity == Severity::Warning)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl DiagnosticSink for CollectSink {
    fn report(&mut self, severity: Severity, message: &str) {
        self.entries.borrow_mut().push((severity, message.to_string()));
    }
}
