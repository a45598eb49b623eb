//! Diagnostic reporting.
//!
//! Placement problems never abort a build; they are reported through a
//! [`DiagnosticSink`] passed in by the caller. [`TracingSink`] forwards to
//! `tracing`, [`CollectingSink`] keeps everything for inspection.

use std::fmt;

use crate::models::{ActivityIndex, Ref, SlotIndex};

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// What a diagnostic is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A fixed activity could not take its slot; it was demoted.
    FixedPlacementConflict {
        activity: ActivityIndex,
        slot: SlotIndex,
        course: Ref,
        /// Activity already holding a needed cell, if known.
        blocked_by: Option<ActivityIndex>,
    },
    /// A pre-assigned, non-fixed activity could not take its slot.
    PlacementConflict {
        activity: ActivityIndex,
        slot: SlotIndex,
        course: Ref,
        blocked_by: Option<ActivityIndex>,
    },
    /// A pre-assigned slot is outside the grid or overruns the day.
    IllegalSlot {
        activity: ActivityIndex,
        course: Ref,
    },
    /// A course pulls in the same atomic group more than once.
    RepeatedAtomicGroup { course: Ref },
    /// Free-form note.
    Note,
}

/// A single reported problem or note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
        }
    }

    /// Activity the diagnostic refers to, if any.
    pub fn activity(&self) -> Option<ActivityIndex> {
        match &self.kind {
            DiagnosticKind::FixedPlacementConflict { activity, .. }
            | DiagnosticKind::PlacementConflict { activity, .. }
            | DiagnosticKind::IllegalSlot { activity, .. } => Some(*activity),
            DiagnosticKind::RepeatedAtomicGroup { .. } | DiagnosticKind::Note => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Receiver of build diagnostics.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);

    fn info(&mut self, kind: DiagnosticKind, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.emit(Diagnostic::new(Severity::Info, kind, message));
    }

    fn warning(&mut self, kind: DiagnosticKind, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.emit(Diagnostic::new(Severity::Warning, kind, message));
    }

    fn error(&mut self, kind: DiagnosticKind, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.emit(Diagnostic::new(Severity::Error, kind, message));
    }
}

/// Forwards diagnostics to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let activity = diagnostic.activity();
        match diagnostic.severity {
            Severity::Info => tracing::info!(?activity, "{}", diagnostic.message),
            Severity::Warning => tracing::warn!(?activity, "{}", diagnostic.message),
            Severity::Error => tracing::error!(?activity, "{}", diagnostic.message),
        }
    }
}

/// Stores every diagnostic in emission order.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics of exactly the given severity.
    pub fn with_severity(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink() {
        let mut sink = CollectingSink::new();
        sink.info(DiagnosticKind::Note, "hello");
        sink.warning(
            DiagnosticKind::RepeatedAtomicGroup {
                course: "C1".into(),
            },
            "repeated",
        );
        sink.error(
            DiagnosticKind::IllegalSlot {
                activity: 4,
                course: "C1".into(),
            },
            "bad slot",
        );

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.with_severity(Severity::Warning).len(), 1);
        let err = sink.with_severity(Severity::Error)[0];
        assert_eq!(err.activity(), Some(4));
        assert_eq!(err.to_string(), "bad slot");
    }

    #[test]
    fn test_sink_through_mut_ref() {
        fn note_twice<S: DiagnosticSink>(mut sink: S) {
            sink.info(DiagnosticKind::Note, "one");
            sink.info(DiagnosticKind::Note, "two");
        }

        let mut inner = CollectingSink::new();
        note_twice(&mut inner);
        let dyn_sink: &mut dyn DiagnosticSink = &mut inner;
        note_twice(dyn_sink);
        assert_eq!(inner.len(), 4);
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }
}
