//! Accumulating diagnostic sink.
//!
//! A checking run pushes every user-facing violation here and keeps going;
//! the caller flushes once at the end and decides what blocks interpretation.

use std::collections::HashSet;

use vela_ir::Span;

use crate::{Diagnostic, Severity};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before further errors are dropped
    /// (0 = unlimited).
    pub error_limit: usize,
    /// Deduplicate diagnostics with the same code and primary span.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 50,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// A config with no limits, for tests.
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queue for collecting and sorting diagnostics.
#[derive(Debug, Default)]
pub struct DiagnosticQueue {
    config: DiagnosticConfig,
    diagnostics: Vec<Diagnostic>,
    seen: HashSet<(Span, crate::ErrorCode)>,
    dropped: usize,
}

impl DiagnosticQueue {
    /// Create a queue with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    /// Create a queue with an explicit configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            diagnostics: Vec::new(),
            seen: HashSet::new(),
            dropped: 0,
        }
    }

    /// Add a diagnostic to the queue.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        if self.config.deduplicate {
            if let Some(span) = diagnostic.primary_span() {
                if !self.seen.insert((span, diagnostic.code)) {
                    self.dropped += 1;
                    return;
                }
            }
        }
        if self.config.error_limit != 0
            && diagnostic.severity == Severity::Error
            && self.error_count() >= self.config.error_limit
        {
            self.dropped += 1;
            return;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Number of queued diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of queued error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Error)
            .count()
    }

    /// Whether any error-severity diagnostic is queued.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    /// Diagnostics dropped by dedup or the error limit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Borrow the queued diagnostics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Drain the queue, sorted by primary span start (diagnostics without a
    /// primary span sort first, in insertion order).
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        self.seen.clear();
        diagnostics.sort_by_key(|diagnostic| {
            diagnostic.primary_span().map_or((0, 0), |s| (s.start, s.end))
        });
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use pretty_assertions::assert_eq;

    fn error_at(code: ErrorCode, start: u32) -> Diagnostic {
        Diagnostic::error(code)
            .with_message("test")
            .with_label(Span::new(start, start + 1), "here")
    }

    #[test]
    fn flush_sorts_by_primary_span() {
        let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
        queue.add(error_at(ErrorCode::E2001, 30));
        queue.add(error_at(ErrorCode::E2002, 10));
        queue.add(error_at(ErrorCode::E2003, 20));

        let flushed = queue.flush();
        let starts: Vec<u32> = flushed
            .iter()
            .map(|d| d.primary_span().unwrap().start)
            .collect();
        assert_eq!(starts, vec![10, 20, 30]);
    }

    #[test]
    fn dedup_drops_same_span_and_code() {
        let mut queue = DiagnosticQueue::new();
        queue.add(error_at(ErrorCode::E2001, 5));
        queue.add(error_at(ErrorCode::E2001, 5));
        queue.add(error_at(ErrorCode::E2002, 5));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dropped(), 1);
    }

    #[test]
    fn error_limit_drops_overflow() {
        let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
            error_limit: 2,
            deduplicate: false,
        });
        for start in 0..5 {
            queue.add(error_at(ErrorCode::E2001, start));
        }
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dropped(), 3);
    }

    #[test]
    fn warnings_do_not_count_against_error_limit() {
        let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
            error_limit: 1,
            deduplicate: false,
        });
        queue.add(error_at(ErrorCode::E2001, 0));
        queue.add(
            Diagnostic::warning(ErrorCode::E2002)
                .with_message("warn")
                .with_label(Span::new(1, 2), "here"),
        );
        assert_eq!(queue.len(), 2);
    }
}
