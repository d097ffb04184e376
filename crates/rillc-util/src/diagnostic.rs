//! Diagnostic module - error and warning reporting infrastructure.
//!
//! The front-end never aborts on a bad program. The scanner and the parser
//! both keep going after an error (panic-mode recovery on the parser side),
//! so findings are collected in a [`Handler`] instead of being returned as
//! `Err`. A phase reports into the handler as it runs; the caller inspects
//! the handler when the phase is done.
//!
//! Locations are line numbers. The token model is line-addressed, so
//! diagnostics carry the source line of the offending token or byte.
//!
//! # Examples
//!
//! ```
//! use rillc_util::diagnostic::Handler;
//!
//! let handler = Handler::new();
//! handler.error("unexpected token TK_CL", 12);
//!
//! assert!(handler.has_errors());
//! assert_eq!(handler.error_count(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// An error in the input program.
    Error,
    /// A finding that does not make the input invalid.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with severity and source line.
///
/// # Examples
///
/// ```
/// use rillc_util::diagnostic::{Diagnostic, Level};
///
/// let diag = Diagnostic::error("unknown symbol '&'", 3);
/// assert_eq!(diag.level, Level::Error);
/// assert_eq!(diag.line, 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// Severity level.
    pub level: Level,
    /// Main diagnostic message.
    pub message: String,
    /// Source line number (1-based).
    pub line: u32,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(level: Level, message: impl Into<String>, line: u32) -> Self {
        Self {
            level,
            message: message.into(),
            line,
        }
    }

    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>, line: u32) -> Self {
        Self::new(Level::Error, message, line)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>, line: u32) -> Self {
        Self::new(Level::Warning, message, line)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.level, self.message)
    }
}

/// Collector for diagnostics emitted during a front-end phase.
///
/// Uses interior mutability so that a phase holding a shared reference can
/// report while other parts of the pipeline hold the same handler.
///
/// # Examples
///
/// ```
/// use rillc_util::diagnostic::Handler;
///
/// let handler = Handler::new();
/// handler.error("expected TK_SEM but found TK_CL", 4);
///
/// if handler.has_errors() {
///     for diag in handler.take() {
///         eprintln!("{diag}");
///     }
/// }
/// ```
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create a new handler.
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Report an error at the given source line.
    pub fn error(&self, message: impl Into<String>, line: u32) {
        self.emit(Diagnostic::error(message, line));
    }

    /// Report a warning at the given source line.
    pub fn warning(&self, message: impl Into<String>, line: u32) {
        self.emit(Diagnostic::warning(message, line));
    }

    /// Emit a pre-built diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Check if any errors have been reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Number of errors reported so far.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Total number of diagnostics reported so far.
    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// True if no diagnostics have been reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    /// Drain all collected diagnostics, leaving the handler empty.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }

    /// Clone out the collected diagnostics without draining them.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}
