//! A single user-facing error.
//!
//! Kiln has no warnings: any diagnostic blocks evaluation of its snippet.
//! Each one points at (at most) one span of that snippet, and is rendered
//! against the snippet's source through [`Diagnostic::located`].

use std::fmt;

use kiln_ir::Span;

use crate::span_utils::location;
use crate::ErrorCode;

/// The span a diagnostic points at, with a short message shown beside it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

/// A user-facing error produced by the lexer, parser or binder.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub label: Option<Label>,
    pub note: Option<String>,
}

impl Diagnostic {
    /// Start an error with `code`; message and label are filled in by the
    /// builder calls that follow.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            label: None,
            note: None,
        }
    }

    /// Set the headline message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Point at `span`. A second call replaces the first label.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.label = Some(Label {
            span,
            message: message.into(),
        });
        self
    }

    /// Attach a trailing `= note:` line.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Span the diagnostic points at, if it has a label.
    pub fn primary_span(&self) -> Option<Span> {
        self.label.as_ref().map(|label| label.span)
    }

    /// Render against `source` (read from `path`), resolving the label's
    /// span to `path:line:col`.
    pub fn located<'a>(&'a self, path: &'a str, source: &'a str) -> Located<'a> {
        Located {
            diagnostic: self,
            path,
            source,
        }
    }
}

/// `Display` adapter returned by [`Diagnostic::located`].
pub struct Located<'a> {
    diagnostic: &'a Diagnostic,
    path: &'a str,
    source: &'a str,
}

impl fmt::Display for Located<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagnostic = self.diagnostic;
        write!(f, "error[{}]: {}", diagnostic.code, diagnostic.message)?;
        if let Some(label) = &diagnostic.label {
            write!(
                f,
                "\n  --> {}: {}",
                location(self.path, self.source, label.span),
                label.message
            )?;
        }
        if let Some(note) = &diagnostic.note {
            write!(f, "\n  = note: {note}")?;
        }
        Ok(())
    }
}
