//! Ordered collection of diagnostics with one constructor per error.
//!
//! Each phase owns a bag, reports into it, and hands the contents to the
//! session. Order is report order, which is source order for every phase.

use kiln_ir::{Span, TokenKind, TypeSymbol};

use crate::{Diagnostic, ErrorCode};

/// Diagnostics of one phase, in report order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already built diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Append every diagnostic of another phase.
    pub fn extend(&mut self, other: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(other);
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Consume the bag, keeping report order.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    // Lexer

    /// A string literal runs to the end of the input.
    pub fn report_unterminated_string(&mut self, span: Span) {
        self.push(
            Diagnostic::error(ErrorCode::E0001)
                .with_message("unterminated string literal")
                .with_label(span, "string starts here"),
        );
    }

    /// A character that starts no token.
    pub fn report_bad_character(&mut self, span: Span, text: &str) {
        self.push(
            Diagnostic::error(ErrorCode::E0002)
                .with_message(format!("unexpected character `{text}`"))
                .with_label(span, "not valid here"),
        );
    }

    /// An integer literal outside the `int` range.
    pub fn report_invalid_number(&mut self, span: Span, text: &str) {
        self.push(
            Diagnostic::error(ErrorCode::E0003)
                .with_message(format!("the number {text} does not fit in an `int`"))
                .with_label(span, "out of range")
                .with_note(format!("an `int` holds {} to {}", i32::MIN, i32::MAX)),
        );
    }

    // Parser

    /// The parser needed `expected` but saw `found`.
    pub fn report_unexpected_token(&mut self, span: Span, found: &TokenKind, expected: &TokenKind) {
        self.push(
            Diagnostic::error(ErrorCode::E1001)
                .with_message(format!("expected {expected}, found {found}"))
                .with_label(span, format!("expected {expected}")),
        );
    }

    // Binder

    /// An expression of type `from` used where `to` is required.
    pub fn report_cannot_convert(&mut self, span: Span, from: TypeSymbol, to: TypeSymbol) {
        self.push(
            Diagnostic::error(ErrorCode::E2001)
                .with_message(format!("cannot convert `{from}` to `{to}`"))
                .with_label(span, format!("this is `{from}`")),
        );
    }

    /// No unary operator `op` exists for `operand`.
    pub fn report_undefined_unary_operator(&mut self, span: Span, op: &str, operand: TypeSymbol) {
        self.push(
            Diagnostic::error(ErrorCode::E2002)
                .with_message(format!("unary operator `{op}` is not defined for `{operand}`"))
                .with_label(span, "no such operator"),
        );
    }

    /// No binary operator `op` exists for the operand types.
    pub fn report_undefined_binary_operator(
        &mut self,
        span: Span,
        op: &str,
        left: TypeSymbol,
        right: TypeSymbol,
    ) {
        self.push(
            Diagnostic::error(ErrorCode::E2002)
                .with_message(format!(
                    "binary operator `{op}` is not defined for `{left}` and `{right}`"
                ))
                .with_label(span, "no such operator"),
        );
    }

    /// A name that no enclosing scope declares.
    pub fn report_undefined_variable(&mut self, span: Span, name: &str) {
        self.push(
            Diagnostic::error(ErrorCode::E2003)
                .with_message(format!("cannot find variable `{name}`"))
                .with_label(span, "not found in this scope"),
        );
    }

    /// A call with too many or too few arguments.
    pub fn report_wrong_argument_count(
        &mut self,
        span: Span,
        function: &str,
        expected: usize,
        actual: usize,
    ) {
        self.push(
            Diagnostic::error(ErrorCode::E2004)
                .with_message(format!(
                    "function `{function}` takes {expected} argument(s) but {actual} were given"
                ))
                .with_label(span, format!("expected {expected}")),
        );
    }

    /// An argument whose type does not match its parameter.
    pub fn report_wrong_argument_type(
        &mut self,
        span: Span,
        parameter: &str,
        expected: TypeSymbol,
        actual: TypeSymbol,
    ) {
        self.push(
            Diagnostic::error(ErrorCode::E2005)
                .with_message(format!(
                    "parameter `{parameter}` expects `{expected}` but was given `{actual}`"
                ))
                .with_label(span, format!("this is `{actual}`")),
        );
    }

    /// A second declaration of `name` in the same scope.
    pub fn report_variable_already_declared(&mut self, span: Span, name: &str) {
        self.push(
            Diagnostic::error(ErrorCode::E2006)
                .with_message(format!("variable `{name}` is already declared"))
                .with_label(span, "declared again here"),
        );
    }

    /// An assignment to a `let` variable.
    pub fn report_cannot_assign(&mut self, span: Span, name: &str) {
        self.push(
            Diagnostic::error(ErrorCode::E2007)
                .with_message(format!("cannot assign to read-only variable `{name}`"))
                .with_label(span, "declared with `let`"),
        );
    }

    /// A call to a function that is neither built in nor a type name.
    pub fn report_undefined_function(&mut self, span: Span, name: &str) {
        self.push(
            Diagnostic::error(ErrorCode::E2008)
                .with_message(format!("cannot find function `{name}`"))
                .with_label(span, "not a built-in function"),
        );
    }

    /// A `void` call used where a value is needed.
    pub fn report_expression_must_have_value(&mut self, span: Span) {
        self.push(
            Diagnostic::error(ErrorCode::E2009)
                .with_message("expression must have a value")
                .with_label(span, "this expression is `void`"),
        );
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

#[cfg(test)]
mod tests;
