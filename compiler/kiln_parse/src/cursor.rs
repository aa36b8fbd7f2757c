//! Token cursor for navigating the token stream.

use kiln_diagnostic::DiagnosticBag;
use kiln_ir::ast::Ident;
use kiln_ir::{Span, Token, TokenKind};

/// Cursor over a token vector whose last token is `Eof`.
///
/// Expectation failures are reported into the bag and never abort: the
/// cursor stays put and the caller receives a placeholder, so parsing
/// always yields a complete tree.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Cursor at the first token. `tokens` must end with `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        debug_assert!(
            matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof),
            "token stream must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    /// Used for progress tracking.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Token at `offset` from the current one, clamped to `Eof`.
    pub fn peek(&self, offset: usize) -> &'a Token {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Token under the cursor.
    #[inline]
    pub fn current(&self) -> &'a Token {
        self.peek(0)
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token.
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// True once only `Eof` remains.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        *self.current_kind() == TokenKind::Eof
    }

    /// Check the current token's variant, ignoring payloads.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().same_kind(kind)
    }

    /// Consume the current token. Never moves past `Eof`.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Consume a token of `kind`, or report and return the current span.
    pub fn expect(&mut self, kind: &TokenKind, diagnostics: &mut DiagnosticBag) -> Span {
        if self.check(kind) {
            return self.advance().span;
        }
        let found = self.current();
        diagnostics.report_unexpected_token(found.span, &found.kind, kind);
        found.span
    }

    /// Consume an identifier, or report and return an empty-named one.
    pub fn expect_ident(&mut self, diagnostics: &mut DiagnosticBag) -> Ident {
        if let TokenKind::Ident(name) = self.current_kind() {
            let span = self.advance().span;
            return Ident {
                name: name.clone(),
                span,
            };
        }
        let found = self.current();
        diagnostics.report_unexpected_token(
            found.span,
            &found.kind,
            &TokenKind::Ident(String::new()),
        );
        Ident {
            name: String::new(),
            span: found.span,
        }
    }
}
