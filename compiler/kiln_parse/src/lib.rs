//! Recursive descent parser for Kiln.
//!
//! Parsing never fails: malformed input is reported into the tree's
//! diagnostics and replaced by error nodes, so the binder always receives
//! a complete [`CompilationUnit`].

mod cursor;
mod grammar;

use std::sync::Arc;

pub use cursor::Cursor;

use kiln_diagnostic::{Diagnostic, DiagnosticBag};
use kiln_ir::ast::CompilationUnit;
use kiln_ir::{Span, Token};

/// A parsed snippet: its source, root and every lexical and syntactic
/// diagnostic, in source order.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    pub source: Arc<str>,
    pub root: CompilationUnit,
    pub diagnostics: Vec<Diagnostic>,
}

impl SyntaxTree {
    /// Lex and parse `source`, keeping every diagnostic.
    pub fn parse(source: impl Into<Arc<str>>) -> Self {
        let source = source.into();
        let lexed = kiln_lexer::lex(&source);
        let mut diagnostics = lexed.diagnostics;

        let mut parser = Parser::new(&lexed.tokens);
        let root = parser.parse_compilation_unit();
        diagnostics.extend(parser.diagnostics);

        SyntaxTree {
            source,
            root,
            diagnostics: diagnostics.into_vec(),
        }
    }
}

/// Parse `source` into a [`SyntaxTree`].
pub fn parse(source: &str) -> SyntaxTree {
    SyntaxTree::parse(source)
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    diagnostics: DiagnosticBag,
}

impl<'a> Parser<'a> {
    /// Parser over an `Eof`-terminated token stream.
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// Diagnostics reported while parsing.
    pub fn into_diagnostics(self) -> DiagnosticBag {
        self.diagnostics
    }

    /// Parse statements until end of input.
    pub fn parse_compilation_unit(&mut self) -> CompilationUnit {
        let start = self.cursor.current_span();
        let mut statements = Vec::new();

        while !self.cursor.is_at_end() {
            let before = self.cursor.position();
            statements.push(self.parse_statement());
            self.ensure_progress(before);
        }

        let end = self.cursor.current_span();
        CompilationUnit {
            statements,
            span: Span::new(start.start, end.end),
        }
    }

    /// Skip one token when a statement consumed nothing, so a stray token
    /// cannot stall the statement loop.
    fn ensure_progress(&mut self, before: usize) {
        if self.cursor.position() == before {
            self.cursor.advance();
        }
    }
}
