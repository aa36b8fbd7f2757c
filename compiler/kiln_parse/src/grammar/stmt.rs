//! Statement productions.

use kiln_ir::ast::{Stmt, StmtKind};
use kiln_ir::TokenKind;
use kiln_stack::ensure_sufficient_stack;

use crate::Parser;

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> Stmt {
        ensure_sufficient_stack(|| match self.cursor.current_kind() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Var | TokenKind::Let => self.parse_variable_declaration(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Do => self.parse_do_while(),
            TokenKind::For => self.parse_for(),
            _ => {
                let expr = self.parse_expression();
                Stmt {
                    span: expr.span,
                    kind: StmtKind::Expr(expr),
                }
            }
        })
    }

    fn parse_block(&mut self) -> Stmt {
        let open = self.cursor.expect(&TokenKind::LBrace, &mut self.diagnostics);
        let mut statements = Vec::new();

        while !self.cursor.is_at_end() && !self.cursor.check(&TokenKind::RBrace) {
            let before = self.cursor.position();
            statements.push(self.parse_statement());
            self.ensure_progress(before);
        }

        let close = self.cursor.expect(&TokenKind::RBrace, &mut self.diagnostics);
        Stmt {
            kind: StmtKind::Block(statements),
            span: open.merge(close),
        }
    }

    fn parse_variable_declaration(&mut self) -> Stmt {
        let keyword = self.cursor.advance();
        let read_only = keyword.kind == TokenKind::Let;
        let name = self.cursor.expect_ident(&mut self.diagnostics);
        self.cursor.expect(&TokenKind::Eq, &mut self.diagnostics);
        let init = self.parse_expression();

        Stmt {
            span: keyword.span.merge(init.span),
            kind: StmtKind::VarDecl {
                name,
                read_only,
                init,
            },
        }
    }

    fn parse_if(&mut self) -> Stmt {
        let keyword = self.cursor.advance().span;
        let cond = self.parse_expression();
        let then_branch = Box::new(self.parse_statement());

        let else_branch = if self.cursor.check(&TokenKind::Else) {
            self.cursor.advance();
            Some(Box::new(self.parse_statement()))
        } else {
            None
        };

        let end = else_branch.as_ref().map_or(then_branch.span, |s| s.span);
        Stmt {
            kind: StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            span: keyword.merge(end),
        }
    }

    fn parse_while(&mut self) -> Stmt {
        let keyword = self.cursor.advance().span;
        let cond = self.parse_expression();
        let body = Box::new(self.parse_statement());

        Stmt {
            span: keyword.merge(body.span),
            kind: StmtKind::While { cond, body },
        }
    }

    fn parse_do_while(&mut self) -> Stmt {
        let keyword = self.cursor.advance().span;
        let body = Box::new(self.parse_statement());
        self.cursor.expect(&TokenKind::While, &mut self.diagnostics);
        let cond = self.parse_expression();

        Stmt {
            span: keyword.merge(cond.span),
            kind: StmtKind::DoWhile { body, cond },
        }
    }

    fn parse_for(&mut self) -> Stmt {
        let keyword = self.cursor.advance().span;
        let var = self.cursor.expect_ident(&mut self.diagnostics);
        self.cursor.expect(&TokenKind::Eq, &mut self.diagnostics);
        let lower = self.parse_expression();
        self.cursor.expect(&TokenKind::To, &mut self.diagnostics);
        let upper = self.parse_expression();
        let body = Box::new(self.parse_statement());

        Stmt {
            span: keyword.merge(body.span),
            kind: StmtKind::For {
                var,
                lower,
                upper,
                body,
            },
        }
    }
}
