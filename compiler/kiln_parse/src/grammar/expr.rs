//! Expression productions.
//!
//! Assignment is right-associative and recognised by an identifier
//! followed by `=`. Binary operators use precedence climbing; prefix
//! operators bind tighter than any binary operator.

use kiln_ir::ast::{BinaryOp, Expr, ExprKind, Ident, UnaryOp};
use kiln_ir::TokenKind;
use kiln_stack::ensure_sufficient_stack;

use crate::Parser;

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Amp => BinaryOp::BitAnd,
        TokenKind::AmpAmp => BinaryOp::And,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::PipePipe => BinaryOp::Or,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        _ => return None,
    })
}

fn unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    Some(match kind {
        TokenKind::Plus => UnaryOp::Plus,
        TokenKind::Minus => UnaryOp::Neg,
        TokenKind::Bang => UnaryOp::Not,
        TokenKind::Tilde => UnaryOp::BitNot,
        _ => return None,
    })
}

impl Parser<'_> {
    pub(crate) fn parse_expression(&mut self) -> Expr {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Expr {
        ensure_sufficient_stack(|| {
            let is_assignment = matches!(self.cursor.current_kind(), TokenKind::Ident(_))
                && self.cursor.peek(1).kind == TokenKind::Eq;
            if !is_assignment {
                return self.parse_binary(0);
            }

            let target = self.cursor.expect_ident(&mut self.diagnostics);
            self.cursor.advance();
            let value = self.parse_assignment();
            Expr {
                span: target.span.merge(value.span),
                kind: ExprKind::Assign {
                    target,
                    value: Box::new(value),
                },
            }
        })
    }

    fn parse_binary(&mut self, parent_precedence: u8) -> Expr {
        ensure_sufficient_stack(|| {
            let mut left = match unary_op(self.cursor.current_kind()) {
                Some(op) if UnaryOp::PRECEDENCE >= parent_precedence => {
                    let op_span = self.cursor.advance().span;
                    let operand = self.parse_binary(UnaryOp::PRECEDENCE);
                    Expr {
                        span: op_span.merge(operand.span),
                        kind: ExprKind::Unary {
                            op,
                            op_span,
                            operand: Box::new(operand),
                        },
                    }
                }
                _ => self.parse_primary(),
            };

            while let Some(op) = binary_op(self.cursor.current_kind()) {
                let precedence = op.precedence();
                if precedence <= parent_precedence {
                    break;
                }
                let op_span = self.cursor.advance().span;
                let right = self.parse_binary(precedence);
                left = Expr {
                    span: left.span.merge(right.span),
                    kind: ExprKind::Binary {
                        left: Box::new(left),
                        op,
                        op_span,
                        right: Box::new(right),
                    },
                };
            }

            left
        })
    }

    fn parse_primary(&mut self) -> Expr {
        let token = self.cursor.current();
        let span = token.span;
        let kind = match &token.kind {
            TokenKind::LParen => return self.parse_parenthesized(),
            TokenKind::True | TokenKind::False => {
                self.cursor.advance();
                ExprKind::Bool(token.kind == TokenKind::True)
            }
            TokenKind::Int(n) => {
                self.cursor.advance();
                ExprKind::Int(*n)
            }
            TokenKind::Str(s) => {
                self.cursor.advance();
                ExprKind::Str(s.clone())
            }
            TokenKind::Ident(name) => {
                self.cursor.advance();
                let ident = Ident {
                    name: name.clone(),
                    span,
                };
                if self.cursor.check(&TokenKind::LParen) {
                    return self.parse_call(ident);
                }
                ExprKind::Name(ident)
            }
            // Already reported by the lexer.
            TokenKind::Error => {
                self.cursor.advance();
                ExprKind::Error
            }
            found => {
                self.diagnostics.report_unexpected_token(
                    span,
                    found,
                    &TokenKind::Ident(String::new()),
                );
                ExprKind::Error
            }
        };
        Expr { kind, span }
    }

    fn parse_parenthesized(&mut self) -> Expr {
        let open = self.cursor.advance().span;
        let inner = self.parse_expression();
        let close = self.cursor.expect(&TokenKind::RParen, &mut self.diagnostics);
        Expr {
            kind: ExprKind::Paren(Box::new(inner)),
            span: open.merge(close),
        }
    }

    fn parse_call(&mut self, callee: Ident) -> Expr {
        self.cursor.advance();
        let mut args = Vec::new();

        while !self.cursor.is_at_end() && !self.cursor.check(&TokenKind::RParen) {
            let before = self.cursor.position();
            args.push(self.parse_expression());
            if self.cursor.check(&TokenKind::Comma) {
                self.cursor.advance();
            } else {
                break;
            }
            if self.cursor.position() == before {
                break;
            }
        }

        let close = self.cursor.expect(&TokenKind::RParen, &mut self.diagnostics);
        Expr {
            span: callee.span.merge(close),
            kind: ExprKind::Call { callee, args },
        }
    }
}
