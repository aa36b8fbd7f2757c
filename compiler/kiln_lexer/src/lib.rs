//! Lexer for Kiln using logos.
//!
//! Produces a token vector terminated by `Eof`. Malformed input becomes a
//! `TokenKind::Error` token plus a diagnostic, so the parser always sees a
//! complete stream.

mod escape;

use kiln_diagnostic::DiagnosticBag;
use kiln_ir::{Span, Token, TokenKind};
use logos::Logos;

use crate::escape::unescape_string;

/// Raw token from logos, before payload decoding.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
enum RawToken {
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("var")]
    Var,
    #[token("let")]
    Let,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("for")]
    For,
    #[token("to")]
    To,

    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("~")]
    Tilde,
    #[token("&&")]
    AmpAmp,
    #[token("&")]
    Amp,
    #[token("||")]
    PipePipe,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,

    // Range-checked during conversion so the diagnostic can quote the text.
    #[regex(r"[0-9]+")]
    Int,

    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    String,

    // Runs to end of line; only wins when the closing quote is missing.
    #[regex(r#""([^"\\\n\r]|\\.)*"#)]
    UnterminatedString,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Tokens and lexical diagnostics for one source text.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: DiagnosticBag,
}

/// Lex `source` into tokens. The last token is always `Eof`.
pub fn lex(source: &str) -> LexOutput {
    let mut output = LexOutput::default();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        let kind = match token_result {
            Ok(raw) => convert_token(raw, slice, span, &mut output.diagnostics),
            Err(()) => {
                output.diagnostics.report_bad_character(span, slice);
                TokenKind::Error
            }
        };
        output.tokens.push(Token::new(kind, span));
    }

    let eof_pos = u32::try_from(source.len()).unwrap_or(u32::MAX);
    output
        .tokens
        .push(Token::new(TokenKind::Eof, Span::point(eof_pos)));

    output
}

fn convert_token(
    raw: RawToken,
    slice: &str,
    span: Span,
    diagnostics: &mut DiagnosticBag,
) -> TokenKind {
    match raw {
        RawToken::Int => match slice.parse::<i32>() {
            Ok(n) => TokenKind::Int(n),
            Err(_) => {
                diagnostics.report_invalid_number(span, slice);
                TokenKind::Int(0)
            }
        },
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::Str(unescape_string(content))
        }
        RawToken::UnterminatedString => {
            diagnostics.report_unterminated_string(span);
            TokenKind::Str(unescape_string(&slice[1..]))
        }
        RawToken::Ident => TokenKind::Ident(slice.to_string()),

        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Var => TokenKind::Var,
        RawToken::Let => TokenKind::Let,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::Do => TokenKind::Do,
        RawToken::For => TokenKind::For,
        RawToken::To => TokenKind::To,

        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::Amp => TokenKind::Amp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
    }
}
