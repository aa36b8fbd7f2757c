//! Text dump of the bound tree, used by `kiln tree` and in tests.
//!
//! The format is a debugging aid, not a stable surface.

use std::fmt::{self, Write};

use super::{BoundBlock, BoundExpr, BoundStatement};
use crate::Value;

const INDENT: &str = "    ";

struct TreeWriter<'a, 'f> {
    out: &'a mut fmt::Formatter<'f>,
    depth: usize,
}

impl TreeWriter<'_, '_> {
    fn line(&mut self, text: fmt::Arguments<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            self.out.write_str(INDENT)?;
        }
        self.out.write_fmt(text)?;
        self.out.write_char('\n')
    }

    fn block(&mut self, block: &BoundBlock) -> fmt::Result {
        self.line(format_args!("{{"))?;
        self.depth += 1;
        for statement in &block.statements {
            self.statement(statement)?;
        }
        self.depth -= 1;
        self.line(format_args!("}}"))
    }

    /// Nested statement under a header line (`if`, `while`, ...).
    fn nested(&mut self, statement: &BoundStatement) -> fmt::Result {
        if matches!(statement, BoundStatement::Block(_)) {
            return self.statement(statement);
        }
        self.depth += 1;
        self.statement(statement)?;
        self.depth -= 1;
        Ok(())
    }

    fn statement(&mut self, statement: &BoundStatement) -> fmt::Result {
        match statement {
            BoundStatement::Block(block) => self.block(block),
            BoundStatement::VariableDeclaration {
                variable,
                initializer,
            } => {
                let keyword = if variable.is_read_only() { "let" } else { "var" };
                self.line(format_args!("{keyword} {variable} = {initializer}"))
            }
            BoundStatement::Expression(expr) => self.line(format_args!("{expr}")),
            BoundStatement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.line(format_args!("if {condition}"))?;
                self.nested(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.line(format_args!("else"))?;
                    self.nested(else_branch)?;
                }
                Ok(())
            }
            BoundStatement::While { condition, body } => {
                self.line(format_args!("while {condition}"))?;
                self.nested(body)
            }
            BoundStatement::DoWhile { body, condition } => {
                self.line(format_args!("do"))?;
                self.nested(body)?;
                self.line(format_args!("while {condition}"))
            }
            BoundStatement::For {
                variable,
                lower,
                upper,
                body,
            } => {
                self.line(format_args!("for {variable} = {lower} to {upper}"))?;
                self.nested(body)
            }
            BoundStatement::Goto(label) => self.line(format_args!("goto {label}")),
            BoundStatement::ConditionalGoto {
                label,
                condition,
                jump_if_true,
            } => {
                let word = if *jump_if_true { "if" } else { "unless" };
                self.line(format_args!("goto {label} {word} {condition}"))
            }
            BoundStatement::Label(label) => {
                // Labels hang one level out so jump targets stand out.
                let depth = self.depth;
                self.depth = depth.saturating_sub(1);
                let result = self.line(format_args!("{label}:"));
                self.depth = depth;
                result
            }
            BoundStatement::AssignResult(ty) => self.line(format_args!("<result> = {ty}")),
        }
    }
}

impl fmt::Display for BoundBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TreeWriter { out: f, depth: 0 }.block(self)
    }
}

impl fmt::Display for BoundStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TreeWriter { out: f, depth: 0 }.statement(self)
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    let Value::Str(text) = value else {
        return write!(f, "{value}");
    };
    f.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            _ => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl fmt::Display for BoundExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundExpr::Error => f.write_str("?"),
            BoundExpr::Literal(value) => write_literal(f, value),
            BoundExpr::Variable(variable) => write!(f, "{variable}"),
            BoundExpr::Assignment { variable, value } => write!(f, "{variable} = {value}"),
            BoundExpr::Unary { op, operand } => write!(f, "{}{operand}", op.syntax),
            BoundExpr::Binary { left, op, right } => write!(f, "({left} {} {right})", op.syntax),
            BoundExpr::Call {
                function,
                arguments,
            } => {
                write!(f, "{function}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_char(')')
            }
            BoundExpr::Conversion { ty, expression } => write!(f, "{ty}({expression})"),
        }
    }
}
