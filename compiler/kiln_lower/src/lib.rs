//! Control-flow lowering.
//!
//! Rewrites structured statements into a single flat block that contains
//! only variable declarations, expression statements, labels and
//! (conditional) gotos. Both evaluators consume this form; the compiled
//! backend additionally runs [`host_lower`] to make every result write
//! explicit.
//!
//! | Construct | Lowered form |
//! |-----------|--------------|
//! | `if c s` | `goto end unless c; s; end:` |
//! | `if c s else t` | `goto else unless c; s; goto end; else: t; end:` |
//! | `while c s` | `continue: goto break unless c; s; goto continue; break:` |
//! | `do s while c` | `continue: s; goto continue if c; break:` |
//! | `for i = a to b s` | `var i = a; let <upper>N = b; while i <= <upper>N { s; i = i + 1 }` |
//!
//! Labels are fresh per construct instance and never reused within one
//! lowering run.

mod host;

use kiln_ir::bound::{BoundBinaryOperator, BoundBlock, BoundExpr, BoundLabel, BoundStatement};
use kiln_ir::{TypeSymbol, Value, VariableSymbol};
use kiln_stack::ensure_sufficient_stack;

pub use host::host_lower;

/// Lower `statement` into a flat block.
pub fn lower(statement: BoundStatement) -> BoundBlock {
    let mut lowerer = Lowerer::default();
    let rewritten = lowerer.rewrite_statement(statement);
    tracing::debug!(
        labels = lowerer.label_count,
        hidden_variables = lowerer.upper_bound_count,
        "lowered program"
    );
    flatten(rewritten)
}

/// Splice nested blocks into their parent, depth first.
pub fn flatten(statement: BoundStatement) -> BoundBlock {
    fn splice(statement: BoundStatement, out: &mut Vec<BoundStatement>) {
        match statement {
            BoundStatement::Block(block) => {
                for inner in block.statements {
                    splice(inner, out);
                }
            }
            other => out.push(other),
        }
    }

    let mut statements = Vec::new();
    splice(statement, &mut statements);
    BoundBlock::new(statements)
}

#[derive(Default)]
struct Lowerer {
    label_count: u32,
    upper_bound_count: u32,
}

impl Lowerer {
    fn generate_label(&mut self) -> BoundLabel {
        self.label_count += 1;
        let label = BoundLabel::new(self.label_count);
        tracing::trace!(%label, "generated label");
        label
    }

    /// A read-only variable holding a `for` loop's upper bound. The name
    /// is not a valid identifier, so user code can never refer to it.
    fn generate_upper_bound(&mut self) -> VariableSymbol {
        self.upper_bound_count += 1;
        let variable = VariableSymbol::new(
            format!("<upper>{}", self.upper_bound_count),
            true,
            TypeSymbol::Int,
        );
        tracing::trace!(%variable, "generated upper bound variable");
        variable
    }

    fn rewrite_statement(&mut self, statement: BoundStatement) -> BoundStatement {
        ensure_sufficient_stack(|| match statement {
            BoundStatement::Block(block) => BoundStatement::Block(BoundBlock::new(
                block
                    .statements
                    .into_iter()
                    .map(|s| self.rewrite_statement(s))
                    .collect(),
            )),
            BoundStatement::If {
                condition,
                then_branch,
                else_branch,
            } => self.rewrite_if(condition, *then_branch, else_branch.map(|s| *s)),
            BoundStatement::While { condition, body } => self.rewrite_while(condition, *body),
            BoundStatement::DoWhile { body, condition } => self.rewrite_do_while(*body, condition),
            BoundStatement::For {
                variable,
                lower,
                upper,
                body,
            } => self.rewrite_for(variable, lower, upper, *body),
            other @ (BoundStatement::VariableDeclaration { .. }
            | BoundStatement::Expression(_)
            | BoundStatement::Goto(_)
            | BoundStatement::ConditionalGoto { .. }
            | BoundStatement::Label(_)
            | BoundStatement::AssignResult(_)) => other,
        })
    }

    fn rewrite_if(
        &mut self,
        condition: BoundExpr,
        then_branch: BoundStatement,
        else_branch: Option<BoundStatement>,
    ) -> BoundStatement {
        let statements = match else_branch {
            None => {
                let end = self.generate_label();
                vec![
                    BoundStatement::ConditionalGoto {
                        label: end,
                        condition,
                        jump_if_true: false,
                    },
                    then_branch,
                    BoundStatement::Label(end),
                ]
            }
            Some(else_branch) => {
                let else_label = self.generate_label();
                let end = self.generate_label();
                vec![
                    BoundStatement::ConditionalGoto {
                        label: else_label,
                        condition,
                        jump_if_true: false,
                    },
                    then_branch,
                    BoundStatement::Goto(end),
                    BoundStatement::Label(else_label),
                    else_branch,
                    BoundStatement::Label(end),
                ]
            }
        };
        self.rewrite_statement(BoundStatement::Block(BoundBlock::new(statements)))
    }

    fn rewrite_while(&mut self, condition: BoundExpr, body: BoundStatement) -> BoundStatement {
        let continue_label = self.generate_label();
        let break_label = self.generate_label();
        let statements = vec![
            BoundStatement::Label(continue_label),
            BoundStatement::ConditionalGoto {
                label: break_label,
                condition,
                jump_if_true: false,
            },
            body,
            BoundStatement::Goto(continue_label),
            BoundStatement::Label(break_label),
        ];
        self.rewrite_statement(BoundStatement::Block(BoundBlock::new(statements)))
    }

    fn rewrite_do_while(&mut self, body: BoundStatement, condition: BoundExpr) -> BoundStatement {
        let continue_label = self.generate_label();
        let break_label = self.generate_label();
        let statements = vec![
            BoundStatement::Label(continue_label),
            body,
            BoundStatement::ConditionalGoto {
                label: continue_label,
                condition,
                jump_if_true: true,
            },
            BoundStatement::Label(break_label),
        ];
        self.rewrite_statement(BoundStatement::Block(BoundBlock::new(statements)))
    }

    fn rewrite_for(
        &mut self,
        variable: VariableSymbol,
        lower: BoundExpr,
        upper: BoundExpr,
        body: BoundStatement,
    ) -> BoundStatement {
        let upper_bound = self.generate_upper_bound();

        let condition = BoundExpr::Binary {
            left: Box::new(BoundExpr::Variable(variable.clone())),
            op: BoundBinaryOperator::INT_LESS_OR_EQUALS,
            right: Box::new(BoundExpr::Variable(upper_bound.clone())),
        };
        let increment = BoundStatement::Expression(BoundExpr::Assignment {
            variable: variable.clone(),
            value: Box::new(BoundExpr::Binary {
                left: Box::new(BoundExpr::Variable(variable.clone())),
                op: BoundBinaryOperator::INT_ADDITION,
                right: Box::new(BoundExpr::Literal(Value::Int(1))),
            }),
        });

        let while_statement = BoundStatement::While {
            condition,
            body: Box::new(BoundStatement::Block(BoundBlock::new(vec![body, increment]))),
        };
        let statements = vec![
            BoundStatement::VariableDeclaration {
                variable,
                initializer: lower,
            },
            BoundStatement::VariableDeclaration {
                variable: upper_bound,
                initializer: upper,
            },
            while_statement,
        ];
        self.rewrite_statement(BoundStatement::Block(BoundBlock::new(statements)))
    }
}

#[cfg(test)]
mod tests;
