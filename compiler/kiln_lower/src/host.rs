//! Second lowering stage for the compiled backend.
//!
//! After ordinary lowering, every expression statement is followed by an
//! [`BoundStatement::AssignResult`] marker, and every variable declaration
//! is followed by a read-back of the declared variable plus a marker. The
//! compiled routine's single result slot is written exactly at those
//! markers, which reproduces the tree-walker's "last value" behaviour.

use kiln_ir::bound::{BoundBlock, BoundExpr, BoundStatement};

use crate::lower;

/// Lower `statement` and insert result markers.
pub fn host_lower(statement: BoundStatement) -> BoundBlock {
    let lowered = lower(statement);
    let mut statements = Vec::with_capacity(lowered.statements.len() * 2);

    for statement in lowered.statements {
        match statement {
            BoundStatement::Expression(expression) => {
                let ty = expression.ty();
                statements.push(BoundStatement::Expression(expression));
                statements.push(BoundStatement::AssignResult(ty));
            }
            BoundStatement::VariableDeclaration {
                variable,
                initializer,
            } => {
                let ty = variable.ty();
                let read_back = BoundExpr::Variable(variable.clone());
                statements.push(BoundStatement::VariableDeclaration {
                    variable,
                    initializer,
                });
                statements.push(BoundStatement::Expression(read_back));
                statements.push(BoundStatement::AssignResult(ty));
            }
            other => statements.push(other),
        }
    }

    tracing::debug!(statements = statements.len(), "host-lowered program");
    BoundBlock::new(statements)
}
