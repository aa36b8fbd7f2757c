//! Tree-walking evaluator over a lowered block.
//!
//! The block is flat, so evaluation is a loop over statement indices.
//! Labels are resolved once up front; gotos overwrite the index instead
//! of recursing, which lets them jump backward as easily as forward.

use rustc_hash::FxHashMap;

use kiln_ir::bound::{
    BoundBinaryOperator, BoundBinaryOperatorKind, BoundBlock, BoundExpr, BoundLabel,
    BoundStatement, BoundUnaryOperator, BoundUnaryOperatorKind,
};
use kiln_ir::{FunctionSymbol, TypeSymbol, Value, VariableSymbol, Variables};
use kiln_stack::ensure_sufficient_stack;

use crate::{Builtin, Console, EvalError, InternalError};

const PHASE: &str = "tree-walking evaluator";

/// Evaluate a lowered program, updating `variables` in place.
///
/// Returns the value of the last executed expression statement or
/// variable declaration, or `Value::Void` if there was none.
pub fn evaluate(
    program: &BoundBlock,
    variables: &mut Variables,
    console: &Console,
) -> Result<Value, EvalError> {
    Evaluator::new(program, variables, console).run()
}

/// Program-counter interpreter over one lowered block.
pub struct Evaluator<'a> {
    program: &'a BoundBlock,
    variables: &'a mut Variables,
    console: &'a Console,
    last_value: Value,
}

impl<'a> Evaluator<'a> {
    /// Prepare to run `program` against `variables`.
    pub fn new(program: &'a BoundBlock, variables: &'a mut Variables, console: &'a Console) -> Self {
        Evaluator {
            program,
            variables,
            console,
            last_value: Value::Void,
        }
    }

    /// Execute to the end of the block and return the last value.
    pub fn run(mut self) -> Result<Value, EvalError> {
        let program = self.program;
        let statements = &program.statements;
        let labels = label_targets(statements);
        tracing::debug!(
            statements = statements.len(),
            labels = labels.len(),
            "tree-walking evaluation"
        );

        let jump = |label: &BoundLabel| {
            labels
                .get(label)
                .copied()
                .ok_or(InternalError::UnmarkedLabel(*label))
        };

        let mut index = 0;
        while let Some(statement) = statements.get(index) {
            match statement {
                BoundStatement::VariableDeclaration {
                    variable,
                    initializer,
                } => {
                    let value = self.evaluate_expression(initializer)?;
                    self.variables.insert(variable.clone(), value.clone());
                    self.last_value = value;
                    index += 1;
                }
                BoundStatement::Expression(expression) => {
                    self.last_value = self.evaluate_expression(expression)?;
                    index += 1;
                }
                BoundStatement::Goto(label) => index = jump(label)?,
                BoundStatement::ConditionalGoto {
                    label,
                    condition,
                    jump_if_true,
                } => {
                    let condition = as_bool(self.evaluate_expression(condition)?)?;
                    index = if condition == *jump_if_true {
                        jump(label)?
                    } else {
                        index + 1
                    };
                }
                BoundStatement::Label(_) => index += 1,
                other @ (BoundStatement::Block(_)
                | BoundStatement::If { .. }
                | BoundStatement::While { .. }
                | BoundStatement::DoWhile { .. }
                | BoundStatement::For { .. }
                | BoundStatement::AssignResult(_)) => {
                    return Err(unexpected(other.kind_name()).into());
                }
            }
        }

        Ok(self.last_value)
    }

    fn evaluate_expression(&mut self, expression: &BoundExpr) -> Result<Value, EvalError> {
        ensure_sufficient_stack(|| match expression {
            BoundExpr::Literal(value) => Ok(value.clone()),
            BoundExpr::Variable(variable) => Ok(self.read(variable)),
            BoundExpr::Assignment { variable, value } => {
                let value = self.evaluate_expression(value)?;
                self.variables.insert(variable.clone(), value.clone());
                Ok(value)
            }
            BoundExpr::Unary { op, operand } => {
                let operand = self.evaluate_expression(operand)?;
                evaluate_unary(*op, operand)
            }
            BoundExpr::Binary { left, op, right } => {
                let left = self.evaluate_expression(left)?;
                let right = self.evaluate_expression(right)?;
                evaluate_binary(*op, left, right)
            }
            BoundExpr::Call {
                function,
                arguments,
            } => self.evaluate_call(function, arguments),
            BoundExpr::Conversion { ty, expression } => {
                let builtin = Builtin::for_conversion(expression.ty(), *ty)?;
                let value = self.evaluate_expression(expression)?;
                builtin.invoke(&[value], self.console)
            }
            BoundExpr::Error => Err(unexpected(expression.kind_name()).into()),
        })
    }

    fn evaluate_call(
        &mut self,
        function: &FunctionSymbol,
        arguments: &[BoundExpr],
    ) -> Result<Value, EvalError> {
        let builtin = Builtin::for_function(function)?;
        let args = arguments
            .iter()
            .map(|argument| self.evaluate_expression(argument))
            .collect::<Result<Vec<_>, _>>()?;
        builtin.invoke(&args, self.console)
    }

    /// A variable absent from the bindings reads as its type's default.
    fn read(&self, variable: &VariableSymbol) -> Value {
        self.variables
            .get(variable)
            .cloned()
            .unwrap_or_else(|| variable.ty().default_value())
    }
}

/// Map each label to the index just past its mark.
fn label_targets(statements: &[BoundStatement]) -> FxHashMap<BoundLabel, usize> {
    statements
        .iter()
        .enumerate()
        .filter_map(|(i, statement)| match statement {
            BoundStatement::Label(label) => Some((*label, i + 1)),
            _ => None,
        })
        .collect()
}

fn unexpected(kind: &'static str) -> InternalError {
    InternalError::UnexpectedNode { phase: PHASE, kind }
}

fn as_bool(value: Value) -> Result<bool, InternalError> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(InternalError::OperandType {
            expected: TypeSymbol::Bool,
            found: other.ty(),
        }),
    }
}

fn as_int(value: Value) -> Result<i32, InternalError> {
    match value {
        Value::Int(n) => Ok(n),
        other => Err(InternalError::OperandType {
            expected: TypeSymbol::Int,
            found: other.ty(),
        }),
    }
}

fn evaluate_unary(op: BoundUnaryOperator, operand: Value) -> Result<Value, EvalError> {
    Ok(match op.kind {
        BoundUnaryOperatorKind::Identity => Value::Int(as_int(operand)?),
        BoundUnaryOperatorKind::Negation => Value::Int(as_int(operand)?.wrapping_neg()),
        BoundUnaryOperatorKind::LogicalNegation => Value::Bool(!as_bool(operand)?),
        BoundUnaryOperatorKind::OnesComplement => Value::Int(!as_int(operand)?),
    })
}

fn evaluate_binary(op: BoundBinaryOperator, left: Value, right: Value) -> Result<Value, EvalError> {
    use BoundBinaryOperatorKind as K;

    let value = match op.kind {
        K::Addition => Value::Int(as_int(left)?.wrapping_add(as_int(right)?)),
        K::Subtraction => Value::Int(as_int(left)?.wrapping_sub(as_int(right)?)),
        K::Multiplication => Value::Int(as_int(left)?.wrapping_mul(as_int(right)?)),
        K::Division => {
            let (left, right) = (as_int(left)?, as_int(right)?);
            if right == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Value::Int(left.wrapping_div(right))
        }
        K::Concatenation => match (&left, &right) {
            (Value::Str(l), Value::Str(r)) => Value::string(format!("{l}{r}")),
            _ => {
                return Err(InternalError::OperandType {
                    expected: TypeSymbol::String,
                    found: left.ty(),
                }
                .into())
            }
        },
        K::LogicalAnd => Value::Bool(as_bool(left)? & as_bool(right)?),
        K::LogicalOr => Value::Bool(as_bool(left)? | as_bool(right)?),
        K::BitwiseAnd | K::BitwiseOr | K::BitwiseXor if op.left_type == TypeSymbol::Bool => {
            let (l, r) = (as_bool(left)?, as_bool(right)?);
            Value::Bool(match op.kind {
                K::BitwiseAnd => l & r,
                K::BitwiseOr => l | r,
                _ => l ^ r,
            })
        }
        K::BitwiseAnd => Value::Int(as_int(left)? & as_int(right)?),
        K::BitwiseOr => Value::Int(as_int(left)? | as_int(right)?),
        K::BitwiseXor => Value::Int(as_int(left)? ^ as_int(right)?),
        K::Equals => Value::Bool(left == right),
        K::NotEquals => Value::Bool(left != right),
        K::Less => Value::Bool(as_int(left)? < as_int(right)?),
        K::LessOrEquals => Value::Bool(as_int(left)? <= as_int(right)?),
        K::Greater => Value::Bool(as_int(left)? > as_int(right)?),
        K::GreaterOrEquals => Value::Bool(as_int(left)? >= as_int(right)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests;
