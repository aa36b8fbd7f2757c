//! Translation of a host-lowered block into a [`HostMethod`].

use kiln_eval::{Builtin, InternalError};
use kiln_ir::bound::{
    BoundBinaryOperator, BoundBinaryOperatorKind, BoundBlock, BoundExpr, BoundStatement,
    BoundUnaryOperator, BoundUnaryOperatorKind,
};
use kiln_ir::{TypeSymbol, Value};
use kiln_stack::ensure_sufficient_stack;

use crate::frame::RESULT_SLOT;
use crate::{FramePhase, HostMethod, MethodFrame, OpCode};

const PHASE: &str = "emitter";

/// Compile a host-lowered block.
///
/// Also accepts a plainly lowered block: expression values not consumed
/// by an `AssignResult` are popped, and the routine then returns void.
pub fn compile(program: &BoundBlock) -> Result<HostMethod, InternalError> {
    let mut frame = MethodFrame::new();
    for statement in &program.statements {
        allocate_statement(&mut frame, statement)?;
    }
    tracing::debug!(
        statements = program.statements.len(),
        slots = frame.variables().len(),
        phase = ?frame.phase(),
        "emitting compiled method"
    );

    let mut emitter = Emitter::new(frame)?;
    let mut statements = program.statements.iter().peekable();
    while let Some(statement) = statements.next() {
        let feeds_result = matches!(statements.peek(), Some(BoundStatement::AssignResult(_)));
        emitter.emit_statement(statement, feeds_result)?;
    }
    debug_assert!(emitter.frame.phase() < FramePhase::PatchingJumps);
    emitter.frame.finalize()
}

fn unexpected(kind: &'static str) -> InternalError {
    InternalError::UnexpectedNode { phase: PHASE, kind }
}

// Slot allocation walks the block in the same order emission does, so
// slots follow first encounter.

fn allocate_statement(
    frame: &mut MethodFrame,
    statement: &BoundStatement,
) -> Result<(), InternalError> {
    match statement {
        BoundStatement::VariableDeclaration {
            variable,
            initializer,
        } => {
            allocate_expression(frame, initializer)?;
            frame.allocate_slot(variable)?;
        }
        BoundStatement::Expression(expression)
        | BoundStatement::ConditionalGoto {
            condition: expression,
            ..
        } => allocate_expression(frame, expression)?,
        _ => {}
    }
    Ok(())
}

fn allocate_expression(frame: &mut MethodFrame, expression: &BoundExpr) -> Result<(), InternalError> {
    ensure_sufficient_stack(|| match expression {
        BoundExpr::Variable(variable) => frame.allocate_slot(variable).map(drop),
        BoundExpr::Assignment { variable, value } => {
            allocate_expression(frame, value)?;
            frame.allocate_slot(variable).map(drop)
        }
        BoundExpr::Unary { operand, .. } => allocate_expression(frame, operand),
        BoundExpr::Binary { left, right, .. } => {
            allocate_expression(frame, left)?;
            allocate_expression(frame, right)
        }
        BoundExpr::Call { arguments, .. } => arguments
            .iter()
            .try_for_each(|argument| allocate_expression(frame, argument)),
        BoundExpr::Conversion { expression, .. } => allocate_expression(frame, expression),
        BoundExpr::Error | BoundExpr::Literal(_) => Ok(()),
    })
}

struct Emitter {
    frame: MethodFrame,
}

impl Emitter {
    /// Take over a frame whose slots are allocated and whose body is still
    /// empty.
    fn new(frame: MethodFrame) -> Result<Self, InternalError> {
        if frame.phase() > FramePhase::AllocatingSlots {
            return Err(InternalError::InvalidProgram(format!(
                "emission cannot start from a frame in {:?}",
                frame.phase()
            )));
        }
        Ok(Emitter { frame })
    }

    fn emit(&mut self, op: OpCode) -> Result<(), InternalError> {
        self.frame.emit(op)
    }

    fn emit_statement(
        &mut self,
        statement: &BoundStatement,
        feeds_result: bool,
    ) -> Result<(), InternalError> {
        match statement {
            BoundStatement::VariableDeclaration {
                variable,
                initializer,
            } => {
                self.emit_expression(initializer)?;
                let slot = self.frame.slot(variable)?;
                self.emit(OpCode::Stloc(slot))
            }
            BoundStatement::Expression(expression) => {
                self.emit_expression(expression)?;
                if !feeds_result && expression.ty() != TypeSymbol::Void {
                    self.emit(OpCode::Pop)?;
                }
                Ok(())
            }
            BoundStatement::Goto(label) => self.frame.emit_jump(OpCode::Br(0), *label),
            BoundStatement::ConditionalGoto {
                label,
                condition,
                jump_if_true,
            } => {
                self.emit_expression(condition)?;
                let op = if *jump_if_true {
                    OpCode::Brtrue(0)
                } else {
                    OpCode::Brfalse(0)
                };
                self.frame.emit_jump(op, *label)
            }
            BoundStatement::Label(label) => self.frame.mark_label(*label),
            BoundStatement::AssignResult(ty) => {
                if *ty == TypeSymbol::Void {
                    self.emit(OpCode::Ldnull)?;
                } else {
                    self.emit(OpCode::Box(*ty))?;
                }
                self.emit(OpCode::Stloc(RESULT_SLOT))
            }
            other @ (BoundStatement::Block(_)
            | BoundStatement::If { .. }
            | BoundStatement::While { .. }
            | BoundStatement::DoWhile { .. }
            | BoundStatement::For { .. }) => Err(unexpected(other.kind_name())),
        }
    }

    fn emit_expression(&mut self, expression: &BoundExpr) -> Result<(), InternalError> {
        ensure_sufficient_stack(|| match expression {
            BoundExpr::Literal(value) => self.emit_literal(value, expression),
            BoundExpr::Variable(variable) => {
                let slot = self.frame.slot(variable)?;
                self.emit(OpCode::Ldloc(slot))
            }
            BoundExpr::Assignment { variable, value } => {
                self.emit_expression(value)?;
                let slot = self.frame.slot(variable)?;
                self.emit(OpCode::Stloc(slot))?;
                self.emit(OpCode::Ldloc(slot))
            }
            BoundExpr::Unary { op, operand } => {
                self.emit_expression(operand)?;
                self.emit_unary(*op)
            }
            BoundExpr::Binary { left, op, right } => {
                self.emit_expression(left)?;
                self.emit_expression(right)?;
                self.emit_binary(*op)
            }
            BoundExpr::Call {
                function,
                arguments,
            } => {
                let builtin = Builtin::for_function(function)?;
                for argument in arguments {
                    self.emit_expression(argument)?;
                }
                self.emit(OpCode::Call(builtin))
            }
            BoundExpr::Conversion { ty, expression } => {
                let builtin = Builtin::for_conversion(expression.ty(), *ty)?;
                self.emit_expression(expression)?;
                self.emit(OpCode::Call(builtin))
            }
            BoundExpr::Error => Err(unexpected(expression.kind_name())),
        })
    }

    fn emit_literal(&mut self, value: &Value, expression: &BoundExpr) -> Result<(), InternalError> {
        match value {
            Value::Bool(b) => self.emit(OpCode::LdcI4(i32::from(*b))),
            Value::Int(n) => self.emit(OpCode::LdcI4(*n)),
            Value::Str(s) => self.emit(OpCode::Ldstr(s.clone())),
            Value::Void => Err(unexpected(expression.kind_name())),
        }
    }

    fn emit_unary(&mut self, op: BoundUnaryOperator) -> Result<(), InternalError> {
        match op.kind {
            BoundUnaryOperatorKind::Identity => Ok(()),
            BoundUnaryOperatorKind::Negation => self.emit(OpCode::Neg),
            BoundUnaryOperatorKind::LogicalNegation => self.emit_is_false(),
            BoundUnaryOperatorKind::OnesComplement => self.emit(OpCode::Not),
        }
    }

    fn emit_binary(&mut self, op: BoundBinaryOperator) -> Result<(), InternalError> {
        use BoundBinaryOperatorKind as K;

        match op.kind {
            K::Addition => self.emit(OpCode::Add),
            K::Subtraction => self.emit(OpCode::Sub),
            K::Multiplication => self.emit(OpCode::Mul),
            K::Division => self.emit(OpCode::Div),
            K::Concatenation => self.emit(OpCode::Concat),
            K::LogicalAnd | K::BitwiseAnd => self.emit(OpCode::And),
            K::LogicalOr | K::BitwiseOr => self.emit(OpCode::Or),
            K::BitwiseXor => self.emit(OpCode::Xor),
            K::Equals => self.emit(OpCode::Ceq),
            K::NotEquals => {
                self.emit(OpCode::Ceq)?;
                self.emit_is_false()
            }
            K::Less => self.emit(OpCode::Clt),
            K::LessOrEquals => {
                self.emit(OpCode::Cgt)?;
                self.emit_is_false()
            }
            K::Greater => self.emit(OpCode::Cgt),
            K::GreaterOrEquals => {
                self.emit(OpCode::Clt)?;
                self.emit_is_false()
            }
        }
    }

    /// `x -> x == 0`
    fn emit_is_false(&mut self) -> Result<(), InternalError> {
        self.emit(OpCode::LdcI4(0))?;
        self.emit(OpCode::Ceq)
    }
}
