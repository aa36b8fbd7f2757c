//! Interpreter for compiled routines.

use std::sync::Arc;

use smallvec::SmallVec;

use kiln_eval::{Builtin, Console, EvalError, InternalError};
use kiln_ir::{TypeSymbol, Value};

use crate::{HostMethod, OpCode};

/// An evaluation-stack or local-slot entry.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Native {
    I4(i32),
    Str(Arc<str>),
    /// A boxed value, or an argument-array element.
    Ref(Value),
    Null,
    /// The routine's argument array.
    Args,
}

impl Native {
    fn from_value(value: Value) -> Native {
        match value {
            Value::Bool(b) => Native::I4(i32::from(b)),
            Value::Int(n) => Native::I4(n),
            Value::Str(s) => Native::Str(s),
            Value::Void => Native::Null,
        }
    }

    fn into_value(self, ty: TypeSymbol) -> Result<Value, InternalError> {
        match (self, ty) {
            (Native::I4(n), TypeSymbol::Bool) => Ok(Value::Bool(n != 0)),
            (Native::I4(n), TypeSymbol::Int) => Ok(Value::Int(n)),
            (Native::Str(s), TypeSymbol::String) => Ok(Value::Str(s)),
            (other, ty) => Err(invalid(format!("cannot treat {other:?} as {ty}"))),
        }
    }
}

fn invalid(message: String) -> InternalError {
    InternalError::InvalidProgram(message)
}

pub(crate) struct Machine<'a> {
    method: &'a HostMethod,
    args: &'a mut [Value],
    console: &'a Console,
    stack: SmallVec<[Native; 8]>,
    locals: Vec<Native>,
    /// Array index of the last `ldelem.ref`, for naming failed unboxes.
    last_element: Option<usize>,
}

impl<'a> Machine<'a> {
    pub(crate) fn new(method: &'a HostMethod, args: &'a mut [Value], console: &'a Console) -> Self {
        Machine {
            method,
            args,
            console,
            stack: SmallVec::with_capacity(method.max_stack()),
            locals: vec![Native::Null; method.locals().len()],
            last_element: None,
        }
    }

    pub(crate) fn run(mut self) -> Result<Value, EvalError> {
        let method = self.method;
        let instructions = method.instructions();
        let mut pc = 0;
        loop {
            let op = instructions
                .get(pc)
                .ok_or_else(|| invalid(format!("execution ran past IL_{pc:04x}")))?;
            pc += 1;
            match op {
                OpCode::Nop => {}
                OpCode::LdcI4(n) => self.stack.push(Native::I4(*n)),
                OpCode::Ldstr(s) => self.stack.push(Native::Str(Arc::clone(s))),
                OpCode::Ldnull => self.stack.push(Native::Null),
                OpCode::Ldloc(slot) => {
                    let local = self.local(*slot)?.clone();
                    self.stack.push(local);
                }
                OpCode::Stloc(slot) => {
                    let value = self.pop()?;
                    *self.local(*slot)? = value;
                }
                OpCode::Ldarg0 => self.stack.push(Native::Args),
                OpCode::LdelemRef => {
                    let index = self.pop_index()?;
                    self.pop_args()?;
                    let element = self.element(index)?.clone();
                    self.last_element = Some(index);
                    self.stack.push(Native::Ref(element));
                }
                OpCode::StelemRef => {
                    let value = match self.pop()? {
                        Native::Ref(value) => value,
                        Native::Null => Value::Void,
                        other => return Err(invalid(format!("stelem.ref of {other:?}")).into()),
                    };
                    let index = self.pop_index()?;
                    self.pop_args()?;
                    *self.element(index)? = value;
                }
                OpCode::Box(ty) => {
                    let value = self.pop()?.into_value(*ty)?;
                    self.stack.push(Native::Ref(value));
                }
                OpCode::UnboxAny(ty) => {
                    let native = self.unbox(*ty)?;
                    self.stack.push(native);
                }
                OpCode::Pop => {
                    self.pop()?;
                }
                OpCode::Add => self.int_binary(i32::wrapping_add)?,
                OpCode::Sub => self.int_binary(i32::wrapping_sub)?,
                OpCode::Mul => self.int_binary(i32::wrapping_mul)?,
                OpCode::Div => {
                    let right = self.pop_i4()?;
                    let left = self.pop_i4()?;
                    if right == 0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    self.stack.push(Native::I4(left.wrapping_div(right)));
                }
                OpCode::And => self.int_binary(|l, r| l & r)?,
                OpCode::Or => self.int_binary(|l, r| l | r)?,
                OpCode::Xor => self.int_binary(|l, r| l ^ r)?,
                OpCode::Not => {
                    let n = self.pop_i4()?;
                    self.stack.push(Native::I4(!n));
                }
                OpCode::Neg => {
                    let n = self.pop_i4()?;
                    self.stack.push(Native::I4(n.wrapping_neg()));
                }
                OpCode::Ceq => {
                    let right = self.pop()?;
                    let left = self.pop()?;
                    self.stack.push(Native::I4(i32::from(left == right)));
                }
                OpCode::Clt => self.int_binary(|l, r| i32::from(l < r))?,
                OpCode::Cgt => self.int_binary(|l, r| i32::from(l > r))?,
                OpCode::Concat => {
                    let right = self.pop_str()?;
                    let left = self.pop_str()?;
                    self.stack.push(Native::Str(format!("{left}{right}").into()));
                }
                OpCode::Br(target) => pc = *target,
                OpCode::Brtrue(target) => {
                    if self.pop_i4()? != 0 {
                        pc = *target;
                    }
                }
                OpCode::Brfalse(target) => {
                    if self.pop_i4()? == 0 {
                        pc = *target;
                    }
                }
                OpCode::Call(builtin) => self.call(*builtin)?,
                OpCode::Ret => {
                    return match self.pop()? {
                        Native::Ref(value) => Ok(value),
                        Native::Null => Ok(Value::Void),
                        other => Err(invalid(format!("ret of unboxed {other:?}")).into()),
                    };
                }
            }
        }
    }

    fn call(&mut self, builtin: Builtin) -> Result<(), EvalError> {
        let parameters = builtin.parameter_types();
        let mut args = Vec::with_capacity(parameters.len());
        for ty in parameters.iter().rev() {
            args.push(self.pop()?.into_value(*ty)?);
        }
        args.reverse();
        let result = builtin.invoke(&args, self.console)?;
        if builtin.return_type() != TypeSymbol::Void {
            self.stack.push(Native::from_value(result));
        }
        Ok(())
    }

    fn unbox(&mut self, ty: TypeSymbol) -> Result<Native, EvalError> {
        let value = match self.pop()? {
            Native::Ref(value) => value,
            other => return Err(invalid(format!("unbox.any of {other:?}")).into()),
        };
        if value.ty() != ty {
            let variable = self
                .last_element
                .and_then(|index| self.method.variables().get(index))
                .map(|def| def.variable.name().to_owned())
                .unwrap_or_default();
            return Err(EvalError::InvalidCast {
                variable,
                expected: ty,
                found: value.ty(),
            });
        }
        Ok(Native::from_value(value))
    }

    fn int_binary(&mut self, f: impl FnOnce(i32, i32) -> i32) -> Result<(), EvalError> {
        let right = self.pop_i4()?;
        let left = self.pop_i4()?;
        self.stack.push(Native::I4(f(left, right)));
        Ok(())
    }

    fn pop(&mut self) -> Result<Native, InternalError> {
        self.stack
            .pop()
            .ok_or_else(|| invalid("evaluation stack underflow".to_owned()))
    }

    fn pop_i4(&mut self) -> Result<i32, InternalError> {
        match self.pop()? {
            Native::I4(n) => Ok(n),
            other => Err(invalid(format!("expected int32 on the stack, found {other:?}"))),
        }
    }

    fn pop_str(&mut self) -> Result<Arc<str>, InternalError> {
        match self.pop()? {
            Native::Str(s) => Ok(s),
            other => Err(invalid(format!("expected string on the stack, found {other:?}"))),
        }
    }

    fn pop_index(&mut self) -> Result<usize, InternalError> {
        let n = self.pop_i4()?;
        usize::try_from(n).map_err(|_| invalid(format!("negative array index {n}")))
    }

    fn pop_args(&mut self) -> Result<(), InternalError> {
        match self.pop()? {
            Native::Args => Ok(()),
            other => Err(invalid(format!("expected the argument array, found {other:?}"))),
        }
    }

    fn element(&mut self, index: usize) -> Result<&mut Value, InternalError> {
        self.args
            .get_mut(index)
            .ok_or_else(|| invalid(format!("argument index {index} out of range")))
    }

    fn local(&mut self, slot: usize) -> Result<&mut Native, InternalError> {
        self.locals
            .get_mut(slot)
            .ok_or_else(|| invalid(format!("local slot {slot} out of range")))
    }
}
