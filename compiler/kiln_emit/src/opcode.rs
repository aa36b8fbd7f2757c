//! Instruction set of compiled routines.

use std::fmt;
use std::sync::Arc;

use kiln_eval::Builtin;
use kiln_ir::TypeSymbol;

/// A stack-machine instruction. Branch targets are instruction indices.
///
/// Booleans travel as `int32` 0 or 1, as in CIL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpCode {
    Nop,
    LdcI4(i32),
    Ldstr(Arc<str>),
    Ldnull,
    Ldloc(usize),
    Stloc(usize),
    /// Push the routine's argument array.
    Ldarg0,
    /// `array, index -> array[index]`
    LdelemRef,
    /// `array, index, value -> `
    StelemRef,
    Box(TypeSymbol),
    UnboxAny(TypeSymbol),
    Pop,
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Xor,
    Not,
    Neg,
    Ceq,
    Clt,
    Cgt,
    /// `string, string -> string`
    Concat,
    Br(usize),
    Brtrue(usize),
    Brfalse(usize),
    Call(Builtin),
    Ret,
}

impl OpCode {
    /// Target instruction index, for branch instructions only.
    pub fn branch_target(&self) -> Option<usize> {
        match self {
            OpCode::Br(t) | OpCode::Brtrue(t) | OpCode::Brfalse(t) => Some(*t),
            _ => None,
        }
    }

    /// Rewrite the target of a branch; other instructions are untouched.
    pub(crate) fn retarget(&mut self, f: impl FnOnce(usize) -> usize) {
        if let OpCode::Br(t) | OpCode::Brtrue(t) | OpCode::Brfalse(t) = self {
            *t = f(*t);
        }
    }

    /// `(pops, pushes)` on the evaluation stack.
    pub fn stack_effect(&self) -> (usize, usize) {
        match self {
            OpCode::Nop | OpCode::Br(_) => (0, 0),
            OpCode::LdcI4(_)
            | OpCode::Ldstr(_)
            | OpCode::Ldnull
            | OpCode::Ldloc(_)
            | OpCode::Ldarg0 => (0, 1),
            OpCode::Stloc(_) | OpCode::Pop | OpCode::Brtrue(_) | OpCode::Brfalse(_) | OpCode::Ret => {
                (1, 0)
            }
            OpCode::Box(_) | OpCode::UnboxAny(_) | OpCode::Not | OpCode::Neg => (1, 1),
            OpCode::LdelemRef
            | OpCode::Add
            | OpCode::Sub
            | OpCode::Mul
            | OpCode::Div
            | OpCode::And
            | OpCode::Or
            | OpCode::Xor
            | OpCode::Ceq
            | OpCode::Clt
            | OpCode::Cgt
            | OpCode::Concat => (2, 1),
            OpCode::StelemRef => (3, 0),
            OpCode::Call(builtin) => (
                builtin.parameter_types().len(),
                usize::from(builtin.return_type() != TypeSymbol::Void),
            ),
        }
    }
}

/// Type name as printed in disassembly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IlType(pub TypeSymbol);

impl fmt::Display for IlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            TypeSymbol::Bool => f.write_str("bool"),
            TypeSymbol::Int => f.write_str("int32"),
            TypeSymbol::String => f.write_str("string"),
            TypeSymbol::Void => f.write_str("void"),
            TypeSymbol::Error => f.write_str("?"),
        }
    }
}

fn write_local(f: &mut fmt::Formatter<'_>, name: &str, slot: usize) -> fmt::Result {
    if slot <= 3 {
        write!(f, "{name}.{slot}")
    } else {
        write!(f, "{name} {slot}")
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpCode::Nop => f.write_str("nop"),
            OpCode::LdcI4(n) => write!(f, "ldc.i4 {n}"),
            OpCode::Ldstr(s) => write!(f, "ldstr {s:?}"),
            OpCode::Ldnull => f.write_str("ldnull"),
            OpCode::Ldloc(slot) => write_local(f, "ldloc", *slot),
            OpCode::Stloc(slot) => write_local(f, "stloc", *slot),
            OpCode::Ldarg0 => f.write_str("ldarg.0"),
            OpCode::LdelemRef => f.write_str("ldelem.ref"),
            OpCode::StelemRef => f.write_str("stelem.ref"),
            OpCode::Box(ty) => write!(f, "box {}", IlType(*ty)),
            OpCode::UnboxAny(ty) => write!(f, "unbox.any {}", IlType(*ty)),
            OpCode::Pop => f.write_str("pop"),
            OpCode::Add => f.write_str("add"),
            OpCode::Sub => f.write_str("sub"),
            OpCode::Mul => f.write_str("mul"),
            OpCode::Div => f.write_str("div"),
            OpCode::And => f.write_str("and"),
            OpCode::Or => f.write_str("or"),
            OpCode::Xor => f.write_str("xor"),
            OpCode::Not => f.write_str("not"),
            OpCode::Neg => f.write_str("neg"),
            OpCode::Ceq => f.write_str("ceq"),
            OpCode::Clt => f.write_str("clt"),
            OpCode::Cgt => f.write_str("cgt"),
            OpCode::Concat => f.write_str("concat"),
            OpCode::Br(t) => write!(f, "br IL_{t:04x}"),
            OpCode::Brtrue(t) => write!(f, "brtrue IL_{t:04x}"),
            OpCode::Brfalse(t) => write!(f, "brfalse IL_{t:04x}"),
            OpCode::Call(builtin) => write!(f, "call {}", builtin.name()),
            OpCode::Ret => f.write_str("ret"),
        }
    }
}
