//! The closed table of native routines.
//!
//! Both backends resolve a call the same way: the function symbol's name
//! (or `{From}To{To}` for a conversion) is mangled by upper-casing its
//! first character and looked up in [`Builtin::ALL`]. A name that is not
//! in the table is an internal error, since the binder only accepts known
//! functions.

use rand::Rng;

use kiln_ir::{FunctionSymbol, TypeSymbol, Value};

use crate::{Console, EvalError, InternalError};

/// A native routine reachable from Kiln code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Print,
    Input,
    Rnd,
    BoolToString,
    IntToString,
    StringToBool,
    StringToInt,
}

/// Upper-case the first character: `print` becomes `Print`.
pub fn mangle(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Builtin {
    pub const ALL: [Builtin; 7] = [
        Builtin::Print,
        Builtin::Input,
        Builtin::Rnd,
        Builtin::BoolToString,
        Builtin::IntToString,
        Builtin::StringToBool,
        Builtin::StringToInt,
    ];

    /// Mangled name, as it appears in disassembly.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Print => "Print",
            Builtin::Input => "Input",
            Builtin::Rnd => "Rnd",
            Builtin::BoolToString => "BoolToString",
            Builtin::IntToString => "IntToString",
            Builtin::StringToBool => "StringToBool",
            Builtin::StringToInt => "StringToInt",
        }
    }

    /// Find a routine by its mangled name.
    pub fn lookup(mangled: &str) -> Option<Builtin> {
        Self::ALL.into_iter().find(|b| b.name() == mangled)
    }

    /// Routine implementing a call to `function`.
    pub fn for_function(function: &FunctionSymbol) -> Result<Builtin, InternalError> {
        let mangled = mangle(function.name);
        Self::lookup(&mangled).ok_or(InternalError::UnknownBuiltin(mangled))
    }

    /// Routine implementing an explicit conversion.
    pub fn for_conversion(from: TypeSymbol, to: TypeSymbol) -> Result<Builtin, InternalError> {
        let mangled = format!("{}To{}", mangle(from.name()), mangle(to.name()));
        Self::lookup(&mangled).ok_or(InternalError::UnknownBuiltin(mangled))
    }

    /// Argument types, in call order.
    pub fn parameter_types(self) -> &'static [TypeSymbol] {
        match self {
            Builtin::Input => &[],
            Builtin::Print | Builtin::StringToBool | Builtin::StringToInt => &[TypeSymbol::String],
            Builtin::Rnd | Builtin::IntToString => &[TypeSymbol::Int],
            Builtin::BoolToString => &[TypeSymbol::Bool],
        }
    }

    pub fn return_type(self) -> TypeSymbol {
        match self {
            Builtin::Print => TypeSymbol::Void,
            Builtin::Rnd | Builtin::StringToInt => TypeSymbol::Int,
            Builtin::StringToBool => TypeSymbol::Bool,
            Builtin::Input | Builtin::BoolToString | Builtin::IntToString => TypeSymbol::String,
        }
    }

    /// Run the routine. `args` must match [`Builtin::parameter_types`].
    pub fn invoke(self, args: &[Value], console: &Console) -> Result<Value, EvalError> {
        match (self, args) {
            (Builtin::Print, [Value::Str(text)]) => {
                console.println(text)?;
                Ok(Value::Void)
            }
            (Builtin::Input, []) => Ok(Value::string(console.read_line()?)),
            (Builtin::Rnd, [Value::Int(max)]) => random(*max).map(Value::Int),
            (Builtin::BoolToString, [Value::Bool(b)]) => Ok(Value::string(b.to_string())),
            (Builtin::IntToString, [Value::Int(n)]) => Ok(Value::string(n.to_string())),
            (Builtin::StringToBool, [Value::Str(text)]) => string_to_bool(text).map(Value::Bool),
            (Builtin::StringToInt, [Value::Str(text)]) => string_to_int(text).map(Value::Int),
            _ => Err(InternalError::InvalidProgram(format!(
                "`{}` called with {} argument(s) of the wrong shape",
                self.name(),
                args.len()
            ))
            .into()),
        }
    }
}

/// Uniform in `0..max`; `rnd(0)` is always 0.
fn random(max: i32) -> Result<i32, EvalError> {
    match max {
        m if m < 0 => Err(EvalError::NegativeRandomBound(m)),
        0 => Ok(0),
        m => Ok(rand::thread_rng().gen_range(0..m)),
    }
}

fn string_to_bool(text: &str) -> Result<bool, EvalError> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(EvalError::InvalidConversion {
            text: text.to_string(),
            target: TypeSymbol::Bool,
        })
    }
}

fn string_to_int(text: &str) -> Result<i32, EvalError> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| EvalError::InvalidConversion {
            text: text.to_string(),
            target: TypeSymbol::Int,
        })
}
