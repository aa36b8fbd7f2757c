//! The closed set of Kiln types.

use std::fmt;

use crate::Value;

/// Static type of an expression or variable.
///
/// `Error` marks expressions that already produced a diagnostic and
/// suppresses cascading errors; it never reaches an evaluator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeSymbol {
    Error,
    Bool,
    Int,
    String,
    Void,
}

impl TypeSymbol {
    /// Source-level name, as written in conversions.
    pub fn name(self) -> &'static str {
        match self {
            TypeSymbol::Error => "?",
            TypeSymbol::Bool => "bool",
            TypeSymbol::Int => "int",
            TypeSymbol::String => "string",
            TypeSymbol::Void => "void",
        }
    }

    /// Resolve a type name usable as a conversion callee.
    pub fn lookup(name: &str) -> Option<TypeSymbol> {
        match name {
            "bool" => Some(TypeSymbol::Bool),
            "int" => Some(TypeSymbol::Int),
            "string" => Some(TypeSymbol::String),
            _ => None,
        }
    }

    /// Value a variable of this type holds before it is first assigned.
    pub fn default_value(self) -> Value {
        match self {
            TypeSymbol::Bool => Value::Bool(false),
            TypeSymbol::Int => Value::Int(0),
            TypeSymbol::String => Value::string(""),
            TypeSymbol::Error | TypeSymbol::Void => Value::Void,
        }
    }
}

impl fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
