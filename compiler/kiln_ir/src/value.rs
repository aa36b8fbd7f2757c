//! Runtime values.

use std::fmt;
use std::sync::Arc;

use crate::TypeSymbol;

/// A Kiln runtime value.
///
/// This is the uniform "boxed" representation: the tree-walker computes
/// with it directly, and compiled routines convert to and from it at their
/// call boundary.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Str(Arc<str>),
    /// Result of a statement that produces nothing, such as `print(...)`.
    Void,
}

impl Value {
    /// A string value.
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Type of the value; `Void` for the unit value.
    pub fn ty(&self) -> TypeSymbol {
        match self {
            Value::Bool(_) => TypeSymbol::Bool,
            Value::Int(_) => TypeSymbol::Int,
            Value::Str(_) => TypeSymbol::String,
            Value::Void => TypeSymbol::Void,
        }
    }

    /// The boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is one.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Void => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests;
