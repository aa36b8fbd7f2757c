//! Variable and function symbols.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{TypeSymbol, Value};

/// A declared variable.
///
/// Identity is the `(name, type)` pair, not the declaration site: a
/// variable declared by one session is the same key when a chained
/// session reads it, which is what carries values across sessions.
#[derive(Clone, Debug)]
pub struct VariableSymbol {
    name: Arc<str>,
    read_only: bool,
    ty: TypeSymbol,
}

impl VariableSymbol {
    /// A variable named `name` of type `ty`.
    pub fn new(name: impl Into<Arc<str>>, read_only: bool, ty: TypeSymbol) -> Self {
        VariableSymbol {
            name: name.into(),
            read_only,
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for `let` bindings and hidden loop bounds.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn ty(&self) -> TypeSymbol {
        self.ty
    }
}

impl PartialEq for VariableSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ty == other.ty
    }
}

impl Eq for VariableSymbol {}

impl Hash for VariableSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.ty.hash(state);
    }
}

impl fmt::Display for VariableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Live variable bindings, owned by the caller of an evaluation and
/// updated in place.
pub type Variables = FxHashMap<VariableSymbol, Value>;

/// A named, typed parameter of a built-in function.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParameterSymbol {
    pub name: &'static str,
    pub ty: TypeSymbol,
}

/// A callable function. Kiln has no user-defined functions, so every
/// function symbol is one of [`builtins`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionSymbol {
    pub name: &'static str,
    pub parameters: &'static [ParameterSymbol],
    pub ty: TypeSymbol,
}

impl fmt::Display for FunctionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// The closed table of built-in functions visible to the binder.
pub mod builtins {
    use super::{FunctionSymbol, ParameterSymbol};
    use crate::TypeSymbol;

    /// `print(text: string)`
    pub const PRINT: FunctionSymbol = FunctionSymbol {
        name: "print",
        parameters: &[ParameterSymbol {
            name: "text",
            ty: TypeSymbol::String,
        }],
        ty: TypeSymbol::Void,
    };

    /// `input(): string`
    pub const INPUT: FunctionSymbol = FunctionSymbol {
        name: "input",
        parameters: &[],
        ty: TypeSymbol::String,
    };

    /// `rnd(max: int): int`
    pub const RND: FunctionSymbol = FunctionSymbol {
        name: "rnd",
        parameters: &[ParameterSymbol {
            name: "max",
            ty: TypeSymbol::Int,
        }],
        ty: TypeSymbol::Int,
    };

    static ALL: [FunctionSymbol; 3] = [PRINT, INPUT, RND];

    /// Find a built-in by its exact declared name.
    pub fn lookup(name: &str) -> Option<FunctionSymbol> {
        ALL.iter().find(|f| f.name == name).copied()
    }
}
