//! Lexical scopes.

use rustc_hash::FxHashMap;

use kiln_ir::VariableSymbol;

/// One level of the scope chain. Declaration order is kept so a global
/// scope can report its variables deterministically.
#[derive(Debug, Default)]
pub struct BoundScope {
    parent: Option<Box<BoundScope>>,
    index: FxHashMap<String, usize>,
    variables: Vec<VariableSymbol>,
}

impl BoundScope {
    /// A new innermost level above `parent`.
    pub fn new(parent: Option<Box<BoundScope>>) -> Self {
        BoundScope {
            parent,
            ..BoundScope::default()
        }
    }

    /// Declare in this level only. Fails if the name is already taken here;
    /// names in enclosing levels may be shadowed.
    pub fn try_declare(&mut self, variable: VariableSymbol) -> bool {
        if self.index.contains_key(variable.name()) {
            return false;
        }
        self.index
            .insert(variable.name().to_string(), self.variables.len());
        self.variables.push(variable);
        true
    }

    /// Resolve `name`, innermost level first.
    pub fn try_lookup(&self, name: &str) -> Option<&VariableSymbol> {
        match self.index.get(name) {
            Some(&i) => self.variables.get(i),
            None => self.parent.as_deref()?.try_lookup(name),
        }
    }

    /// Drop this level, returning the enclosing one.
    pub fn into_parent(self) -> Option<Box<BoundScope>> {
        self.parent
    }

    /// Variables declared in this level, in declaration order.
    pub fn into_variables(self) -> Vec<VariableSymbol> {
        self.variables
    }
}
