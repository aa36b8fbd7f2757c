//! A finished compiled routine.

use std::fmt;

use kiln_eval::{Console, EvalError};
use kiln_ir::{Value, Variables};

use crate::machine::Machine;
use crate::{LocalType, OpCode, VariableDef};

/// An immutable compiled routine taking the variable array.
///
/// Its disassembly (the `Display` impl) is stable and used by tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostMethod {
    instructions: Vec<OpCode>,
    locals: Vec<LocalType>,
    variables: Vec<VariableDef>,
    max_stack: usize,
}

impl HostMethod {
    pub(crate) fn new(
        instructions: Vec<OpCode>,
        locals: Vec<LocalType>,
        variables: Vec<VariableDef>,
        max_stack: usize,
    ) -> Self {
        HostMethod {
            instructions,
            locals,
            variables,
            max_stack,
        }
    }

    /// Complete instruction stream, prologue and epilogue included.
    pub fn instructions(&self) -> &[OpCode] {
        &self.instructions
    }

    /// Local slot types; slot 0 is the boxed result.
    pub fn locals(&self) -> &[LocalType] {
        &self.locals
    }

    /// Marshalled variables in slot order.
    pub fn variables(&self) -> &[VariableDef] {
        &self.variables
    }

    /// Deepest evaluation stack the routine reaches.
    pub fn max_stack(&self) -> usize {
        self.max_stack
    }

    /// Run the routine against `bindings`.
    ///
    /// Every variable the routine touches is read from `bindings` (its
    /// type's default if absent) and written back afterwards. On error
    /// the bindings are left as they were.
    pub fn run(&self, bindings: &mut Variables, console: &Console) -> Result<Value, EvalError> {
        let mut args: Vec<Value> = self
            .variables
            .iter()
            .map(|def| {
                bindings
                    .get(&def.variable)
                    .cloned()
                    .unwrap_or_else(|| def.variable.ty().default_value())
            })
            .collect();
        tracing::debug!(
            instructions = self.instructions.len(),
            variables = args.len(),
            "running compiled method"
        );

        let result = Machine::new(self, &mut args, console).run()?;

        for (def, value) in self.variables.iter().zip(args) {
            bindings.insert(def.variable.clone(), value);
        }
        Ok(result)
    }
}

impl fmt::Display for HostMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".method static object host(object[] variables)")?;
        writeln!(f, ".maxstack {}", self.max_stack)?;
        writeln!(f, ".locals (")?;
        for (slot, local) in self.locals.iter().enumerate() {
            writeln!(f, "    [{slot}] {local}")?;
        }
        writeln!(f, ")")?;
        writeln!(f)?;
        for (offset, op) in self.instructions.iter().enumerate() {
            writeln!(f, "IL_{offset:04x}: {op}")?;
        }
        Ok(())
    }
}
