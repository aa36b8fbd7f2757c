//! Binder for Kiln: resolves names and types, producing the bound tree.
//!
//! A global scope is bound once per session snippet. Variables declared by
//! earlier snippets are visible through the predecessor chain, each
//! predecessor contributing one scope level, oldest outermost.

mod binder;
mod scope;

use std::sync::Arc;

use kiln_diagnostic::Diagnostic;
use kiln_ir::ast::CompilationUnit;
use kiln_ir::bound::BoundBlock;
use kiln_ir::VariableSymbol;

pub use scope::BoundScope;

use crate::binder::Binder;

/// The bound top level of one snippet.
#[derive(Debug)]
pub struct BoundGlobalScope {
    pub previous: Option<Arc<BoundGlobalScope>>,
    /// Diagnostics from this snippet only.
    pub diagnostics: Vec<Diagnostic>,
    /// Variables this snippet declared at top level, in declaration order.
    pub variables: Vec<VariableSymbol>,
    pub statement: BoundBlock,
}

/// A program ready for lowering.
#[derive(Clone, Debug)]
pub struct BoundProgram {
    pub statement: BoundBlock,
    pub diagnostics: Vec<Diagnostic>,
}

/// Bind `unit` on top of the scopes of `previous` and its predecessors.
pub fn bind_global_scope(
    previous: Option<&Arc<BoundGlobalScope>>,
    unit: &CompilationUnit,
) -> BoundGlobalScope {
    let parent = create_parent_scope(previous);
    let mut binder = Binder::new(BoundScope::new(parent.map(Box::new)));

    let statement = binder.bind_compilation_unit(unit);
    let (scope, diagnostics) = binder.finish();
    let variables = scope.into_variables();

    tracing::debug!(
        declared = variables.len(),
        diagnostics = diagnostics.len(),
        "bound global scope"
    );

    BoundGlobalScope {
        previous: previous.cloned(),
        diagnostics: diagnostics.into_vec(),
        variables,
        statement,
    }
}

/// Produce the program for a bound global scope. Kiln has no user-defined
/// functions, so the program is the scope's statement plus its
/// diagnostics.
pub fn bind_program(global_scope: &BoundGlobalScope) -> BoundProgram {
    BoundProgram {
        statement: global_scope.statement.clone(),
        diagnostics: global_scope.diagnostics.clone(),
    }
}

fn create_parent_scope(previous: Option<&Arc<BoundGlobalScope>>) -> Option<BoundScope> {
    let mut chain = Vec::new();
    let mut cursor = previous;
    while let Some(scope) = cursor {
        chain.push(scope);
        cursor = scope.previous.as_ref();
    }

    let mut parent: Option<BoundScope> = None;
    for global in chain.into_iter().rev() {
        let mut scope = BoundScope::new(parent.map(Box::new));
        for variable in &global.variables {
            scope.try_declare(variable.clone());
        }
        parent = Some(scope);
    }
    parent
}
