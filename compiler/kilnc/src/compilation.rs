//! Compilation sessions.

use std::sync::{Arc, OnceLock};

use kiln_bind::BoundGlobalScope;
use kiln_diagnostic::Diagnostic;
use kiln_eval::{Console, EvalError, InternalError};
use kiln_ir::bound::BoundStatement;
use kiln_ir::{Value, Variables};
use kiln_parse::SyntaxTree;

/// Which evaluator runs a program.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    #[default]
    TreeWalk,
    Compiled,
}

/// Outcome of [`Compilation::evaluate`].
///
/// Exactly one of the two is meaningful: either `diagnostics` is non-empty
/// and nothing ran, or it is empty and `value` holds the result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub value: Option<Value>,
}

/// Outcome of [`Compilation::emit_il`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitResult {
    pub diagnostics: Vec<Diagnostic>,
    pub text: Option<String>,
}

/// One snippet of source and the sessions before it.
///
/// Immutable once built, apart from the memoized global scope.
#[derive(Debug)]
pub struct Compilation {
    previous: Option<Arc<Compilation>>,
    syntax_tree: SyntaxTree,
    global_scope: OnceLock<Arc<BoundGlobalScope>>,
}

impl Compilation {
    /// A session with no predecessor.
    pub fn new(syntax_tree: SyntaxTree) -> Self {
        Compilation {
            previous: None,
            syntax_tree,
            global_scope: OnceLock::new(),
        }
    }

    /// A new session that sees everything `self` declared.
    pub fn continue_with(self: &Arc<Self>, syntax_tree: SyntaxTree) -> Self {
        Compilation {
            previous: Some(Arc::clone(self)),
            syntax_tree,
            global_scope: OnceLock::new(),
        }
    }

    /// The session this one continues, if any.
    pub fn previous(&self) -> Option<&Arc<Compilation>> {
        self.previous.as_ref()
    }

    /// The parsed snippet this session binds.
    pub fn syntax_tree(&self) -> &SyntaxTree {
        &self.syntax_tree
    }

    /// The bound global scope, bound on first use.
    ///
    /// Binding is pure, so if two threads race here both compute the same
    /// scope and whichever publishes second simply discards its copy.
    pub fn global_scope(&self) -> &Arc<BoundGlobalScope> {
        if let Some(scope) = self.global_scope.get() {
            return scope;
        }
        let previous = self.previous.as_ref().map(|p| Arc::clone(p.global_scope()));
        let scope = Arc::new(kiln_bind::bind_global_scope(
            previous.as_ref(),
            &self.syntax_tree.root,
        ));
        tracing::debug!(
            chained = previous.is_some(),
            variables = scope.variables.len(),
            "computed global scope"
        );
        self.global_scope.get_or_init(|| scope)
    }

    /// Syntax and binding diagnostics of this snippet. Predecessors'
    /// diagnostics are not repeated.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.syntax_tree
            .diagnostics
            .iter()
            .chain(&self.global_scope().diagnostics)
            .cloned()
            .collect()
    }

    /// Evaluate with console I/O on stdin/stdout.
    pub fn evaluate(
        &self,
        variables: &mut Variables,
        backend: Backend,
    ) -> Result<EvaluationResult, EvalError> {
        self.evaluate_with_console(variables, backend, &Console::stdio())
    }

    /// Evaluate, updating `variables` in place.
    ///
    /// Nothing runs while diagnostics are present; they are returned as-is.
    pub fn evaluate_with_console(
        &self,
        variables: &mut Variables,
        backend: Backend,
        console: &Console,
    ) -> Result<EvaluationResult, EvalError> {
        let diagnostics = self.diagnostics();
        if !diagnostics.is_empty() {
            tracing::debug!(count = diagnostics.len(), "evaluation skipped");
            return Ok(EvaluationResult {
                diagnostics,
                value: None,
            });
        }

        let statement = self.bound_statement();
        tracing::debug!(?backend, "evaluating");
        let value = match backend {
            Backend::TreeWalk => {
                kiln_eval::evaluate(&kiln_lower::lower(statement), variables, console)?
            }
            Backend::Compiled => {
                let method = kiln_emit::compile(&kiln_lower::host_lower(statement))?;
                method.run(variables, console)?
            }
        };

        Ok(EvaluationResult {
            diagnostics: Vec::new(),
            value: Some(value),
        })
    }

    /// Text dump of the bound tree, lowered or as bound.
    pub fn emit_tree(&self, lowered: bool) -> String {
        let statement = self.bound_statement();
        if lowered {
            kiln_lower::lower(statement).to_string()
        } else {
            statement.to_string()
        }
    }

    /// Disassembly of the compiled routine, unless there are diagnostics.
    pub fn emit_il(&self) -> Result<EmitResult, InternalError> {
        let diagnostics = self.diagnostics();
        if !diagnostics.is_empty() {
            return Ok(EmitResult {
                diagnostics,
                text: None,
            });
        }
        let method = kiln_emit::compile(&kiln_lower::host_lower(self.bound_statement()))?;
        Ok(EmitResult {
            diagnostics,
            text: Some(method.to_string()),
        })
    }

    fn bound_statement(&self) -> BoundStatement {
        BoundStatement::Block(kiln_bind::bind_program(self.global_scope()).statement)
    }
}
