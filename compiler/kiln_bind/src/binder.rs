//! Statement binding and scope management.

mod expr;

use kiln_diagnostic::DiagnosticBag;
use kiln_ir::ast::{CompilationUnit, Ident, Stmt, StmtKind};
use kiln_ir::bound::{BoundBlock, BoundStatement};
use kiln_ir::{TypeSymbol, VariableSymbol};
use kiln_stack::ensure_sufficient_stack;

use crate::BoundScope;

pub(crate) struct Binder {
    scope: BoundScope,
    diagnostics: DiagnosticBag,
}

impl Binder {
    pub(crate) fn new(scope: BoundScope) -> Self {
        Binder {
            scope,
            diagnostics: DiagnosticBag::new(),
        }
    }

    pub(crate) fn finish(self) -> (BoundScope, DiagnosticBag) {
        (self.scope, self.diagnostics)
    }

    /// Top-level statements bind directly into the global scope so that
    /// later snippets can see what they declare.
    pub(crate) fn bind_compilation_unit(&mut self, unit: &CompilationUnit) -> BoundBlock {
        let statements = unit
            .statements
            .iter()
            .map(|stmt| self.bind_statement(stmt))
            .collect();
        BoundBlock::new(statements)
    }

    fn bind_statement(&mut self, stmt: &Stmt) -> BoundStatement {
        ensure_sufficient_stack(|| match &stmt.kind {
            StmtKind::Block(statements) => {
                self.push_scope();
                let statements = statements.iter().map(|s| self.bind_statement(s)).collect();
                self.pop_scope();
                BoundStatement::Block(BoundBlock::new(statements))
            }
            StmtKind::VarDecl {
                name,
                read_only,
                init,
            } => {
                let initializer = self.bind_expression(init);
                let variable = self.declare_variable(name, *read_only, initializer.ty());
                BoundStatement::VariableDeclaration {
                    variable,
                    initializer,
                }
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => BoundStatement::If {
                condition: self.bind_expression_of(cond, TypeSymbol::Bool),
                then_branch: Box::new(self.bind_statement(then_branch)),
                else_branch: else_branch
                    .as_deref()
                    .map(|s| Box::new(self.bind_statement(s))),
            },
            StmtKind::While { cond, body } => BoundStatement::While {
                condition: self.bind_expression_of(cond, TypeSymbol::Bool),
                body: Box::new(self.bind_statement(body)),
            },
            StmtKind::DoWhile { body, cond } => BoundStatement::DoWhile {
                body: Box::new(self.bind_statement(body)),
                condition: self.bind_expression_of(cond, TypeSymbol::Bool),
            },
            StmtKind::For {
                var,
                lower,
                upper,
                body,
            } => {
                let lower = self.bind_expression_of(lower, TypeSymbol::Int);
                let upper = self.bind_expression_of(upper, TypeSymbol::Int);

                self.push_scope();
                let variable = self.declare_variable(var, true, TypeSymbol::Int);
                let body = self.bind_statement(body);
                self.pop_scope();

                BoundStatement::For {
                    variable,
                    lower,
                    upper,
                    body: Box::new(body),
                }
            }
            StmtKind::Expr(expr) => BoundStatement::Expression(self.bind_expression_or_void(expr)),
        })
    }

    /// Declare `name` in the current scope. A missing name (already
    /// reported by the parser) yields a symbol that is never declared.
    fn declare_variable(&mut self, name: &Ident, read_only: bool, ty: TypeSymbol) -> VariableSymbol {
        let variable = VariableSymbol::new(name.name.as_str(), read_only, ty);
        if !name.name.is_empty() && !self.scope.try_declare(variable.clone()) {
            self.diagnostics
                .report_variable_already_declared(name.span, &name.name);
        }
        variable
    }

    fn push_scope(&mut self) {
        let parent = std::mem::take(&mut self.scope);
        self.scope = BoundScope::new(Some(Box::new(parent)));
    }

    fn pop_scope(&mut self) {
        let inner = std::mem::take(&mut self.scope);
        self.scope = inner.into_parent().map(|parent| *parent).unwrap_or_default();
    }
}
