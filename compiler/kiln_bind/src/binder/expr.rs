//! Expression binding.
//!
//! An expression typed `TypeSymbol::Error` has already been reported;
//! every check below stays silent when an operand is error-typed.

use kiln_ir::ast::{Expr, ExprKind, Ident};
use kiln_ir::bound::{BoundBinaryOperator, BoundExpr, BoundUnaryOperator};
use kiln_ir::{builtins, Span, TypeSymbol, Value};
use kiln_stack::ensure_sufficient_stack;

use super::Binder;

/// Explicit conversions accepted by `int(..)`, `bool(..)` and `string(..)`.
fn conversion_exists(from: TypeSymbol, to: TypeSymbol) -> bool {
    use TypeSymbol::{Bool, Int, String};
    from == to || matches!((from, to), (Int | Bool, String) | (String, Int | Bool))
}

impl Binder {
    /// Bind an expression that must produce a value.
    pub(super) fn bind_expression(&mut self, expr: &Expr) -> BoundExpr {
        let bound = self.bind_expression_or_void(expr);
        if bound.ty() == TypeSymbol::Void {
            self.diagnostics.report_expression_must_have_value(expr.span);
            return BoundExpr::Error;
        }
        bound
    }

    /// Bind an expression that must have type `target`.
    pub(super) fn bind_expression_of(&mut self, expr: &Expr, target: TypeSymbol) -> BoundExpr {
        let bound = self.bind_expression(expr);
        let ty = bound.ty();
        if ty != target && ty != TypeSymbol::Error && target != TypeSymbol::Error {
            self.diagnostics.report_cannot_convert(expr.span, ty, target);
            return BoundExpr::Error;
        }
        bound
    }

    /// Bind an expression in statement position, where `void` is allowed.
    pub(super) fn bind_expression_or_void(&mut self, expr: &Expr) -> BoundExpr {
        ensure_sufficient_stack(|| match &expr.kind {
            ExprKind::Int(n) => BoundExpr::Literal(Value::Int(*n)),
            ExprKind::Bool(b) => BoundExpr::Literal(Value::Bool(*b)),
            ExprKind::Str(s) => BoundExpr::Literal(Value::string(s.as_str())),
            ExprKind::Paren(inner) => self.bind_expression_or_void(inner),
            ExprKind::Name(ident) => self.bind_name(ident),
            ExprKind::Assign { target, value } => self.bind_assignment(target, value),
            ExprKind::Unary {
                op,
                op_span,
                operand,
            } => {
                let operand = self.bind_expression(operand);
                if operand.ty() == TypeSymbol::Error {
                    return BoundExpr::Error;
                }
                match BoundUnaryOperator::bind(*op, operand.ty()) {
                    Some(op) => BoundExpr::Unary {
                        op,
                        operand: Box::new(operand),
                    },
                    None => {
                        self.diagnostics.report_undefined_unary_operator(
                            *op_span,
                            op.as_symbol(),
                            operand.ty(),
                        );
                        BoundExpr::Error
                    }
                }
            }
            ExprKind::Binary {
                left,
                op,
                op_span,
                right,
            } => {
                let left = self.bind_expression(left);
                let right = self.bind_expression(right);
                if left.ty() == TypeSymbol::Error || right.ty() == TypeSymbol::Error {
                    return BoundExpr::Error;
                }
                match BoundBinaryOperator::bind(*op, left.ty(), right.ty()) {
                    Some(op) => BoundExpr::Binary {
                        left: Box::new(left),
                        op,
                        right: Box::new(right),
                    },
                    None => {
                        self.diagnostics.report_undefined_binary_operator(
                            *op_span,
                            op.as_symbol(),
                            left.ty(),
                            right.ty(),
                        );
                        BoundExpr::Error
                    }
                }
            }
            ExprKind::Call { callee, args } => self.bind_call(expr.span, callee, args),
            ExprKind::Error => BoundExpr::Error,
        })
    }

    fn bind_name(&mut self, ident: &Ident) -> BoundExpr {
        // Missing identifiers were reported by the parser.
        if ident.name.is_empty() {
            return BoundExpr::Error;
        }
        match self.scope.try_lookup(&ident.name) {
            Some(variable) => BoundExpr::Variable(variable.clone()),
            None => {
                self.diagnostics
                    .report_undefined_variable(ident.span, &ident.name);
                BoundExpr::Error
            }
        }
    }

    fn bind_assignment(&mut self, target: &Ident, value: &Expr) -> BoundExpr {
        let value = self.bind_expression(value);

        let Some(variable) = self.scope.try_lookup(&target.name).cloned() else {
            self.diagnostics
                .report_undefined_variable(target.span, &target.name);
            return BoundExpr::Error;
        };

        if variable.is_read_only() {
            self.diagnostics.report_cannot_assign(target.span, &target.name);
        }

        let ty = value.ty();
        if ty != variable.ty() && ty != TypeSymbol::Error {
            self.diagnostics
                .report_cannot_convert(target.span, ty, variable.ty());
            return BoundExpr::Error;
        }

        BoundExpr::Assignment {
            variable,
            value: Box::new(value),
        }
    }

    fn bind_call(&mut self, span: Span, callee: &Ident, args: &[Expr]) -> BoundExpr {
        if let (Some(ty), [arg]) = (TypeSymbol::lookup(&callee.name), args) {
            return self.bind_conversion(ty, arg);
        }

        let Some(function) = builtins::lookup(&callee.name) else {
            self.diagnostics
                .report_undefined_function(callee.span, &callee.name);
            return BoundExpr::Error;
        };

        if args.len() != function.parameters.len() {
            self.diagnostics.report_wrong_argument_count(
                span,
                function.name,
                function.parameters.len(),
                args.len(),
            );
            return BoundExpr::Error;
        }

        let mut arguments = Vec::with_capacity(args.len());
        for (arg, parameter) in args.iter().zip(function.parameters) {
            let bound = self.bind_expression(arg);
            let ty = bound.ty();
            if ty == TypeSymbol::Error {
                return BoundExpr::Error;
            }
            if ty != parameter.ty {
                self.diagnostics
                    .report_wrong_argument_type(arg.span, parameter.name, parameter.ty, ty);
                return BoundExpr::Error;
            }
            arguments.push(bound);
        }

        BoundExpr::Call {
            function,
            arguments,
        }
    }

    fn bind_conversion(&mut self, ty: TypeSymbol, arg: &Expr) -> BoundExpr {
        let expression = self.bind_expression(arg);
        let from = expression.ty();
        if from == TypeSymbol::Error {
            return BoundExpr::Error;
        }
        if !conversion_exists(from, ty) {
            self.diagnostics.report_cannot_convert(arg.span, from, ty);
            return BoundExpr::Error;
        }
        if from == ty {
            return expression;
        }
        BoundExpr::Conversion {
            ty,
            expression: Box::new(expression),
        }
    }
}
