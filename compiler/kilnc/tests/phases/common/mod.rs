//! Shared helpers for phase tests.

use kilnc::{Backend, Compilation, Console, EvalError, SyntaxTree, Value, Variables};

pub const BACKENDS: [Backend; 2] = [Backend::TreeWalk, Backend::Compiled];

pub fn compilation(source: &str) -> Compilation {
    Compilation::new(SyntaxTree::parse(source))
}

/// Evaluate `source` on one backend against fresh bindings.
pub fn evaluate(source: &str, backend: Backend) -> Result<Value, EvalError> {
    evaluate_with(source, backend, &Console::buffer())
}

pub fn evaluate_with(source: &str, backend: Backend, console: &Console) -> Result<Value, EvalError> {
    let mut variables = Variables::default();
    let result = compilation(source).evaluate_with_console(&mut variables, backend, console)?;
    assert!(
        result.diagnostics.is_empty(),
        "{source}: unexpected diagnostics {:?}",
        result.diagnostics
    );
    Ok(result.value.expect("a clean snippet always produces a value"))
}

/// Evaluate on both backends and require them to agree.
pub fn evaluate_both(source: &str) -> Value {
    let tree = evaluate(source, Backend::TreeWalk)
        .unwrap_or_else(|e| panic!("{source}: tree-walker failed: {e}"));
    let compiled = evaluate(source, Backend::Compiled)
        .unwrap_or_else(|e| panic!("{source}: compiled backend failed: {e}"));
    assert_eq!(tree, compiled, "{source}: backends disagree");
    tree
}

/// Assert that every `(source, expected)` pair holds on both backends.
pub fn assert_values(cases: &[(&str, Value)]) {
    for (source, expected) in cases {
        assert_eq!(&evaluate_both(source), expected, "{source}");
    }
}
