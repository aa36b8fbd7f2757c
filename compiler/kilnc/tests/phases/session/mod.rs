//! Chained compilations and their diagnostics.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use kilnc::{Backend, Compilation, Console, SyntaxTree, Value, Variables};

use crate::common::{compilation, BACKENDS};

fn value_of(session: &Compilation, variables: &mut Variables, backend: Backend) -> Option<Value> {
    let result = session
        .evaluate_with_console(variables, backend, &Console::buffer())
        .unwrap();
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    result.value
}

#[test]
fn continue_with_carries_variables() {
    for backend in BACKENDS {
        let first = Arc::new(compilation("var a = 2"));
        let second = first.continue_with(SyntaxTree::parse("a * a"));
        let mut variables = Variables::default();

        assert_eq!(value_of(&first, &mut variables, backend), Some(Value::Int(2)));
        assert_eq!(value_of(&second, &mut variables, backend), Some(Value::Int(4)));
        // The predecessor's own result is unaffected.
        assert_eq!(value_of(&first, &mut variables, backend), Some(Value::Int(2)));
    }
}

#[test]
fn backends_share_bindings() {
    let first = Arc::new(compilation("var n = 20"));
    let second = Arc::new(first.continue_with(SyntaxTree::parse("n = n + 1")));
    let third = second.continue_with(SyntaxTree::parse("n * 2"));
    let mut variables = Variables::default();

    value_of(&first, &mut variables, Backend::TreeWalk);
    value_of(&second, &mut variables, Backend::Compiled);
    assert_eq!(
        value_of(&third, &mut variables, Backend::TreeWalk),
        Some(Value::Int(42))
    );
}

#[test]
fn successor_may_redeclare_with_another_type() {
    for backend in BACKENDS {
        let first = Arc::new(compilation("var a = 2"));
        let second = Arc::new(first.continue_with(SyntaxTree::parse("var a = \"two\"")));
        let third = second.continue_with(SyntaxTree::parse("a + \"!\""));
        let mut variables = Variables::default();

        value_of(&first, &mut variables, backend);
        value_of(&second, &mut variables, backend);
        assert_eq!(
            value_of(&third, &mut variables, backend),
            Some(Value::string("two!"))
        );
        // Identity is (name, type): both bindings survive side by side.
        assert_eq!(variables.len(), 2);
    }
}

#[test]
fn redeclaration_is_reported_at_the_identifier() {
    let source = "{ var x = 10 var y = 100 { var x = 10 } var x = 5 }";
    let result = compilation(source)
        .evaluate_with_console(&mut Variables::default(), Backend::TreeWalk, &Console::buffer())
        .unwrap();

    assert_eq!(result.value, None);
    assert_eq!(result.diagnostics.len(), 1);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.message, "variable `x` is already declared");

    let start = u32::try_from(source.rfind("var x").unwrap() + "var ".len()).unwrap();
    assert_eq!(
        diagnostic.primary_span(),
        Some(kiln_ir::Span::new(start, start + 1))
    );
}

#[test]
fn read_only_assignment_is_rejected() {
    let result = compilation("{ let x = 10 x = 0 }")
        .evaluate_with_console(&mut Variables::default(), Backend::Compiled, &Console::buffer())
        .unwrap();
    assert_eq!(result.value, None);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].message,
        "cannot assign to read-only variable `x`"
    );
}

#[test]
fn diagnostics_render_with_file_locations() {
    let source = "{ let x = 10\n  x = 0 }";
    let result = compilation(source)
        .evaluate_with_console(&mut Variables::default(), Backend::TreeWalk, &Console::buffer())
        .unwrap();

    let rendered: Vec<String> = result
        .diagnostics
        .iter()
        .map(|d| d.located("main.kn", source).to_string())
        .collect();
    assert_eq!(
        rendered,
        vec![
            "error[E2007]: cannot assign to read-only variable `x`\n  --> main.kn:2:3: declared with `let`"
                .to_string()
        ]
    );
}

#[test]
fn undefined_assignment_names_the_variable() {
    let result = compilation("x = 10")
        .evaluate_with_console(&mut Variables::default(), Backend::TreeWalk, &Console::buffer())
        .unwrap();
    assert_eq!(result.value, None);
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].message.contains("`x`"));
}

#[test]
fn syntax_errors_stop_evaluation() {
    let result = compilation("var = 1")
        .evaluate_with_console(&mut Variables::default(), Backend::TreeWalk, &Console::buffer())
        .unwrap();
    assert_eq!(result.value, None);
    assert!(!result.diagnostics.is_empty());
}
