//! Cross-backend equivalence over generated programs.

use proptest::prelude::*;

use kilnc::{Backend, Value};

use crate::common::evaluate;

fn int_expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (-50i32..50).prop_map(|n| n.to_string()),
        Just("2147483647".to_owned()),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["+", "-", "*", "/", "&", "|", "^"]),
                inner.clone()
            )
                .prop_map(|(l, op, r)| format!("({l} {op} {r})")),
            inner.clone().prop_map(|e| format!("-{e}")),
            inner.prop_map(|e| format!("~{e}")),
        ]
    })
}

fn bool_expr() -> impl Strategy<Value = String> {
    let comparison = (
        int_expr(),
        prop::sample::select(vec!["==", "!=", "<", "<=", ">", ">="]),
        int_expr(),
    )
        .prop_map(|(l, op, r)| format!("({l} {op} {r})"));
    comparison.prop_recursive(2, 8, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["&&", "||", "&", "|", "^", "==", "!="]),
                inner.clone()
            )
                .prop_map(|(l, op, r)| format!("({l} {op} {r})")),
            inner.prop_map(|e| format!("!{e}")),
        ]
    })
}

/// Results with errors flattened to their message, so both sides compare.
fn outcome(source: &str, backend: Backend) -> Result<Value, String> {
    evaluate(source, backend).map_err(|e| e.to_string())
}

fn assert_agree(source: &str) -> Result<(), TestCaseError> {
    prop_assert_eq!(
        outcome(source, Backend::TreeWalk),
        outcome(source, Backend::Compiled),
        "{}",
        source
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn int_expressions_agree(expr in int_expr()) {
        assert_agree(&expr)?;
    }

    #[test]
    fn bool_expressions_agree(expr in bool_expr()) {
        assert_agree(&expr)?;
    }

    #[test]
    fn counted_loops_agree(lower in -5i32..5, upper in -5i32..10, step in int_expr()) {
        let source = format!(
            "{{ var acc = 0 for i = {lower} to {upper} {{ acc = acc + i * {step} }} acc }}"
        );
        assert_agree(&source)?;
    }

    #[test]
    fn countdown_loops_agree(start in 0i32..30, skip in 1i32..4) {
        let source = format!(
            "{{ var i = {start} var sum = 0 while i > 0 {{ if i / {skip} * {skip} == i sum = sum + i i = i - 1 }} sum }}"
        );
        assert_agree(&source)?;
    }
}
