//! Language constructs evaluated on both backends.

mod properties;

use kilnc::{Backend, Console, EvalError, Value};

use crate::common::{assert_values, evaluate, evaluate_both, evaluate_with, BACKENDS};

#[test]
fn unary_and_arithmetic() {
    assert_values(&[
        ("1", Value::Int(1)),
        ("+1", Value::Int(1)),
        ("-1", Value::Int(-1)),
        ("~1", Value::Int(-2)),
        ("14 + 12", Value::Int(26)),
        ("12 - 3", Value::Int(9)),
        ("4 * 2", Value::Int(8)),
        ("9 / 3", Value::Int(3)),
        ("4 * 2 / 2", Value::Int(4)),
        ("(10)", Value::Int(10)),
        ("-7 / 2", Value::Int(-3)),
    ]);
}

#[test]
fn bitwise_on_ints() {
    assert_values(&[
        ("1 | 2", Value::Int(3)),
        ("1 | 0", Value::Int(1)),
        ("1 & 3", Value::Int(1)),
        ("1 & 0", Value::Int(0)),
        ("1 ^ 0", Value::Int(1)),
        ("0 ^ 1", Value::Int(1)),
        ("1 ^ 3", Value::Int(2)),
    ]);
}

#[test]
fn comparisons() {
    assert_values(&[
        ("12 == 3", Value::Bool(false)),
        ("3 == 3", Value::Bool(true)),
        ("12 != 3", Value::Bool(true)),
        ("3 != 3", Value::Bool(false)),
        ("3 < 4", Value::Bool(true)),
        ("5 < 4", Value::Bool(false)),
        ("4 <= 4", Value::Bool(true)),
        ("4 <= 5", Value::Bool(true)),
        ("5 <= 4", Value::Bool(false)),
        ("4 > 3", Value::Bool(true)),
        ("4 > 5", Value::Bool(false)),
        ("4 >= 4", Value::Bool(true)),
        ("5 >= 4", Value::Bool(true)),
        ("4 >= 5", Value::Bool(false)),
    ]);
}

#[test]
fn booleans() {
    assert_values(&[
        ("true", Value::Bool(true)),
        ("false", Value::Bool(false)),
        ("!true", Value::Bool(false)),
        ("!false", Value::Bool(true)),
        ("false == false", Value::Bool(true)),
        ("true == false", Value::Bool(false)),
        ("false != false", Value::Bool(false)),
        ("true != false", Value::Bool(true)),
        ("true && true", Value::Bool(true)),
        ("false || false", Value::Bool(false)),
        ("false | false", Value::Bool(false)),
        ("false | true", Value::Bool(true)),
        ("true | false", Value::Bool(true)),
        ("true | true", Value::Bool(true)),
        ("false & false", Value::Bool(false)),
        ("false & true", Value::Bool(false)),
        ("true & false", Value::Bool(false)),
        ("true & true", Value::Bool(true)),
        ("false ^ false", Value::Bool(false)),
        ("true ^ false", Value::Bool(true)),
        ("false ^ true", Value::Bool(true)),
        ("true ^ true", Value::Bool(false)),
    ]);
}

#[test]
fn strings() {
    assert_values(&[
        ("\"test\"", Value::string("test")),
        ("\"say \\\"hi\\\"\"", Value::string("say \"hi\"")),
        ("\"test\" == \"test\"", Value::Bool(true)),
        ("\"test\" != \"test\"", Value::Bool(false)),
        ("\"test\" == \"abc\"", Value::Bool(false)),
        ("\"test\" != \"abc\"", Value::Bool(true)),
        ("\"ab\" + \"cd\"", Value::string("abcd")),
    ]);
}

#[test]
fn conversions() {
    assert_values(&[
        ("string(12)", Value::string("12")),
        ("string(true)", Value::string("true")),
        ("int(\"-40\")", Value::Int(-40)),
        ("int(\" 7\")", Value::Int(7)),
        ("bool(\"False\")", Value::Bool(false)),
        ("string(\"same\")", Value::string("same")),
    ]);
}

#[test]
fn variables_and_blocks() {
    assert_values(&[
        ("var a = 10", Value::Int(10)),
        ("let a = true", Value::Bool(true)),
        ("{ var a = 10 (a * a) }", Value::Int(100)),
        ("{ var a = 0 (a = 10) * a }", Value::Int(100)),
        ("{ var a = 1 var b = a = 5 a + b }", Value::Int(10)),
    ]);
}

#[test]
fn control_flow() {
    assert_values(&[
        ("{ var a = 0 if a == 0 a = 10 a }", Value::Int(10)),
        ("{ var a = 0 if a == 4 a = 10 a }", Value::Int(0)),
        ("{ var a = 0 if a == 0 a = 10 else a = 5 a }", Value::Int(10)),
        ("{ var a = 0 if a == 4 a = 10 else a = 5 a }", Value::Int(5)),
        (
            "{ var i = 10 var result = 0 while i > 0 { result = result + i i = i - 1 } result }",
            Value::Int(55),
        ),
        ("{ var result = 0 for i = 1 to 10 { result = result + i } result }", Value::Int(55)),
        ("{ var a = 10 for i = 1 to (a = a - 1) { } a }", Value::Int(9)),
        ("{ var a = 0 do a = a + 1 while a < 10 a }", Value::Int(10)),
        ("{ var n = 0 for i = 1 to 3 for j = 1 to i n = n + 1 n }", Value::Int(6)),
        ("{ var n = 0 for i = 5 to 1 n = n + 1 n }", Value::Int(0)),
    ]);
}

#[test]
fn upper_bound_is_evaluated_once() {
    // Growing `a` inside the body must not extend the loop.
    assert_values(&[(
        "{ var a = 3 var n = 0 for i = 1 to a { a = a + 1 n = n + 1 } n }",
        Value::Int(3),
    )]);
}

#[test]
fn void_and_empty_programs() {
    assert_values(&[
        ("", Value::Void),
        ("print(\"\")", Value::Void),
        ("1 print(\"\")", Value::Void),
        ("print(\"\") 1", Value::Int(1)),
    ]);
}

#[test]
fn arithmetic_wraps() {
    assert_values(&[
        ("2147483647 + 1", Value::Int(i32::MIN)),
        ("-2147483647 - 2", Value::Int(i32::MAX)),
        ("65536 * 65536", Value::Int(0)),
        ("{ var m = -2147483647 - 1 m / -1 }", Value::Int(i32::MIN)),
        ("{ var m = -2147483647 - 1 (-m) }", Value::Int(i32::MIN)),
    ]);
}

#[test]
fn division_by_zero_fails_on_both_backends() {
    for backend in BACKENDS {
        assert!(
            matches!(evaluate("{ var z = 0 1 / z }", backend), Err(EvalError::DivisionByZero)),
            "{backend:?}"
        );
    }
}

#[test]
fn invalid_conversion_fails_on_both_backends() {
    for backend in BACKENDS {
        let result = evaluate("int(\"twelve\")", backend);
        match result {
            Err(EvalError::InvalidConversion { text, .. }) => assert_eq!(text, "twelve"),
            other => panic!("{backend:?}: {other:?}"),
        }
    }
}

#[test]
fn console_output_matches() {
    let source = "for i = 1 to 3 print(\"line \" + string(i))";
    let outputs: Vec<String> = BACKENDS
        .iter()
        .map(|backend| {
            let console = Console::buffer();
            evaluate_with(source, *backend, &console).unwrap();
            console.output()
        })
        .collect();
    assert_eq!(outputs[0], "line 1\nline 2\nline 3\n");
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn input_feeds_the_program() {
    for backend in BACKENDS {
        let console = Console::with_input(["20", "22"]);
        let value = evaluate_with("int(input()) + int(input())", backend, &console).unwrap();
        assert_eq!(value, Value::Int(42), "{backend:?}");
    }
}

#[test]
fn random_numbers_stay_in_bounds() {
    for backend in [Backend::TreeWalk, Backend::Compiled] {
        for _ in 0..10 {
            let Value::Int(n) = evaluate("rnd(6) + 1", backend).unwrap() else {
                panic!("rnd is an int");
            };
            assert!((1..=6).contains(&n), "{backend:?}: {n}");
        }
    }
    assert_eq!(evaluate_both("rnd(0)"), Value::Int(0));
}
