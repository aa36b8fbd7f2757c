//! Compiled routines through the session API.

use pretty_assertions::assert_eq;

use kilnc::{Backend, Console, EvalError, Value, Variables};

use crate::common::compilation;

#[test]
fn literal_il_is_pinned() {
    let il = compilation("1").emit_il().unwrap().text.unwrap();
    assert_eq!(
        il,
        "\
.method static object host(object[] variables)
.maxstack 1
.locals (
    [0] object
)

IL_0000: ldc.i4 1
IL_0001: box int32
IL_0002: stloc.0
IL_0003: ldloc.0
IL_0004: ret
"
    );
}

#[test]
fn il_marshals_every_variable() {
    let il = compilation("var a = 1 var s = \"x\" let b = true")
        .emit_il()
        .unwrap()
        .text
        .unwrap();
    for expected in [
        "    [1] int32\n",
        "    [2] string\n",
        "    [3] bool\n",
        "unbox.any int32",
        "unbox.any string",
        "unbox.any bool",
        "box bool\nIL_",
        "stelem.ref",
    ] {
        assert!(il.contains(expected), "missing {expected:?} in\n{il}");
    }
}

#[test]
fn compiled_run_is_repeatable_with_fresh_bindings() {
    let session = compilation("var total = 0 for i = 1 to 5 total = total + i * i total");
    let run = || {
        let mut variables = Variables::default();
        let value = session
            .evaluate_with_console(&mut variables, Backend::Compiled, &Console::buffer())
            .unwrap()
            .value;
        (value, variables.len())
    };
    // `total`, `i` and the hidden upper bound.
    assert_eq!(run(), (Some(Value::Int(55)), 3));
    assert_eq!(run(), run());
}

#[test]
fn runtime_error_leaves_bindings_untouched() {
    let session = compilation("var a = 1 a = a / (a - 1)");
    let mut variables = Variables::default();
    let result = session.evaluate_with_console(&mut variables, Backend::Compiled, &Console::buffer());
    assert!(matches!(result, Err(EvalError::DivisionByZero)));
    assert!(variables.is_empty());
}
