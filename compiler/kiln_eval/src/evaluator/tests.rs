use kiln_ir::bound::{BoundBlock, BoundExpr, BoundLabel, BoundStatement};
use kiln_ir::{TypeSymbol, Value, VariableSymbol, Variables};
use pretty_assertions::assert_eq;

use super::evaluate;
use crate::{Console, EvalError, InternalError};

fn lowered(source: &str) -> BoundBlock {
    let tree = kiln_parse::parse(source);
    let scope = kiln_bind::bind_global_scope(None, &tree.root);
    assert!(
        tree.diagnostics.is_empty() && scope.diagnostics.is_empty(),
        "{source}: {:?} {:?}",
        tree.diagnostics,
        scope.diagnostics
    );
    kiln_lower::lower(BoundStatement::Block(kiln_bind::bind_program(&scope).statement))
}

fn run(source: &str) -> Result<Value, EvalError> {
    let mut variables = Variables::default();
    evaluate(&lowered(source), &mut variables, &Console::buffer())
}

fn value(source: &str) -> Value {
    match run(source) {
        Ok(value) => value,
        Err(e) => panic!("{source}: {e}"),
    }
}

#[test]
fn literal_and_arithmetic() {
    let cases: &[(&str, Value)] = &[
        ("1", Value::Int(1)),
        ("+1", Value::Int(1)),
        ("-1", Value::Int(-1)),
        ("~1", Value::Int(-2)),
        ("14 + 12", Value::Int(26)),
        ("12 - 3", Value::Int(9)),
        ("4 * 2", Value::Int(8)),
        ("9 / 3", Value::Int(3)),
        ("(10)", Value::Int(10)),
        ("1 | 2", Value::Int(3)),
        ("1 | 0", Value::Int(1)),
        ("1 & 3", Value::Int(1)),
        ("1 & 0", Value::Int(0)),
        ("1 ^ 0", Value::Int(1)),
        ("0 ^ 1", Value::Int(1)),
        ("1 ^ 3", Value::Int(2)),
    ];
    for (source, expected) in cases {
        assert_eq!(&value(source), expected, "{source}");
    }
}

#[test]
fn comparisons_and_logic() {
    let cases: &[(&str, bool)] = &[
        ("12 == 3", false),
        ("3 == 3", true),
        ("12 != 3", true),
        ("3 != 3", false),
        ("3 < 4", true),
        ("5 < 4", false),
        ("4 <= 4", true),
        ("4 > 3", true),
        ("4 >= 4", true),
        ("5 >= 4", true),
        ("false == false", true),
        ("true == false", false),
        ("false != false", false),
        ("true != false", true),
        ("true && true", true),
        ("false || false", false),
        ("false | true", true),
        ("true & false", false),
        ("true ^ true", false),
        ("true", true),
        ("!true", false),
        ("!false", true),
        ("\"a\" == \"a\"", true),
        ("\"a\" != \"b\"", true),
    ];
    for (source, expected) in cases {
        assert_eq!(value(source), Value::Bool(*expected), "{source}");
    }
}

#[test]
fn variables_and_blocks() {
    assert_eq!(value("var a = 10"), Value::Int(10));
    assert_eq!(value("{ var a = 10 (a * a) }"), Value::Int(100));
    assert_eq!(value("{ var a = 0 (a = 10) * a }"), Value::Int(100));
    assert_eq!(value("{ var a = 0 if a == 0 a = 10 a }"), Value::Int(10));
    assert_eq!(value("{ var a = 0 if a == 4 a = 10 a }"), Value::Int(0));
    assert_eq!(
        value("{ var a = 0 if a == 0 a = 10 else a = 5 a }"),
        Value::Int(10)
    );
    assert_eq!(
        value("{ var a = 0 if a == 4 a = 10 else a = 5 a }"),
        Value::Int(5)
    );
}

#[test]
fn loops() {
    assert_eq!(
        value("{ var i = 10 var result = 0 while i > 0 { result = result + i i = i - 1 } result }"),
        Value::Int(55)
    );
    assert_eq!(
        value("{ var result = 0 for i = 1 to 10 { result = result + i } result }"),
        Value::Int(55)
    );
    assert_eq!(
        value("{ var a = 10 for i = 1 to (a = a - 1) { } a }"),
        Value::Int(9)
    );
    assert_eq!(
        value("{ var a = 0 do a = a + 1 while a < 10 a }"),
        Value::Int(10)
    );
    assert_eq!(value("{ var a = 5 do a = a + 1 while false a }"), Value::Int(6));
}

#[test]
fn strings_and_conversions() {
    assert_eq!(value("\"ab\" + \"cd\""), Value::from("abcd"));
    assert_eq!(value("string(12) + string(true)"), Value::from("12true"));
    assert_eq!(value("int(\"41\") + 1"), Value::Int(42));
    assert_eq!(value("bool(\"TRUE\")"), Value::Bool(true));
    assert!(matches!(
        run("int(\"forty\")"),
        Err(EvalError::InvalidConversion { .. })
    ));
}

#[test]
fn arithmetic_wraps_and_division_by_zero_fails() {
    assert_eq!(value("2147483647 + 1"), Value::Int(i32::MIN));
    assert_eq!(value("-2147483647 - 2"), Value::Int(i32::MAX));
    assert!(matches!(run("{ var z = 0 1 / z }"), Err(EvalError::DivisionByZero)));
}

#[test]
fn print_statement_yields_void() {
    let console = Console::buffer();
    let mut variables = Variables::default();
    let program = lowered("{ var x = 3 print(string(x * 2)) }");
    let result = evaluate(&program, &mut variables, &console);
    assert_eq!(result.ok(), Some(Value::Void));
    assert_eq!(console.output(), "6\n");
}

#[test]
fn input_reads_script() {
    let console = Console::with_input(["21"]);
    let mut variables = Variables::default();
    let result = evaluate(&lowered("int(input()) * 2"), &mut variables, &console);
    assert_eq!(result.ok(), Some(Value::Int(42)));
}

#[test]
fn empty_program_is_void() {
    assert_eq!(value(""), Value::Void);
}

#[test]
fn bindings_updated_in_place() {
    let mut variables = Variables::default();
    let a = VariableSymbol::new("a", false, TypeSymbol::Int);
    variables.insert(a.clone(), Value::Int(5));

    let program = BoundBlock::new(vec![BoundStatement::Expression(BoundExpr::Assignment {
        variable: a.clone(),
        value: Box::new(BoundExpr::Literal(Value::Int(7))),
    })]);
    let result = evaluate(&program, &mut variables, &Console::buffer());

    assert_eq!(result.ok(), Some(Value::Int(7)));
    assert_eq!(variables.get(&a), Some(&Value::Int(7)));
}

#[test]
fn missing_variable_reads_default() {
    let s = VariableSymbol::new("s", false, TypeSymbol::String);
    let program = BoundBlock::new(vec![BoundStatement::Expression(BoundExpr::Variable(s))]);
    let result = evaluate(&program, &mut Variables::default(), &Console::buffer());
    assert_eq!(result.ok(), Some(Value::from("")));
}

#[test]
fn structured_statement_is_internal_error() {
    let program = BoundBlock::new(vec![BoundStatement::While {
        condition: BoundExpr::literal(false),
        body: Box::new(BoundStatement::Block(BoundBlock::default())),
    }]);
    let result = evaluate(&program, &mut Variables::default(), &Console::buffer());
    assert!(matches!(
        result,
        Err(EvalError::Internal(InternalError::UnexpectedNode {
            kind: "while statement",
            ..
        }))
    ));
}

#[test]
fn unmarked_label_is_internal_error() {
    let missing = BoundLabel::new(9);
    let program = BoundBlock::new(vec![BoundStatement::Goto(missing)]);
    let result = evaluate(&program, &mut Variables::default(), &Console::buffer());
    assert!(matches!(
        result,
        Err(EvalError::Internal(InternalError::UnmarkedLabel(label))) if label == missing
    ));
}
