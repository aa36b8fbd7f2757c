use super::*;

#[test]
fn value_types() {
    assert_eq!(Value::from(3).ty(), TypeSymbol::Int);
    assert_eq!(Value::from(true).ty(), TypeSymbol::Bool);
    assert_eq!(Value::from("hi").ty(), TypeSymbol::String);
    assert_eq!(Value::Void.ty(), TypeSymbol::Void);
}

#[test]
fn accessors_reject_other_variants() {
    assert_eq!(Value::Int(4).as_int(), Some(4));
    assert_eq!(Value::Int(4).as_bool(), None);
    assert_eq!(Value::from("x").as_str(), Some("x"));
    assert_eq!(Value::Bool(true).as_str(), None);
}

#[test]
fn display_is_unquoted() {
    assert_eq!(Value::from("hello").to_string(), "hello");
    assert_eq!(Value::Int(-7).to_string(), "-7");
    assert_eq!(Value::Void.to_string(), "");
}

#[test]
fn defaults_per_type() {
    assert_eq!(TypeSymbol::Int.default_value(), Value::Int(0));
    assert_eq!(TypeSymbol::Bool.default_value(), Value::Bool(false));
    assert_eq!(TypeSymbol::String.default_value(), Value::from(""));
}
