use pretty_assertions::assert_eq;

use super::*;

#[test]
fn reports_keep_order() {
    let mut bag = DiagnosticBag::new();
    bag.report_undefined_variable(Span::new(0, 1), "a");
    bag.report_cannot_assign(Span::new(4, 5), "b");

    let codes: Vec<_> = bag.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2003, ErrorCode::E2007]);
}

#[test]
fn messages_name_the_offender() {
    let mut bag = DiagnosticBag::new();
    bag.report_undefined_variable(Span::new(0, 5), "count");
    bag.report_unexpected_token(Span::new(6, 7), &TokenKind::RParen, &TokenKind::Eq);

    let messages: Vec<_> = bag.into_iter().map(|d| d.message).collect();
    assert_eq!(
        messages,
        vec![
            "cannot find variable `count`".to_string(),
            "expected `=`, found `)`".to_string(),
        ]
    );
}

#[test]
fn extend_appends() {
    let mut first = DiagnosticBag::new();
    first.report_bad_character(Span::new(0, 1), "$");
    let mut second = DiagnosticBag::new();
    second.report_unterminated_string(Span::new(2, 5));

    first.extend(second);
    assert_eq!(first.len(), 2);
    assert_eq!(first.into_vec()[1].code, ErrorCode::E0001);
}
