//! Lowering through the whole front end.

use pretty_assertions::assert_eq;

use crate::common::compilation;

#[test]
fn nested_loops_get_distinct_labels_and_bounds() {
    let text = compilation("for i = 1 to 2 for j = 1 to i print(string(j))").emit_tree(true);
    assert_eq!(
        text,
        "\
{
    let i = 1
    let <upper>1 = 2
Label1:
    goto Label2 unless (i <= <upper>1)
    let j = 1
    let <upper>2 = i
Label3:
    goto Label4 unless (j <= <upper>2)
    print(string(j))
    j = (j + 1)
    goto Label3
Label4:
    i = (i + 1)
    goto Label1
Label2:
}
"
    );
}

#[test]
fn lowered_tree_has_no_structured_statements() {
    let text = compilation(
        "var a = 0 if a == 0 { while a < 3 a = a + 1 } else do a = a - 1 while a > 0",
    )
    .emit_tree(true);
    for line in text.lines().map(str::trim) {
        let structured = ["if ", "while ", "do", "for ", "else"]
            .iter()
            .any(|keyword| line.starts_with(keyword));
        assert!(!structured, "{line:?} left in:\n{text}");
    }
}

#[test]
fn bound_tree_keeps_structure() {
    let text = compilation("var a = 0 while a < 3 a = a + 1").emit_tree(false);
    assert_eq!(
        text,
        "\
{
    var a = 0
    while (a < 3)
        a = (a + 1)
}
"
    );
}
