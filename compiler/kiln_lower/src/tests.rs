use std::collections::HashSet;

use kiln_ir::bound::{BoundBlock, BoundLabel, BoundStatement};
use pretty_assertions::assert_eq;

use super::*;

pub(crate) fn bind(source: &str) -> BoundStatement {
    let tree = kiln_parse::parse(source);
    let scope = kiln_bind::bind_global_scope(None, &tree.root);
    assert!(tree.diagnostics.is_empty() && scope.diagnostics.is_empty());
    BoundStatement::Block(kiln_bind::bind_program(&scope).statement)
}

fn lowered(source: &str) -> String {
    lower(bind(source)).to_string()
}

#[test]
fn if_without_else() {
    assert_eq!(
        lowered("var x = 0 if x == 0 x = 1"),
        "\
{
    var x = 0
    goto Label1 unless (x == 0)
    x = 1
Label1:
}
"
    );
}

#[test]
fn if_with_else() {
    assert_eq!(
        lowered("var x = 0 if x == 0 x = 1 else x = 2"),
        "\
{
    var x = 0
    goto Label1 unless (x == 0)
    x = 1
    goto Label2
Label1:
    x = 2
Label2:
}
"
    );
}

#[test]
fn while_loop() {
    assert_eq!(
        lowered("var i = 0 while i < 3 i = i + 1"),
        "\
{
    var i = 0
Label1:
    goto Label2 unless (i < 3)
    i = (i + 1)
    goto Label1
Label2:
}
"
    );
}

#[test]
fn do_while_loop() {
    assert_eq!(
        lowered("var i = 0 do i = i + 1 while i < 3"),
        "\
{
    var i = 0
Label1:
    i = (i + 1)
    goto Label1 if (i < 3)
Label2:
}
"
    );
}

#[test]
fn for_loop_evaluates_upper_bound_once() {
    assert_eq!(
        lowered("for i = 1 to 3 print(string(i))"),
        "\
{
    let i = 1
    let <upper>1 = 3
Label1:
    goto Label2 unless (i <= <upper>1)
    print(string(i))
    i = (i + 1)
    goto Label1
Label2:
}
"
    );
}

#[test]
fn nested_blocks_are_flattened() {
    let block = lower(bind("{ var a = 1 { var b = 2 { a + b } } }"));
    assert!(block
        .statements
        .iter()
        .all(|s| !matches!(s, BoundStatement::Block(_))));
    assert_eq!(block.statements.len(), 3);
}

#[test]
fn no_structured_statement_survives() {
    let block = lower(bind(
        "var n = 0 for i = 1 to 3 { if i == 2 n = n + i else { do n = n + 1 while n < 0 } while false n = 0 }",
    ));
    for statement in &block.statements {
        assert!(
            matches!(
                statement,
                BoundStatement::VariableDeclaration { .. }
                    | BoundStatement::Expression(_)
                    | BoundStatement::Goto(_)
                    | BoundStatement::ConditionalGoto { .. }
                    | BoundStatement::Label(_)
            ),
            "unexpected {}",
            statement.kind_name()
        );
    }
}

fn marked_labels(block: &BoundBlock) -> Vec<BoundLabel> {
    block
        .statements
        .iter()
        .filter_map(|s| match s {
            BoundStatement::Label(label) => Some(*label),
            _ => None,
        })
        .collect()
}

#[test]
fn labels_unique_and_every_target_marked() {
    let block = lower(bind(
        "var n = 0 for i = 1 to 3 for j = 1 to 3 { while n < 100 { if n > 50 n = n * 2 else n = n + j } }",
    ));

    let marked = marked_labels(&block);
    let unique: HashSet<_> = marked.iter().copied().collect();
    assert_eq!(unique.len(), marked.len());

    for statement in &block.statements {
        if let BoundStatement::Goto(label) | BoundStatement::ConditionalGoto { label, .. } = statement
        {
            assert!(unique.contains(label), "{label} is never marked");
        }
    }
}

#[test]
fn nested_for_loops_get_distinct_upper_bounds() {
    let block = lower(bind("for i = 1 to 2 for j = 1 to i i + j"));
    let hidden: Vec<_> = block
        .statements
        .iter()
        .filter_map(|s| match s {
            BoundStatement::VariableDeclaration { variable, .. }
                if variable.name().starts_with('<') =>
            {
                Some(variable.name().to_string())
            }
            _ => None,
        })
        .collect();
    assert_eq!(hidden, vec!["<upper>1", "<upper>2"]);
}
