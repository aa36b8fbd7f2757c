//! CLI commands behind the `kiln` binary.

use kiln_diagnostic::Diagnostic;
use kiln_ir::Value;

use crate::{Backend, Compilation, SyntaxTree, Variables};

/// Read a source file, exiting with a message if it cannot be read.
pub fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

fn report_and_exit(path: &str, source: &str, diagnostics: &[Diagnostic]) -> ! {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic.located(path, source));
    }
    eprintln!(
        "error: aborting due to {} previous error{}",
        diagnostics.len(),
        if diagnostics.len() == 1 { "" } else { "s" }
    );
    std::process::exit(1);
}

fn compilation(path: &str) -> Compilation {
    Compilation::new(SyntaxTree::parse(read_file(path)))
}

/// Run a source file, printing the final value unless it is void.
pub fn run_file(path: &str, backend: Backend) {
    let compilation = compilation(path);
    let mut variables = Variables::default();
    match compilation.evaluate(&mut variables, backend) {
        Ok(result) if !result.diagnostics.is_empty() => report_and_exit(
            path,
            &compilation.syntax_tree().source,
            &result.diagnostics,
        ),
        Ok(result) => {
            if let Some(value) = result.value.filter(|v| *v != Value::Void) {
                println!("{value}");
            }
        }
        Err(e) => {
            eprintln!("runtime error in '{path}': {e}");
            std::process::exit(1);
        }
    }
}

/// Print the bound tree of a source file.
pub fn print_tree(path: &str, lowered: bool) {
    let compilation = compilation(path);
    let diagnostics = compilation.diagnostics();
    if !diagnostics.is_empty() {
        report_and_exit(path, &compilation.syntax_tree().source, &diagnostics);
    }
    print!("{}", compilation.emit_tree(lowered));
}

/// Print the disassembly of a source file's compiled routine.
pub fn print_il(path: &str) {
    let compilation = compilation(path);
    match compilation.emit_il() {
        Ok(result) => match result.text {
            Some(text) => print!("{text}"),
            None => report_and_exit(
                path,
                &compilation.syntax_tree().source,
                &result.diagnostics,
            ),
        },
        Err(e) => {
            eprintln!("internal compiler error: {e}");
            std::process::exit(1);
        }
    }
}
