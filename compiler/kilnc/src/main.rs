//! Kiln CLI

use kilnc::commands::{print_il, print_tree, run_file};
use kilnc::Backend;

fn main() {
    kilnc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let flag = |name: &str| args.iter().skip(2).any(|a| a == name);
    let file = args.iter().skip(2).find(|a| !a.starts_with('-'));

    match command.as_str() {
        "run" | "tree" | "il" => {
            let Some(path) = file else {
                eprintln!("error: missing file path");
                eprintln!("Usage: kiln {command} <file.kn>");
                std::process::exit(1);
            };
            match command.as_str() {
                "run" => {
                    let backend = if flag("--compiled") || flag("-c") {
                        Backend::Compiled
                    } else {
                        Backend::TreeWalk
                    };
                    run_file(path, backend);
                }
                "tree" => print_tree(path, flag("--lowered")),
                _ => print_il(path),
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-v" => {
            println!("Kiln {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("kn"))
            {
                run_file(command, Backend::TreeWalk);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Kiln");
    println!();
    println!("Usage: kiln <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.kn>        Run a Kiln program");
    println!("  tree <file.kn>       Print the bound tree");
    println!("  il <file.kn>         Print the compiled routine's disassembly");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --compiled, -c       Run through the compiled backend");
    println!();
    println!("Tree options:");
    println!("  --lowered            Print the tree after lowering");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Tracing filter, e.g. RUST_LOG=kiln_emit=trace");
}
