//! IPPcode24 CLI: translate and execute IPPcode24 programs.
//!
//! Exit codes:
//! - 0-9: the program's own exit code
//! - 10: bad command-line parameters
//! - 11: input file cannot be read
//! - 12: output cannot be written
//! - 21, 22, 23: source header, opcode and syntax errors
//! - 31: malformed XML
//! - 32, 52-58: load and runtime errors
//! - 99: internal error

mod commands;

use std::process;

use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    init_logging();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(commands::PARAMETER_ERROR);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "parse" => commands::parse(&args[2..]).map(|()| 0),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(commands::PARAMETER_ERROR);
        }
    };

    match result {
        Ok(code) | Err(code) => process::exit(code),
    }
}

/// Install the log subscriber. `RUST_LOG` overrides the default `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_usage() {
    eprintln!("Usage: ippvm <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <program> [--input <file>]   Execute an XML or IPPcode24 source program");
    eprintln!("  parse <source> [-o <out.xml>]    Translate IPPcode24 source to XML");
    eprintln!("  help                             Show this message");
}
