//! CLI command implementations.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};

use ippcode_common::Program;
use ippcode_vm::io::{InputPort, LineInput, Ports, WriterPort};
use tracing::debug;

pub const PARAMETER_ERROR: i32 = 10;
pub const INPUT_ERROR: i32 = 11;
pub const OUTPUT_ERROR: i32 = 12;
pub const INTERNAL_ERROR: i32 = 99;

/// Load and execute a program. Returns the program's exit code.
pub fn run(args: &[String]) -> Result<i32, i32> {
    let mut program_path = None;
    let mut input_path = None;
    let mut rest = args.iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--input" => match rest.next() {
                Some(path) => input_path = Some(path.as_str()),
                None => return Err(usage_error("--input requires a file")),
            },
            flag if flag.starts_with('-') => {
                return Err(usage_error(&format!("unknown option '{flag}'")));
            }
            path if program_path.is_none() => program_path = Some(path),
            extra => return Err(usage_error(&format!("unexpected argument '{extra}'"))),
        }
    }
    let Some(program_path) = program_path else {
        eprintln!("error: run requires a program file");
        eprintln!("Usage: ippvm run <program> [--input <file>]");
        return Err(PARAMETER_ERROR);
    };

    let text = read_file(program_path)?;
    let program = load_program(&text)?;

    let mut input: Box<dyn InputPort> = match input_path {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                eprintln!("error: cannot read '{path}': {e}");
                INPUT_ERROR
            })?;
            Box::new(LineInput::new(BufReader::new(file)))
        }
        None => Box::new(LineInput::new(io::stdin().lock())),
    };
    let mut output = WriterPort::new(BufWriter::new(io::stdout().lock()));
    let mut diagnostics = WriterPort::new(io::stderr());

    let result = ippcode_vm::run(
        &program,
        Ports {
            input: &mut *input,
            output: &mut output,
            diagnostics: &mut diagnostics,
        },
    );

    if let Err(e) = output.finish() {
        eprintln!("error: cannot write output: {e}");
        return Err(OUTPUT_ERROR);
    }

    match result {
        Ok(code) => Ok(code),
        Err(e) => {
            eprintln!("error: {e}");
            Err(e.exit_code())
        }
    }
}

/// Translate IPPcode24 source to an XML document.
pub fn parse(args: &[String]) -> Result<(), i32> {
    let (input, output) = match args {
        [input] => (input, None),
        [input, flag, output] if flag == "-o" => (input, Some(output)),
        _ => {
            eprintln!("error: parse requires a source file");
            eprintln!("Usage: ippvm parse <source> [-o <out.xml>]");
            return Err(PARAMETER_ERROR);
        }
    };

    let text = read_file(input)?;
    let document = ippcode_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        e.exit_code()
    })?;
    let xml = ippcode_assembler::to_xml(&document);

    match output {
        Some(path) => {
            fs::write(path, &xml).map_err(|e| {
                eprintln!("error: cannot write '{path}': {e}");
                OUTPUT_ERROR
            })?;
            eprintln!("translated {} instructions -> {path}", document.children.len());
        }
        None => print!("{xml}"),
    }
    Ok(())
}

fn usage_error(message: &str) -> i32 {
    eprintln!("error: {message}");
    eprintln!("Usage: ippvm run <program> [--input <file>]");
    PARAMETER_ERROR
}

fn read_file(path: &str) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        INPUT_ERROR
    })
}

/// Load a program from XML, or from IPPcode24 source when the text does
/// not start with `<`.
fn load_program(text: &str) -> Result<Program, i32> {
    if text.trim_start().starts_with('<') {
        debug!("reading XML program");
        return ippcode_loader::load_xml(text).map_err(|e| {
            eprintln!("error: {e}");
            e.exit_code()
        });
    }

    debug!("reading IPPcode24 source");
    let document = ippcode_assembler::assemble(text).map_err(|e| {
        eprintln!("error: {e}");
        e.exit_code()
    })?;
    ippcode_loader::load(&document).map_err(|e| {
        eprintln!("error: assembled program failed to load: {e}");
        INTERNAL_ERROR
    })
}
