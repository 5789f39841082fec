//! IPPcode24 assembler: source text → program document.
//!
//! The assembler checks lexical and syntactic rules only: the header, opcode
//! names, operand counts and operand spelling. Everything else is left to the
//! loader and the VM.
//!
//! # Usage
//!
//! ```
//! use ippcode_assembler::{assemble, to_xml};
//!
//! let text = ".IPPcode24\nWRITE int@42 # answer\n";
//! let document = assemble(text).unwrap();
//! let program = ippcode_loader::load(&document).unwrap();
//! assert_eq!(program.len(), 1);
//! assert!(to_xml(&document).contains("<arg1 type=\"int\">42</arg1>"));
//! ```

pub mod error;

mod lexer;
mod parser;
mod writer;

pub use error::AsmError;
pub use writer::to_xml;

use ippcode_loader::{Element, LANGUAGE};
use lexer::tokenize_line;
use parser::{is_header, parse_line};

/// Assemble source text into a program element tree.
///
/// The first non-empty line must be the `.IPPcode24` header. Instructions
/// get orders 1, 2, 3… in source order. Returns the first error
/// encountered.
pub fn assemble(text: &str) -> Result<Element, AsmError> {
    let mut root = Element::new("program").with_attr("language", LANGUAGE);
    let mut seen_header = false;
    let mut order = 0u32;

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(line);
        if tokens.is_empty() {
            continue;
        }
        if !seen_header {
            if !is_header(&tokens) {
                return Err(AsmError::MissingHeader { line: line_num });
            }
            seen_header = true;
            continue;
        }
        order += 1;
        root.children.push(parse_line(&tokens, line_num, order)?);
    }

    if !seen_header {
        return Err(AsmError::MissingHeader {
            line: text.lines().count() + 1,
        });
    }
    Ok(root)
}
