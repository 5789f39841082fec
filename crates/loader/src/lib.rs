//! IPPcode24 loader: program document → instruction table.
//!
//! The loader checks the shape of the document BEFORE execution and
//! produces a [`Program`] keyed by instruction order.
//!
//! # Usage
//!
//! ```
//! use ippcode_loader::load_xml;
//!
//! let xml = r#"<program language="IPPcode24">
//!   <instruction order="1" opcode="write"><arg1 type="int">42</arg1></instruction>
//! </program>"#;
//!
//! let program = load_xml(xml).unwrap();
//! assert_eq!(program.len(), 1);
//! assert_eq!(program.get(1).unwrap().opcode, "WRITE");
//! ```
//!
//! # Stages
//!
//! 1. **XML** ([`xml`]): text → [`Element`] tree (`roxmltree`)
//! 2. **Load** ([`load`]): tree → [`Program`], structural checks only

pub mod error;
pub mod load;
pub mod tree;
pub mod xml;

pub use error::LoadError;
pub use load::{load, LANGUAGE};
pub use tree::Element;

use ippcode_common::Program;

/// Parse an XML program document and load it.
pub fn load_xml(text: &str) -> Result<Program, LoadError> {
    let root = xml::parse_document(text)?;
    load(&root)
}
