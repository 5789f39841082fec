//! Errors produced while reading and loading a program document.

use ippcode_common::ErrorKind;
use thiserror::Error;

/// Exit code for a document that is not well-formed XML.
pub const MALFORMED_XML_EXIT_CODE: i32 = 31;

/// Errors that occur before execution starts.
///
/// Everything except [`LoadError::Xml`] is a structural error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(String),

    #[error("root element must be 'program', found '{found}'")]
    RootElement { found: String },

    #[error("program language must be 'IPPcode24', found {found:?}")]
    Language { found: Option<String> },

    #[error("unexpected element '{found}' inside '{parent}'")]
    UnexpectedElement { parent: String, found: String },

    #[error("element '{element}' is missing attribute '{attribute}'")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("invalid instruction order '{text}'")]
    InvalidOrder { text: String },

    #[error("duplicate instruction order {order}")]
    DuplicateOrder { order: u32 },

    #[error("instruction {order} has an empty opcode")]
    EmptyOpcode { order: u32 },

    #[error("instruction {order}: invalid argument element '{name}'")]
    InvalidArgument { order: u32, name: String },

    #[error("instruction {order}: duplicate argument arg{position}")]
    DuplicateArgument { order: u32, position: u32 },

    #[error("instruction {order}: argument arg{position} has no type")]
    MissingType { order: u32, position: u32 },
}

impl LoadError {
    /// Classify this error in the shared taxonomy. Malformed XML is
    /// reported before any program exists and has no kind.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            LoadError::Xml(_) => None,
            _ => Some(ErrorKind::Structure),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        self.kind()
            .map_or(MALFORMED_XML_EXIT_CODE, ErrorKind::exit_code)
    }
}
