//! Identifier rules for variables and labels, and frame prefixes.

use crate::error::NameError;

/// Punctuation allowed in identifiers besides ASCII letters and digits.
pub const NAME_SPECIAL_CHARS: &str = "_-$&%*!?";

/// Check a variable or label identifier.
///
/// The name must be non-empty, must not start with a digit, and may only
/// contain ASCII alphanumerics and the characters in [`NAME_SPECIAL_CHARS`].
pub fn check_name(name: &str) -> Result<(), NameError> {
    let first = name.chars().next().ok_or(NameError::Empty)?;
    if first.is_ascii_digit() {
        return Err(NameError::LeadingDigit(name.to_string()));
    }
    match name
        .chars()
        .find(|&ch| !ch.is_ascii_alphanumeric() && !NAME_SPECIAL_CHARS.contains(ch))
    {
        Some(ch) => Err(NameError::IllegalChar {
            name: name.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}

/// The three variable frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Global,
    Local,
    Temporary,
}

impl FrameKind {
    /// Look up a frame by its source prefix (`GF`, `LF`, `TF`).
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "GF" => Some(FrameKind::Global),
            "LF" => Some(FrameKind::Local),
            "TF" => Some(FrameKind::Temporary),
            _ => None,
        }
    }

    /// The source prefix for this frame.
    pub fn prefix(self) -> &'static str {
        match self {
            FrameKind::Global => "GF",
            FrameKind::Local => "LF",
            FrameKind::Temporary => "TF",
        }
    }
}

impl std::fmt::Display for FrameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}
