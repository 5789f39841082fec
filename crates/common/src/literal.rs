//! Decoding of literal operand text into values.
//!
//! Decoding is lazy: the loader stores raw text and the VM calls into this
//! module only when an operand is evaluated.

use crate::error::LiteralError;
use crate::instruction::OperandKind;
use crate::value::Value;

/// Decode the text of a constant operand according to its declared kind.
///
/// `type` operands decode to their raw text as a string. `var`, `label`
/// and unknown kinds have no literal value.
pub fn decode(kind: &OperandKind, text: &str) -> Result<Value, LiteralError> {
    match kind {
        OperandKind::Int => parse_int(text).map(Value::Int),
        OperandKind::String => parse_string(text).map(Value::Str),
        OperandKind::Bool => parse_bool(text).map(Value::Bool),
        OperandKind::Nil => parse_nil(text).map(|()| Value::Nil),
        OperandKind::Type => Ok(Value::Str(text.to_string())),
        OperandKind::Var | OperandKind::Label | OperandKind::Other(_) => {
            Err(LiteralError::NotALiteral(kind.name().to_string()))
        }
    }
}

/// Parse an integer literal.
///
/// Accepted forms: decimal with an optional `+`/`-` sign, `0x`/`-0x`
/// hexadecimal, and `0o`/`-0o` octal. Prefixes are case-insensitive.
pub fn parse_int(text: &str) -> Result<i64, LiteralError> {
    let invalid = || LiteralError::Int(text.to_string());

    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (radix, digits) = if let Some(d) = strip_prefix_ci(rest, "0x") {
        (16, d)
    } else if let Some(d) = strip_prefix_ci(rest, "0o") {
        (8, d)
    } else if !negative {
        (10, rest.strip_prefix('+').unwrap_or(rest))
    } else {
        (10, rest)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| invalid())?;
    let signed = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(signed).map_err(|_| invalid())
}

fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

/// Parse a string literal, expanding `\ddd` escapes.
///
/// Every backslash must be followed by exactly three decimal digits, which
/// give the code point of the decoded character.
pub fn parse_string(text: &str) -> Result<String, LiteralError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let mut code = 0u32;
        for _ in 0..3 {
            let digit = chars
                .next()
                .and_then(|d| d.to_digit(10))
                .ok_or_else(|| LiteralError::Escape(text.to_string()))?;
            code = code * 10 + digit;
        }
        let decoded = char::from_u32(code).ok_or_else(|| LiteralError::Escape(text.to_string()))?;
        out.push(decoded);
    }

    Ok(out)
}

/// Parse a bool literal: exactly `true` or `false`.
pub fn parse_bool(text: &str) -> Result<bool, LiteralError> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(LiteralError::Bool(text.to_string())),
    }
}

/// Parse a nil literal: exactly `nil`.
pub fn parse_nil(text: &str) -> Result<(), LiteralError> {
    if text == "nil" {
        Ok(())
    } else {
        Err(LiteralError::Nil(text.to_string()))
    }
}
