//! Tokenizer for IPPcode24 source lines.

/// Split a source line into words.
///
/// Returns an empty Vec for blank lines and comment-only lines.
/// Comments start with `#` and extend to end of line. Words are separated
/// by spaces and tabs only.
pub(crate) fn tokenize_line(line: &str) -> Vec<&str> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    line.split([' ', '\t'])
        .map(|word| word.trim_end_matches('\r'))
        .filter(|word| !word.is_empty())
        .collect()
}
