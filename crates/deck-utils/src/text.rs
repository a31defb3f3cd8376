//! Line normalization for `pdftotext` output.

/// Trim a line and collapse every run of whitespace to a single space.
///
/// `pdftotext -layout` pads columns with long runs of spaces and ends pages
/// with a form feed; both disappear here.
pub fn collapse_whitespace(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for word in line.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
