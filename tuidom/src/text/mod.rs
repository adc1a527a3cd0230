use unicode_width::UnicodeWidthChar;

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Drop the first `skip` display columns of `line`.
///
/// A double-width character cut in half by the skip is replaced by a space
/// so columns stay aligned.
pub fn skip_columns(line: &str, skip: usize) -> String {
    let mut skipped = 0;
    let mut out = String::new();
    for ch in line.chars() {
        if skipped >= skip {
            out.push(ch);
            continue;
        }
        skipped += char_width(ch);
        if skipped > skip {
            out.push(' ');
        }
    }
    out
}
