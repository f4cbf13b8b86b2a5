// String Literals
//
// Quoting of inlined content as JavaScript source.

/// `value` as a single-quoted JavaScript string literal.
///
/// Line terminators are escaped so the literal stays on one line; U+2028 and U+2029 are
/// line terminators in JavaScript string literals as well.
pub fn quote_single(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}
