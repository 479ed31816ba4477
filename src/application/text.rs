//! Label text helpers: word wrapping and HTML escaping.

use itertools::Itertools;

/// Wrap `text` at whitespace so no line exceeds `limit` characters.
///
/// Existing line breaks are kept. A word longer than `limit` stays whole on
/// its own line. `limit == 0` returns the text unchanged.
pub fn wrap(text: &str, limit: usize) -> String {
    if limit == 0 {
        return text.to_string();
    }
    text.split('\n').map(|line| wrap_line(line, limit)).join("\n")
}

fn wrap_line(line: &str, limit: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut width = 0;
    for word in line.split_whitespace() {
        let len = word.chars().count();
        if width > 0 {
            if width + 1 + len > limit {
                out.push('\n');
                width = 0;
            } else {
                out.push(' ');
                width += 1;
            }
        }
        out.push_str(word);
        width += len;
    }
    out
}

/// Escape `&`, `'` and `"` for HTML-like labels.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('\'', "&#39;")
        .replace('"', "&#34;")
}

/// Wrap, escape and turn line breaks into `<br/>`.
pub fn sanitize(text: &str, limit: usize) -> String {
    escape_html(&wrap(text, limit)).replace('\n', "<br/>")
}
