//! Markup-safe highlighting of word matches.

use crate::poetry::Poem;

use super::matcher::WordMatcher;

/// Opening marker placed before each match.
pub const MARK_OPEN: &str = r#"<mark class="hl">"#;
/// Closing marker placed after each match.
pub const MARK_CLOSE: &str = "</mark>";

/// Escape characters with meaning in HTML markup.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape `text` and wrap every whole-word match in the markers.
///
/// Matching runs on the raw text and each segment is escaped on its own,
/// so the word can never match inside an inserted entity.
pub fn highlight_text(text: &str, matcher: Option<&WordMatcher>) -> String {
    let Some(matcher) = matcher else {
        return escape_html(text);
    };

    let mut out = String::with_capacity(text.len() + 32);
    let mut last = 0;
    for m in matcher.find_iter(text) {
        out.push_str(&escape_html(&text[last..m.start()]));
        out.push_str(MARK_OPEN);
        out.push_str(&escape_html(m.as_str()));
        out.push_str(MARK_CLOSE);
        last = m.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

/// Highlight a poem's text (lines joined with `\n`).
pub fn highlight_poem(poem: &Poem, matcher: Option<&WordMatcher>) -> String {
    highlight_text(&poem.text(), matcher)
}
