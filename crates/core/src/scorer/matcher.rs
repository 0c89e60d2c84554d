//! Whole-word, case-insensitive word counting.

use regex_lite::{Matches, Regex};
use tracing::warn;

use crate::poetry::Poem;

/// Matches a literal word on word boundaries, ignoring case.
///
/// The word is escaped before the pattern is built, so `a.b` only matches
/// the literal text `a.b`.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    word: String,
    regex: Regex,
}

impl WordMatcher {
    /// Build a matcher for `word`. Blank words yield `None`.
    pub fn new(word: &str) -> Option<Self> {
        let word = word.trim();
        if word.is_empty() {
            return None;
        }

        let pattern = format!(r"(?i)\b{}\b", regex_lite::escape(word));
        match Regex::new(&pattern) {
            Ok(regex) => Some(Self {
                word: word.to_string(),
                regex,
            }),
            Err(e) => {
                warn!(word = word, "Could not build word matcher: {}", e);
                None
            }
        }
    }

    /// The trimmed word this matcher looks for.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Number of non-overlapping occurrences in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    /// Occurrences across a poem's lines joined by newlines.
    pub fn count_in_poem(&self, poem: &Poem) -> usize {
        self.count(&poem.text())
    }

    /// Matches of the word in `text`, in order.
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        self.regex.find_iter(text)
    }
}

/// Count whole-word, case-insensitive occurrences of `word` in `text`.
/// A blank word counts as zero.
pub fn count_word(text: &str, word: &str) -> usize {
    WordMatcher::new(word).map_or(0, |m| m.count(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_all_occurrences() {
        assert_eq!(count_word("The rose is a rose.", "rose"), 2);
    }

    #[test]
    fn test_whole_word_only() {
        assert_eq!(count_word("roses", "rose"), 0);
        assert_eq!(count_word("the cat sat in the catalog", "cat"), 1);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(count_word("Rose ROSE rose", "rOsE"), 3);
    }

    #[test]
    fn test_word_is_literal() {
        assert_eq!(count_word("a.b axb a.b", "a.b"), 2);
        assert_eq!(count_word("axb", "a.b"), 0);
        assert_eq!(count_word("(x) x", "(x)"), 0);
        assert_eq!(count_word("a+b ab", "a+b"), 1);
    }

    #[test]
    fn test_blank_word_counts_zero() {
        assert_eq!(count_word("anything at all", ""), 0);
        assert_eq!(count_word("anything at all", "   "), 0);
        assert!(WordMatcher::new(" \t").is_none());
    }

    #[test]
    fn test_word_is_trimmed() {
        let matcher = WordMatcher::new("  ice ").unwrap();
        assert_eq!(matcher.word(), "ice");
        assert_eq!(matcher.count("Some say in ice."), 1);
    }

    #[test]
    fn test_count_in_poem_spans_lines() {
        let poem = Poem::new(
            "T",
            "A",
            vec!["fire and".to_string(), "fire".to_string()],
        );
        let matcher = WordMatcher::new("fire").unwrap();
        assert_eq!(matcher.count_in_poem(&poem), 2);
        // Joining with a newline keeps words on adjacent lines apart.
        assert_eq!(count_word(&poem.text(), "andfire"), 0);
    }

    #[test]
    fn test_find_iter_reports_positions() {
        let matcher = WordMatcher::new("ice").unwrap();
        let text = String::from("Ice, nice ice");
        let spans: Vec<(usize, usize)> = matcher
            .find_iter(&text)
            .map(|m| (m.start(), m.end()))
            .collect();
        assert_eq!(spans, vec![(0, 3), (10, 13)]);
    }
}
