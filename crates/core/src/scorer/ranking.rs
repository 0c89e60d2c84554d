//! Ranking poems by occurrences of a word.

use crate::poetry::Poem;

use super::matcher::WordMatcher;
use super::types::ScoreEntry;

/// Score every poem and sort by count, highest first.
///
/// The sort is stable: poems with equal counts keep their input order.
/// A blank word performs no ranking and yields no entries; use
/// [`best_match`] for the single-entry form, which reports the no-match
/// entry in that case.
pub fn rank(poems: &[Poem], word: &str) -> Vec<ScoreEntry> {
    let Some(matcher) = WordMatcher::new(word) else {
        return Vec::new();
    };
    rank_with(poems, &matcher)
}

/// [`rank`] with a prebuilt matcher.
pub fn rank_with(poems: &[Poem], matcher: &WordMatcher) -> Vec<ScoreEntry> {
    let mut entries: Vec<ScoreEntry> = poems
        .iter()
        .enumerate()
        .map(|(i, p)| ScoreEntry::new(i, matcher.count_in_poem(p), matcher.word()))
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// The poem with the most occurrences, first one winning ties.
///
/// Returns the no-match entry when the word is blank or no poem contains it.
pub fn best_match(poems: &[Poem], word: &str) -> ScoreEntry {
    rank(poems, word)
        .into_iter()
        .next()
        .filter(|e| e.count > 0)
        .unwrap_or_else(|| ScoreEntry::no_match(word.trim()))
}

/// Poems kept after scoring a pool.
#[derive(Debug, Clone, PartialEq)]
pub struct TopK {
    /// Surviving poems, highest count first.
    pub poems: Vec<Poem>,
    /// Count for each entry of `poems`.
    pub counts: Vec<usize>,
    /// Entry for `poems[0]`, or the no-match entry if nothing survived.
    pub best: ScoreEntry,
}

/// Score a pool, drop poems without the word, keep the `k` best.
///
/// Relative pool order is preserved among poems with equal counts.
pub fn top_k_by_word(pool: Vec<Poem>, matcher: &WordMatcher, k: usize) -> TopK {
    let mut scored: Vec<(Poem, usize)> = pool
        .into_iter()
        .map(|p| {
            let count = matcher.count_in_poem(&p);
            (p, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(k);

    let best = match scored.first() {
        Some((_, count)) => ScoreEntry::new(0, *count, matcher.word()),
        None => ScoreEntry::no_match(matcher.word()),
    };
    let (poems, counts) = scored.into_iter().unzip();

    TopK {
        poems,
        counts,
        best,
    }
}
