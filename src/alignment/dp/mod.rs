use crate::alignment::edit_distance::similarity_chars;
use crate::alignment::normalize::normalize_with;
use crate::config::{AlignerConfig, DEFAULT_CONTINUITY_PENALTY, DEFAULT_FUZZY_MATCH_THRESHOLD};
use crate::error::AlignmentError;
use crate::types::{AlignmentPath, Token, Verse, WordMapping};

#[cfg(test)]
mod tests;

const STEP_DIAGONAL: u8 = 0;
const STEP_SKIP_CANONICAL: u8 = 1;
const STEP_SKIP_RECOGNIZED: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpOptions {
    pub fuzzy_match_threshold: f64,
    /// Added to a substitution whose canonical word is more than one verse
    /// away from the canonical word two positions before it. `0` disables
    /// the penalty.
    pub continuity_penalty: u32,
    pub fold_letter_variants: bool,
}

impl Default for DpOptions {
    fn default() -> Self {
        Self {
            fuzzy_match_threshold: DEFAULT_FUZZY_MATCH_THRESHOLD,
            continuity_penalty: DEFAULT_CONTINUITY_PENALTY,
            fold_letter_variants: false,
        }
    }
}

impl From<&AlignerConfig> for DpOptions {
    fn from(config: &AlignerConfig) -> Self {
        Self {
            fuzzy_match_threshold: config.fuzzy_match_threshold,
            continuity_penalty: config.continuity_penalty,
            fold_letter_variants: config.fold_letter_variants,
        }
    }
}

/// Canonical word with its position in the section.
#[derive(Clone, Debug)]
struct FlatWord {
    section_id: u32,
    verse_number: u32,
    index_in_verse: usize,
    normalized: Vec<char>,
}

fn flatten(verses: &[Verse], fold_letter_variants: bool) -> Vec<FlatWord> {
    verses
        .iter()
        .flat_map(|verse| {
            verse.words.iter().enumerate().map(move |(idx, word)| FlatWord {
                section_id: verse.section_id,
                verse_number: verse.number,
                index_in_verse: idx,
                normalized: normalize_with(word, fold_letter_variants).chars().collect(),
            })
        })
        .collect()
}

/// 0 when the normalized words are at least `threshold` similar, else 1.
pub(crate) fn word_cost(canonical: &[char], recognized: &[char], threshold: f64) -> u32 {
    if canonical.is_empty() || recognized.is_empty() {
        return 1;
    }
    u32::from(similarity_chars(canonical, recognized) < threshold)
}

/// Penalty for matching DP row `i`: compares the canonical word matched at
/// row `i` (`flat[i - 1]`) with the word two positions before it
/// (`flat[i - 3]`).
fn continuity_penalty(flat: &[FlatWord], i: usize, penalty: u32) -> u32 {
    if penalty == 0 || i < 3 {
        return 0;
    }
    let current = flat[i - 1].verse_number;
    let two_back = flat[i - 3].verse_number;
    if current.abs_diff(two_back) > 1 {
        penalty
    } else {
        0
    }
}

/// Word-level edit-distance alignment of the whole recognized stream against
/// the flattened canonical words of `verses`.
///
/// Returns one mapping per recognized word in stream order. Words the
/// backtrace leaves unmapped are clamped to canonical position
/// `min(word_index, n - 1)` with no canonical word index.
pub fn align_words(
    recognized: &[Token],
    verses: &[Verse],
    options: &DpOptions,
) -> Result<AlignmentPath, AlignmentError> {
    if recognized.is_empty() {
        return Err(AlignmentError::EmptyInput);
    }
    let flat = flatten(verses, options.fold_letter_variants);
    if flat.is_empty() {
        return Err(AlignmentError::DegenerateAlignment {
            section_id: verses.first().map(|v| v.section_id).unwrap_or_default(),
        });
    }

    let recognized_norm: Vec<Vec<char>> = recognized
        .iter()
        .map(|t| {
            normalize_with(&t.text, options.fold_letter_variants)
                .chars()
                .collect()
        })
        .collect();

    let n = flat.len();
    let m = recognized.len();
    let width = m + 1;

    let mut dp = vec![0u32; (n + 1) * width];
    let mut bp = vec![STEP_DIAGONAL; (n + 1) * width];
    for i in 1..=n {
        dp[i * width] = i as u32;
        bp[i * width] = STEP_SKIP_CANONICAL;
    }
    for j in 1..=m {
        dp[j] = j as u32;
        bp[j] = STEP_SKIP_RECOGNIZED;
    }

    for i in 1..=n {
        let penalty = continuity_penalty(&flat, i, options.continuity_penalty);
        let canonical = &flat[i - 1].normalized;
        let row = i * width;
        let prev_row = (i - 1) * width;
        for j in 1..=m {
            let cost = word_cost(canonical, &recognized_norm[j - 1], options.fuzzy_match_threshold);
            let sub = dp[prev_row + j - 1] + cost + penalty;
            let del = dp[prev_row + j] + 1;
            let ins = dp[row + j - 1] + 1;

            // Diagonal wins ties, then skipping a canonical word.
            let (best, step) = if sub <= del && sub <= ins {
                (sub, STEP_DIAGONAL)
            } else if del <= ins {
                (del, STEP_SKIP_CANONICAL)
            } else {
                (ins, STEP_SKIP_RECOGNIZED)
            };
            dp[row + j] = best;
            bp[row + j] = step;
        }
    }
    let cost = dp[n * width + m];

    let mut assigned: Vec<Option<usize>> = vec![None; m];
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        match bp[i * width + j] {
            STEP_DIAGONAL => {
                assigned[j - 1] = Some(i - 1);
                i -= 1;
                j -= 1;
            }
            STEP_SKIP_CANONICAL => i -= 1,
            _ => j -= 1,
        }
    }

    let mut fallback_words = 0usize;
    let mappings: Vec<WordMapping> = recognized
        .iter()
        .zip(assigned)
        .enumerate()
        .map(|(w, (token, slot))| {
            let (flat_idx, canonical_word_index) = match slot {
                Some(idx) => (idx, Some(flat[idx].index_in_verse)),
                None => {
                    fallback_words += 1;
                    (w.min(n - 1), None)
                }
            };
            let word = &flat[flat_idx];
            WordMapping {
                recognized: token.clone(),
                section_id: word.section_id,
                verse_number: word.verse_number,
                canonical_word_index,
            }
        })
        .collect();

    tracing::debug!(
        canonical_words = n,
        recognized_words = m,
        cost,
        fallback_words,
        "dp: aligned recognized stream"
    );

    Ok(AlignmentPath { mappings, cost })
}
