use crate::alignment::edit_distance::similarity_chars;
use crate::alignment::normalize::normalize_with;
use crate::error::AlignmentError;
use crate::store::{load_verses, CanonicalStore};
use crate::types::{SectionMatch, Token};

/// Coarse whole-stream match: slides a window of `window_verses` verses over
/// every section and keeps the best-scoring window start.
///
/// Invocation lines (verse `0`) are not part of any window. Ties keep the
/// first maximum in store order.
pub fn detect_section(
    words: &[Token],
    store: &dyn CanonicalStore,
    window_verses: usize,
    fold_letter_variants: bool,
) -> Result<SectionMatch, AlignmentError> {
    if words.is_empty() {
        return Err(AlignmentError::EmptyInput);
    }
    if window_verses == 0 {
        return Err(AlignmentError::invalid_input(
            "detection window must span at least one verse",
        ));
    }

    let joined = words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let transcript: Vec<char> = normalize_with(&joined, fold_letter_variants)
        .chars()
        .collect();

    let section_ids = store.section_ids()?;
    let mut best: Option<SectionMatch> = None;
    let mut windows_scored = 0usize;

    for section_id in section_ids {
        let verses: Vec<_> = load_verses(store, section_id, 0)?
            .into_iter()
            .filter(|v| !v.is_invocation())
            .collect();
        let texts: Vec<String> = verses
            .iter()
            .map(|v| normalize_with(&v.canonical_text, fold_letter_variants))
            .collect();

        for start in 0..texts.len() {
            let end = (start + window_verses).min(texts.len());
            let window: Vec<char> = texts[start..end].join(" ").chars().collect();
            let score = similarity_chars(&transcript, &window);
            windows_scored += 1;

            if best.map_or(true, |b| score > b.score) {
                best = Some(SectionMatch {
                    section_id,
                    start_verse: verses[start].number,
                    score,
                });
            }
        }
    }

    match best {
        Some(found) => {
            tracing::debug!(
                section_id = found.section_id,
                start_verse = found.start_verse,
                score = format!("{:.3}", found.score),
                windows_scored,
                "detection: best section window"
            );
            Ok(found)
        }
        None => {
            tracing::warn!(
                recognized_words = words.len(),
                "detection: store has no verses to compare against"
            );
            Err(AlignmentError::NoSectionMatch)
        }
    }
}
