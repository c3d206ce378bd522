use std::collections::HashMap;

use crate::alignment::edit_distance::similarity;
use crate::alignment::normalize::normalize_with;
use crate::config::{AlignerConfig, ValidationMode, DEFAULT_VALIDATION_THRESHOLD};
use crate::types::{DroppedFragment, Token, Verse, VerseTranscript, WordMapping};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblyOptions {
    pub validation_threshold: f64,
    pub validation_mode: ValidationMode,
    pub fold_letter_variants: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            validation_threshold: DEFAULT_VALIDATION_THRESHOLD,
            validation_mode: ValidationMode::default(),
            fold_letter_variants: false,
        }
    }
}

impl From<&AlignerConfig> for AssemblyOptions {
    fn from(config: &AlignerConfig) -> Self {
        Self {
            validation_threshold: config.validation_threshold,
            validation_mode: config.validation_mode,
            fold_letter_variants: config.fold_letter_variants,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledTranscripts {
    /// Kept transcripts on a zero-based timeline.
    pub transcripts: Vec<VerseTranscript>,
    /// Fragments that failed validation, in stream order, with raw spans.
    pub dropped_fragments: Vec<DroppedFragment>,
}

/// Groups consecutive mappings of the same verse into transcripts, drops the
/// ones scoring below the validation threshold and shifts the rest so the
/// first kept transcript starts at zero.
///
/// Kept fragments of one verse that end up adjacent once a dropped fragment
/// between them is removed are merged back into a single transcript.
pub fn assemble_transcripts(
    mappings: &[WordMapping],
    verses: &[Verse],
    options: &AssemblyOptions,
) -> AssembledTranscripts {
    let canonical: HashMap<(u32, u32), Vec<String>> = verses
        .iter()
        .map(|v| {
            let words = v
                .words
                .iter()
                .map(|w| normalize_with(w, options.fold_letter_variants))
                .collect();
            ((v.section_id, v.number), words)
        })
        .collect();

    let mut kept: Vec<VerseTranscript> = Vec::new();
    let mut dropped_fragments = Vec::new();
    for group in group_by_verse(mappings) {
        let score = validation_score(&group, &canonical, options);
        if score >= options.validation_threshold {
            kept.push(group);
        } else {
            tracing::debug!(
                section_id = group.section_id,
                verse_number = group.verse_number,
                words = group.words.len(),
                score = format!("{:.3}", score),
                "assembly: dropped low-confidence fragment"
            );
            dropped_fragments.push(DroppedFragment {
                section_id: group.section_id,
                verse_number: group.verse_number,
                start: group.start,
                end: group.end,
                score,
            });
        }
    }

    let mut transcripts = merge_adjacent(kept);
    normalize_timeline(&mut transcripts);
    tracing::debug!(
        kept = transcripts.len(),
        dropped = dropped_fragments.len(),
        "assembly: built verse transcripts"
    );
    AssembledTranscripts {
        transcripts,
        dropped_fragments,
    }
}

fn group_by_verse(mappings: &[WordMapping]) -> Vec<VerseTranscript> {
    let mut groups: Vec<VerseTranscript> = Vec::new();
    for mapping in mappings {
        let continues = groups.last().is_some_and(|g| {
            g.section_id == mapping.section_id && g.verse_number == mapping.verse_number
        });
        if !continues {
            groups.push(VerseTranscript {
                section_id: mapping.section_id,
                verse_number: mapping.verse_number,
                start: 0.0,
                end: 0.0,
                words: Vec::new(),
                alignment: Vec::new(),
            });
        }
        if let Some(current) = groups.last_mut() {
            current.words.push(mapping.recognized.clone());
            current.alignment.push(mapping.canonical_word_index);
        }
    }

    groups
        .into_iter()
        .filter_map(|mut group| {
            let first = group.words.first()?.start;
            let last = group.words.last()?.end;
            group.start = first;
            group.end = last;
            Some(group)
        })
        .collect()
}

fn merge_adjacent(transcripts: Vec<VerseTranscript>) -> Vec<VerseTranscript> {
    let mut merged: Vec<VerseTranscript> = Vec::with_capacity(transcripts.len());
    for transcript in transcripts {
        match merged.last_mut() {
            Some(last)
                if last.section_id == transcript.section_id
                    && last.verse_number == transcript.verse_number =>
            {
                last.end = transcript.end;
                last.words.extend(transcript.words);
                last.alignment.extend(transcript.alignment);
            }
            _ => merged.push(transcript),
        }
    }
    merged
}

fn validation_score(
    transcript: &VerseTranscript,
    canonical: &HashMap<(u32, u32), Vec<String>>,
    options: &AssemblyOptions,
) -> f64 {
    match options.validation_mode {
        ValidationMode::SelfSimilarity => {
            let recognized =
                normalize_with(&joined_text(&transcript.words), options.fold_letter_variants);
            similarity(&recognized, &recognized)
        }
        ValidationMode::CanonicalText => {
            let Some(verse_words) = canonical.get(&(transcript.section_id, transcript.verse_number))
            else {
                tracing::warn!(
                    section_id = transcript.section_id,
                    verse_number = transcript.verse_number,
                    "assembly: mapping refers to a verse that was not loaded"
                );
                return 0.0;
            };
            covered_similarity(transcript, verse_words, options.fold_letter_variants)
        }
    }
}

/// Similarity of the mapped words against the canonical words their indices
/// cover. Fallback words take no part; a fragment with none mapped scores 0.
fn covered_similarity(
    transcript: &VerseTranscript,
    verse_words: &[String],
    fold_letter_variants: bool,
) -> f64 {
    let mapped: Vec<(&Token, usize)> = transcript
        .words
        .iter()
        .zip(&transcript.alignment)
        .filter_map(|(word, idx)| idx.map(|i| (word, i)))
        .collect();
    let first = mapped.iter().map(|(_, i)| *i).min();
    let last = mapped.iter().map(|(_, i)| *i).max();
    let (Some(first), Some(last)) = (first, last) else {
        return 0.0;
    };
    let Some(expected) = verse_words.get(first..=last) else {
        return 0.0;
    };

    let recognized = mapped
        .iter()
        .map(|(word, _)| word.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let expected = expected
        .iter()
        .filter(|w| !w.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    similarity(&normalize_with(&recognized, fold_letter_variants), &expected)
}

fn joined_text(words: &[Token]) -> String {
    words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shifts every span by the first transcript's start, clamping at zero.
pub fn normalize_timeline(transcripts: &mut [VerseTranscript]) {
    let Some(offset) = transcripts.first().map(|t| t.start) else {
        return;
    };
    for transcript in transcripts.iter_mut() {
        transcript.start = (transcript.start - offset).max(0.0);
        transcript.end = (transcript.end - offset).max(0.0);
    }
}
