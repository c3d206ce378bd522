use serde::{Deserialize, Serialize};

/// One recognized or canonical word with its time span in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Token {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Segment-level recognizer output (one phrase with a single time span).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Splits each segment into word tokens of equal duration.
///
/// Recognizers that only report phrase timings still need word-level tokens;
/// the segment span is divided evenly across its whitespace-separated words.
pub fn tokens_from_segments(segments: &[RecognizedSegment]) -> Vec<Token> {
    let mut tokens = Vec::new();
    for segment in segments {
        let words: Vec<&str> = segment.text.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        let word_dur = (segment.end - segment.start) / words.len() as f64;
        for (i, word) in words.into_iter().enumerate() {
            let start = segment.start + i as f64 * word_dur;
            tokens.push(Token::new(word, start, start + word_dur));
        }
    }
    tokens
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub section_id: u32,
    /// `0` is reserved for the invocation line prefixed to verse 1.
    pub number: u32,
    pub section_name: String,
    pub canonical_text: String,
    pub translation: String,
    pub footnotes: Vec<String>,
    pub words: Vec<String>,
}

impl Verse {
    pub fn new(
        section_id: u32,
        number: u32,
        section_name: impl Into<String>,
        canonical_text: impl Into<String>,
        translation: impl Into<String>,
        footnotes: Vec<String>,
    ) -> Self {
        let canonical_text = canonical_text.into();
        let words = canonical_text
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Self {
            section_id,
            number,
            section_name: section_name.into(),
            canonical_text,
            translation: translation.into(),
            footnotes,
            words,
        }
    }

    pub fn is_invocation(&self) -> bool {
        self.number == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionMatch {
    pub section_id: u32,
    pub start_verse: u32,
    /// Normalized similarity, `1.0` is a perfect match.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordMapping {
    pub recognized: Token,
    pub section_id: u32,
    pub verse_number: u32,
    /// Index into the verse's `words`; `None` when the word was fallback-assigned.
    pub canonical_word_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentPath {
    pub mappings: Vec<WordMapping>,
    /// Total DP cost at `dp[n][m]`, continuity penalties included.
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseTranscript {
    pub section_id: u32,
    pub verse_number: u32,
    pub start: f64,
    pub end: f64,
    pub words: Vec<Token>,
    /// Recognized word position -> canonical word index within the verse.
    pub alignment: Vec<Option<usize>>,
}

impl VerseTranscript {
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentStats {
    pub recognized_words: usize,
    /// Words placed by a diagonal DP step.
    pub mapped_words: usize,
    /// Words the backtrace left unmapped and were clamped to a canonical position.
    pub fallback_words: usize,
    /// Fragments that failed validation, in stream order.
    pub dropped_fragments: Vec<DroppedFragment>,
}

/// A run of consecutive words assigned to one verse that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedFragment {
    pub section_id: u32,
    pub verse_number: u32,
    /// Raw stream span, before timeline normalization.
    pub start: f64,
    pub end: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentOutput {
    pub section_match: SectionMatch,
    pub transcripts: Vec<VerseTranscript>,
    pub stats: AlignmentStats,
}

impl AlignmentOutput {
    /// First transcript whose zero-based span covers `t` seconds.
    pub fn active_transcript(&self, t: f64) -> Option<&VerseTranscript> {
        self.transcripts.iter().find(|tr| tr.contains(t))
    }
}
