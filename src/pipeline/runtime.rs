use crate::error::AlignmentError;
use crate::pipeline::traits::{SectionDetector, SequenceAligner, TranscriptAssembler};
use crate::store::{load_verses, CanonicalStore};
use crate::types::{AlignmentOutput, AlignmentStats, SectionMatch, Token};

/// Runs detect -> load -> align -> assemble over one recitation.
///
/// Holds no per-run state, so one instance can serve concurrent runs.
pub struct RecitationAligner {
    max_verses: Option<usize>,
    section_detector: Box<dyn SectionDetector>,
    sequence_aligner: Box<dyn SequenceAligner>,
    transcript_assembler: Box<dyn TranscriptAssembler>,
}

pub(crate) struct RecitationAlignerParts {
    pub max_verses: Option<usize>,
    pub section_detector: Box<dyn SectionDetector>,
    pub sequence_aligner: Box<dyn SequenceAligner>,
    pub transcript_assembler: Box<dyn TranscriptAssembler>,
}

impl RecitationAligner {
    pub(crate) fn from_parts(parts: RecitationAlignerParts) -> Self {
        Self {
            max_verses: parts.max_verses,
            section_detector: parts.section_detector,
            sequence_aligner: parts.sequence_aligner,
            transcript_assembler: parts.transcript_assembler,
        }
    }

    pub fn align(
        &self,
        words: &[Token],
        store: &dyn CanonicalStore,
    ) -> Result<AlignmentOutput, AlignmentError> {
        validate_tokens(words)?;
        let section_match = self.section_detector.detect(words, store)?;
        self.align_section(words, store, section_match)
    }

    /// Skips detection, aligning against an already known section window.
    pub fn align_section(
        &self,
        words: &[Token],
        store: &dyn CanonicalStore,
        section_match: SectionMatch,
    ) -> Result<AlignmentOutput, AlignmentError> {
        validate_tokens(words)?;

        let verses = load_verses(store, section_match.section_id, section_match.start_verse)?;
        if verses.iter().all(|v| v.words.is_empty()) {
            return Err(AlignmentError::DegenerateAlignment {
                section_id: section_match.section_id,
            });
        }

        let path = self.sequence_aligner.align(words, &verses)?;
        let assembled = self.transcript_assembler.assemble(&path.mappings, &verses);

        let mapped_words = path
            .mappings
            .iter()
            .filter(|m| m.canonical_word_index.is_some())
            .count();
        let stats = AlignmentStats {
            recognized_words: words.len(),
            mapped_words,
            fallback_words: path.mappings.len() - mapped_words,
            dropped_fragments: assembled.dropped_fragments,
        };

        let mut transcripts = assembled.transcripts;
        if let Some(max_verses) = self.max_verses {
            transcripts.truncate(max_verses);
        }

        if !stats.dropped_fragments.is_empty() {
            let dropped: Vec<(u32, u32)> = stats
                .dropped_fragments
                .iter()
                .map(|d| (d.section_id, d.verse_number))
                .collect();
            tracing::warn!(
                section_id = section_match.section_id,
                dropped = ?dropped,
                "recitation: verse fragments failed validation and were omitted"
            );
        }
        tracing::debug!(
            section_id = section_match.section_id,
            start_verse = section_match.start_verse,
            verses_loaded = verses.len(),
            transcripts = transcripts.len(),
            dp_cost = path.cost,
            "recitation: alignment complete"
        );

        Ok(AlignmentOutput {
            section_match,
            transcripts,
            stats,
        })
    }
}

fn validate_tokens(words: &[Token]) -> Result<(), AlignmentError> {
    if words.is_empty() {
        return Err(AlignmentError::EmptyInput);
    }
    if let Some((idx, bad)) = words
        .iter()
        .enumerate()
        .find(|(_, w)| !w.start.is_finite() || !w.end.is_finite() || w.start > w.end)
    {
        return Err(AlignmentError::invalid_input(format!(
            "token {idx} ({:?}) has invalid span {}..{}",
            bad.text, bad.start, bad.end
        )));
    }
    Ok(())
}
