use crate::alignment::assembly::{assemble_transcripts, AssembledTranscripts, AssemblyOptions};
use crate::alignment::detection::detect_section;
use crate::alignment::dp::{align_words, DpOptions};
use crate::config::{AlignerConfig, DEFAULT_DETECTION_WINDOW_VERSES};
use crate::error::AlignmentError;
use crate::pipeline::traits::{SectionDetector, SequenceAligner, TranscriptAssembler};
use crate::store::CanonicalStore;
use crate::types::{AlignmentPath, SectionMatch, Token, Verse, WordMapping};

pub struct SlidingWindowDetector {
    pub window_verses: usize,
    pub fold_letter_variants: bool,
}

impl Default for SlidingWindowDetector {
    fn default() -> Self {
        Self {
            window_verses: DEFAULT_DETECTION_WINDOW_VERSES,
            fold_letter_variants: false,
        }
    }
}

impl From<&AlignerConfig> for SlidingWindowDetector {
    fn from(config: &AlignerConfig) -> Self {
        Self {
            window_verses: config.detection_window_verses,
            fold_letter_variants: config.fold_letter_variants,
        }
    }
}

impl SectionDetector for SlidingWindowDetector {
    fn detect(
        &self,
        words: &[Token],
        store: &dyn CanonicalStore,
    ) -> Result<SectionMatch, AlignmentError> {
        detect_section(words, store, self.window_verses, self.fold_letter_variants)
    }
}

#[derive(Default)]
pub struct ContinuityDpAligner {
    pub options: DpOptions,
}

impl SequenceAligner for ContinuityDpAligner {
    fn align(&self, words: &[Token], verses: &[Verse]) -> Result<AlignmentPath, AlignmentError> {
        align_words(words, verses, &self.options)
    }
}

#[derive(Default)]
pub struct ValidatingAssembler {
    pub options: AssemblyOptions,
}

impl TranscriptAssembler for ValidatingAssembler {
    fn assemble(&self, mappings: &[WordMapping], verses: &[Verse]) -> AssembledTranscripts {
        assemble_transcripts(mappings, verses, &self.options)
    }
}
