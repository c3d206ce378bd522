use crate::alignment::assembly::AssembledTranscripts;
use crate::error::AlignmentError;
use crate::store::CanonicalStore;
use crate::types::{AlignmentPath, SectionMatch, Token, Verse, WordMapping};

pub trait SectionDetector: Send + Sync {
    fn detect(
        &self,
        words: &[Token],
        store: &dyn CanonicalStore,
    ) -> Result<SectionMatch, AlignmentError>;
}

pub trait SequenceAligner: Send + Sync {
    fn align(&self, words: &[Token], verses: &[Verse]) -> Result<AlignmentPath, AlignmentError>;
}

pub trait TranscriptAssembler: Send + Sync {
    fn assemble(&self, mappings: &[WordMapping], verses: &[Verse]) -> AssembledTranscripts;
}
