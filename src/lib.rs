pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod types;

pub use alignment::assembly::AssembledTranscripts;
pub use alignment::edit_distance::{distance, similarity};
pub use alignment::normalize::{normalize, normalize_with};
pub use config::{AlignerConfig, ValidationMode, DEFAULT_FUZZY_MATCH_THRESHOLD};
pub use error::AlignmentError;
pub use pipeline::builder::RecitationAlignerBuilder;
pub use pipeline::runtime::RecitationAligner;
pub use pipeline::traits::{SectionDetector, SequenceAligner, TranscriptAssembler};
pub use store::{load_verses, CanonicalStore, InMemoryStore, VerseRecord};
pub use types::{
    tokens_from_segments, AlignmentOutput, AlignmentPath, AlignmentStats, DroppedFragment,
    RecognizedSegment, SectionMatch, Token, Verse, VerseTranscript, WordMapping,
};
