use crate::alignment::assembly::AssemblyOptions;
use crate::alignment::dp::DpOptions;
use crate::config::AlignerConfig;
use crate::error::AlignmentError;
use crate::pipeline::defaults::{ContinuityDpAligner, SlidingWindowDetector, ValidatingAssembler};
use crate::pipeline::runtime::{RecitationAligner, RecitationAlignerParts};
use crate::pipeline::traits::{SectionDetector, SequenceAligner, TranscriptAssembler};

pub struct RecitationAlignerBuilder {
    config: AlignerConfig,
    section_detector: Option<Box<dyn SectionDetector>>,
    sequence_aligner: Option<Box<dyn SequenceAligner>>,
    transcript_assembler: Option<Box<dyn TranscriptAssembler>>,
}

impl RecitationAlignerBuilder {
    pub fn new(config: AlignerConfig) -> Self {
        Self {
            config,
            section_detector: None,
            sequence_aligner: None,
            transcript_assembler: None,
        }
    }

    pub fn with_section_detector(mut self, section_detector: Box<dyn SectionDetector>) -> Self {
        self.section_detector = Some(section_detector);
        self
    }

    pub fn with_sequence_aligner(mut self, sequence_aligner: Box<dyn SequenceAligner>) -> Self {
        self.sequence_aligner = Some(sequence_aligner);
        self
    }

    pub fn with_transcript_assembler(
        mut self,
        transcript_assembler: Box<dyn TranscriptAssembler>,
    ) -> Self {
        self.transcript_assembler = Some(transcript_assembler);
        self
    }

    pub fn build(self) -> Result<RecitationAligner, AlignmentError> {
        self.config.validate()?;
        let config = self.config;

        let section_detector = self
            .section_detector
            .unwrap_or_else(|| Box::new(SlidingWindowDetector::from(&config)));
        let sequence_aligner = self.sequence_aligner.unwrap_or_else(|| {
            Box::new(ContinuityDpAligner {
                options: DpOptions::from(&config),
            })
        });
        let transcript_assembler = self.transcript_assembler.unwrap_or_else(|| {
            Box::new(ValidatingAssembler {
                options: AssemblyOptions::from(&config),
            })
        });

        Ok(RecitationAligner::from_parts(RecitationAlignerParts {
            max_verses: config.max_verses,
            section_detector,
            sequence_aligner,
            transcript_assembler,
        }))
    }
}
