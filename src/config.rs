use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AlignmentError;

/// Word similarity at or above this counts as a zero-cost match in the DP.
pub const DEFAULT_FUZZY_MATCH_THRESHOLD: f64 = 0.7;
pub const DEFAULT_CONTINUITY_PENALTY: u32 = 1;
pub const DEFAULT_DETECTION_WINDOW_VERSES: usize = 15;
pub const DEFAULT_VALIDATION_THRESHOLD: f64 = 0.6;

/// What a verse transcript's recognized text is scored against before it is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Compare against the verse's canonical text; rejects misaligned segments.
    #[default]
    CanonicalText,
    /// Compare the recognized text against itself; only empty transcripts fail.
    SelfSimilarity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignerConfig {
    #[serde(default = "default_fuzzy_match_threshold")]
    pub fuzzy_match_threshold: f64,
    #[serde(default = "default_continuity_penalty")]
    pub continuity_penalty: u32,
    #[serde(default = "default_detection_window_verses")]
    pub detection_window_verses: usize,
    #[serde(default = "default_validation_threshold")]
    pub validation_threshold: f64,
    #[serde(default)]
    pub validation_mode: ValidationMode,
    #[serde(default)]
    pub fold_letter_variants: bool,
    #[serde(default)]
    pub max_verses: Option<usize>,
}

fn default_fuzzy_match_threshold() -> f64 {
    DEFAULT_FUZZY_MATCH_THRESHOLD
}
fn default_continuity_penalty() -> u32 {
    DEFAULT_CONTINUITY_PENALTY
}
fn default_detection_window_verses() -> usize {
    DEFAULT_DETECTION_WINDOW_VERSES
}
fn default_validation_threshold() -> f64 {
    DEFAULT_VALIDATION_THRESHOLD
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            fuzzy_match_threshold: DEFAULT_FUZZY_MATCH_THRESHOLD,
            continuity_penalty: DEFAULT_CONTINUITY_PENALTY,
            detection_window_verses: DEFAULT_DETECTION_WINDOW_VERSES,
            validation_threshold: DEFAULT_VALIDATION_THRESHOLD,
            validation_mode: ValidationMode::default(),
            fold_letter_variants: false,
            max_verses: None,
        }
    }
}

impl AlignerConfig {
    pub fn load(path: &Path) -> Result<Self, AlignmentError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AlignmentError::io("read aligner config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| AlignmentError::json("parse aligner config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AlignmentError> {
        if !(0.0..=1.0).contains(&self.fuzzy_match_threshold) {
            return Err(AlignmentError::invalid_input(format!(
                "fuzzy_match_threshold must be within [0, 1], got {}",
                self.fuzzy_match_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.validation_threshold) {
            return Err(AlignmentError::invalid_input(format!(
                "validation_threshold must be within [0, 1], got {}",
                self.validation_threshold
            )));
        }
        if self.detection_window_verses == 0 {
            return Err(AlignmentError::invalid_input(
                "detection_window_verses must be at least 1",
            ));
        }
        Ok(())
    }
}
