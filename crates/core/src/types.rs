use std::fmt;

use crate::error::CompareError;

/// Knobs for one comparison. Built once, handed to [`crate::compare`] by
/// reference, and never mutated mid-pipeline.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Strip `/* */` and `//` comments before tokenizing.
    pub ignore_comments: bool,
    /// Collapse whitespace runs and drop spacing around punctuation.
    pub ignore_whitespace: bool,
    /// Rename identifiers to `ID_0`, `ID_1`, … in first-seen order,
    /// independently per input.
    pub normalize_identifiers: bool,
    /// Tokens per fingerprint k-gram.
    pub kgram_size: usize,
    /// Winnowing window, in k-gram hashes.
    pub window_size: usize,
    /// Minimum matching segment length, in lines.
    pub min_segment_len: usize,
    /// Maximum number of segments kept in the report.
    pub top_segments: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            ignore_comments: true,
            ignore_whitespace: true,
            normalize_identifiers: true,
            kgram_size: 5,
            window_size: 10,
            min_segment_len: 3,
            top_segments: 5,
        }
    }
}

impl CompareOptions {
    pub fn validate(&self) -> Result<(), CompareError> {
        if self.kgram_size == 0 {
            return Err(CompareError::InvalidOptions(
                "kgram_size must be >= 1".to_string(),
            ));
        }
        if self.window_size == 0 {
            return Err(CompareError::InvalidOptions(
                "window_size must be >= 1".to_string(),
            ));
        }
        if self.min_segment_len == 0 {
            return Err(CompareError::InvalidOptions(
                "min_segment_len must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Qualitative bucket for an overall score, thresholds inclusive at the
/// lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimilarityLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl SimilarityLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::VeryHigh
        } else if score >= 0.6 {
            Self::High
        } else if score >= 0.4 {
            Self::Moderate
        } else if score >= 0.2 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
            Self::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for SimilarityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pair of aligned line ranges, sliced from the original inputs.
/// Line numbers are 1-indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingSegment {
    pub start_line_a: usize,
    pub start_line_b: usize,
    pub len: usize,
    pub text_a: String,
    pub text_b: String,
    /// Character-level alignment ratio of the two literal slices.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityReport {
    pub overall: f64,
    pub level: SimilarityLevel,
    pub fingerprint: f64,
    pub structural: f64,
    pub line: f64,
    /// Up to `top_segments` segments, descending by local score.
    pub segments: Vec<MatchingSegment>,
}
