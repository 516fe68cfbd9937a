#[cfg(test)]
mod tests;

use std::fs;
use std::io;
use std::path::Path;

use crate::error::CompareError;
use crate::fingerprint::fingerprint_similarity;
use crate::normalize::normalize;
use crate::segments::{extract_segments, line_similarity};
use crate::structure::structural_similarity;
use crate::types::{CompareOptions, SimilarityLevel, SimilarityReport};

const FINGERPRINT_WEIGHT: f64 = 0.5;
const STRUCTURAL_WEIGHT: f64 = 0.3;
const LINE_WEIGHT: f64 = 0.2;

/// Scores two source texts against each other. Pure and deterministic:
/// the same inputs and options always produce the same report. Degenerate
/// inputs (blank text, fewer tokens than a k-gram) score 0.0 on the
/// affected measure instead of failing.
pub fn compare(
    code_a: &str,
    code_b: &str,
    options: &CompareOptions,
) -> Result<SimilarityReport, CompareError> {
    options.validate()?;

    let normalized_a = normalize(code_a, options);
    let normalized_b = normalize(code_b, options);
    tracing::debug!(
        tokens_a = normalized_a.tokens.len(),
        tokens_b = normalized_b.tokens.len(),
        "normalized inputs"
    );

    // The three analyses are independent given the normalized inputs.
    let ((fingerprint, structural), (line, segments)) = rayon::join(
        || {
            rayon::join(
                || {
                    fingerprint_similarity(
                        &normalized_a.tokens,
                        &normalized_b.tokens,
                        options.kgram_size,
                        options.window_size,
                    )
                },
                || structural_similarity(code_a, code_b),
            )
        },
        || {
            (
                line_similarity(&normalized_a.lines, &normalized_b.lines),
                extract_segments(
                    code_a,
                    code_b,
                    &normalized_a.lines,
                    &normalized_b.lines,
                    options.min_segment_len,
                    options.top_segments,
                ),
            )
        },
    );

    let overall =
        FINGERPRINT_WEIGHT * fingerprint + STRUCTURAL_WEIGHT * structural + LINE_WEIGHT * line;
    let level = SimilarityLevel::from_score(overall);
    tracing::debug!(
        fingerprint,
        structural,
        line,
        overall,
        level = level.as_str(),
        "comparison complete"
    );

    Ok(SimilarityReport {
        overall,
        level,
        fingerprint,
        structural,
        line,
        segments,
    })
}

/// Reads one source text from disk. Bytes that do not decode as UTF-8 are
/// dropped rather than treated as fatal.
pub fn load_source(path: &Path) -> Result<String, CompareError> {
    let bytes = fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            CompareError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            CompareError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let bytes = err.into_bytes();
            String::from_utf8_lossy(&bytes)
                .chars()
                .filter(|&c| c != char::REPLACEMENT_CHARACTER)
                .collect()
        }
    };
    Ok(text)
}

/// Path-based convenience over [`compare`].
pub fn compare_files(
    path_a: &Path,
    path_b: &Path,
    options: &CompareOptions,
) -> Result<SimilarityReport, CompareError> {
    let code_a = load_source(path_a)?;
    let code_b = load_source(path_b)?;
    compare(&code_a, &code_b, options)
}
