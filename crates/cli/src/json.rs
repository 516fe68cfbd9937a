use std::io;

use code_sim_check_core::SimilarityReport;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonMatchingSegment {
    pub(crate) start_line_a: usize,
    pub(crate) start_line_b: usize,
    pub(crate) length: usize,
    pub(crate) segment_a: String,
    pub(crate) segment_b: String,
    pub(crate) similarity: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonSimilarityReport {
    pub(crate) overall_similarity: f64,
    pub(crate) similarity_level: String,
    pub(crate) fingerprint_similarity: f64,
    pub(crate) structural_similarity: f64,
    pub(crate) line_similarity: f64,
    pub(crate) suspicious_segments: Vec<JsonMatchingSegment>,
}

pub(crate) fn map_report(report: SimilarityReport) -> JsonSimilarityReport {
    JsonSimilarityReport {
        overall_similarity: report.overall,
        similarity_level: report.level.as_str().to_string(),
        fingerprint_similarity: report.fingerprint,
        structural_similarity: report.structural,
        line_similarity: report.line,
        suspicious_segments: report
            .segments
            .into_iter()
            .map(|segment| JsonMatchingSegment {
                start_line_a: segment.start_line_a,
                start_line_b: segment.start_line_b,
                length: segment.len,
                segment_a: segment.text_a,
                segment_b: segment.text_b,
                similarity: segment.score,
            })
            .collect(),
    }
}

pub(crate) fn write_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::other(format!("json encode: {e}")))?;
    println!("{json}");
    Ok(())
}
