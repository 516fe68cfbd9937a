use crate::json::JsonSimilarityReport;

pub(crate) fn format_text_report(
    report: &JsonSimilarityReport,
    label_a: &str,
    label_b: &str,
) -> String {
    let mut out = String::new();

    out.push_str("== similarity ==\n");
    out.push_str(&format!(
        "overall={:.4} level={}\n",
        report.overall_similarity, report.similarity_level
    ));
    out.push_str(&format!(
        "fingerprint={:.4} structural={:.4} line={:.4}\n",
        report.fingerprint_similarity, report.structural_similarity, report.line_similarity
    ));
    out.push('\n');

    out.push_str("== suspicious segments ==\n");
    out.push_str(&format!("segments: {}\n", report.suspicious_segments.len()));

    for segment in &report.suspicious_segments {
        out.push('\n');
        out.push_str(&format!(
            "similarity={:.4} len={} {}:{}-{} <-> {}:{}-{}\n",
            segment.similarity,
            segment.length,
            label_a,
            segment.start_line_a,
            segment.start_line_a + segment.length - 1,
            label_b,
            segment.start_line_b,
            segment.start_line_b + segment.length - 1,
        ));
        for line in segment.segment_a.lines() {
            out.push_str(&format!("a| {line}\n"));
        }
        for line in segment.segment_b.lines() {
            out.push_str(&format!("b| {line}\n"));
        }
    }

    out.push('\n');
    out
}
