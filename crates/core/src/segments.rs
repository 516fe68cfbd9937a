use crate::align::{matching_blocks, similarity_ratio};
use crate::types::MatchingSegment;

/// Alignment ratio over the normalized line renderings of the two inputs.
pub(crate) fn line_similarity(lines_a: &[String], lines_b: &[String]) -> f64 {
    similarity_ratio(lines_a, lines_b)
}

/// Matching blocks of at least `min_len` normalized lines, mapped back
/// onto the original line arrays (clamped, since comment stripping can
/// shift line counts) and scored character-wise against the literal text.
pub(crate) fn extract_segments(
    code_a: &str,
    code_b: &str,
    normalized_a: &[String],
    normalized_b: &[String],
    min_len: usize,
    top: usize,
) -> Vec<MatchingSegment> {
    let original_a: Vec<&str> = code_a.split('\n').collect();
    let original_b: Vec<&str> = code_b.split('\n').collect();

    let mut segments: Vec<MatchingSegment> = Vec::new();
    for blk in matching_blocks(normalized_a, normalized_b) {
        if blk.len < min_len {
            continue;
        }

        let text_a = slice_lines(&original_a, blk.a, blk.len);
        let text_b = slice_lines(&original_b, blk.b, blk.len);

        let chars_a: Vec<char> = text_a.chars().collect();
        let chars_b: Vec<char> = text_b.chars().collect();
        let score = similarity_ratio(&chars_a, &chars_b);

        segments.push(MatchingSegment {
            start_line_a: blk.a + 1,
            start_line_b: blk.b + 1,
            len: blk.len,
            text_a,
            text_b,
            score,
        });
    }

    segments.sort_by(|x, y| {
        y.score
            .partial_cmp(&x.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    segments.truncate(top);
    segments
}

fn slice_lines(lines: &[&str], start: usize, len: usize) -> String {
    let end = (start + len).min(lines.len());
    let start = start.min(end);
    lines[start..end].join("\n")
}
