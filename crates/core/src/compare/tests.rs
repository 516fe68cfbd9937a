use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use super::*;
use crate::align::{MatchBlock, matching_blocks, similarity_ratio};
use crate::fingerprint::{fingerprint_similarity, winnow};
use crate::normalize::{collapse_whitespace, normalize, strip_comments};
use crate::structure::{control_similarity, extract_profile, multiset_similarity};

fn default_options() -> CompareOptions {
    CompareOptions::default()
}

fn tokens_of(code: &str) -> Vec<String> {
    normalize(code, &default_options()).tokens
}

fn words(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

#[test]
fn tokenize_canonicalizes_identifiers_in_first_seen_order() {
    let tokens = tokens_of("int add(int a, int b) { return a + b; }");
    assert_eq!(
        tokens,
        words("int ID_0 ( int ID_1 , int ID_2 ) { return ID_1 + ID_2 ; }")
    );
}

#[test]
fn tokenize_is_independent_per_input() {
    // Same shapes, different spellings: each side starts its own table at
    // ID_0, so the streams come out identical.
    let a = tokens_of("int add(int a, int b) { return a + b; }");
    let b = tokens_of("int sum(int x, int y) { return x + y; }");
    assert_eq!(a, b);
}

#[test]
fn tokenize_marks_numeric_and_string_literals() {
    let tokens = tokens_of("x = 3.14; s = \"hi \\\" there\"; c = 'q';");
    assert_eq!(
        tokens,
        words("ID_0 = NUM ; ID_1 = STR ; ID_2 = STR ;")
    );
}

#[test]
fn tokenize_handles_unterminated_string() {
    let tokens = tokens_of("printf(\"unclosed");
    assert_eq!(tokens, words("ID_0 ( STR"));
}

#[test]
fn tokenize_can_keep_identifiers_literal() {
    let options = CompareOptions {
        normalize_identifiers: false,
        ..CompareOptions::default()
    };
    let tokens = normalize("int foo = bar;", &options).tokens;
    assert_eq!(tokens, words("int foo = bar ;"));
}

#[test]
fn normalization_is_idempotent() {
    let options = default_options();
    let first = normalize("int x = 42; printf(\"hi %d\", x);", &options);
    let rendering = first.lines.join("\n");
    let second = normalize(&rendering, &options);
    assert_eq!(first.tokens, second.tokens);
}

#[test]
fn strip_comments_removes_block_and_line_spans() {
    let stripped = strip_comments("int a; // trailing\n/* block\nspan */int b;");
    assert_eq!(stripped, "int a; \nint b;");
}

#[test]
fn collapse_whitespace_tightens_punctuation() {
    assert_eq!(collapse_whitespace("a  +   b ;\n  next"), "a+b;\nnext");
}

#[test]
fn winnow_selects_window_minima_without_adjacent_repeats() {
    assert_eq!(winnow(&[5, 3, 4, 3, 6], 3), vec![3]);
}

#[test]
fn winnow_keeps_non_adjacent_repeats() {
    // 1 is selected, displaced by 2, then selected again: only adjacent
    // repeats are suppressed.
    assert_eq!(winnow(&[9, 1, 8, 7, 2, 7, 1, 9], 3), vec![1, 2, 1]);
}

#[test]
fn winnow_returns_short_hash_lists_whole() {
    assert_eq!(winnow(&[4, 2, 9], 5), vec![4, 2, 9]);
}

#[test]
fn fingerprint_identical_streams_is_one() {
    let tokens = words("a b c d e f g h");
    assert_eq!(fingerprint_similarity(&tokens, &tokens, 5, 10), 1.0);
}

#[test]
fn fingerprint_disjoint_streams_is_zero() {
    let a = words("a b c d e f");
    let b = words("u v w x y z");
    assert_eq!(fingerprint_similarity(&a, &b, 2, 2), 0.0);
}

#[test]
fn fingerprint_under_kgram_size_is_zero() {
    let short = words("a b c");
    let long = words("a b c d e f g h i j");
    assert_eq!(fingerprint_similarity(&short, &long, 5, 10), 0.0);
    assert_eq!(fingerprint_similarity(&long, &short, 5, 10), 0.0);
}

#[test]
fn extract_profile_counts_functions_classes_control() {
    let code = "int add(int a, int b) { return a + b; }\nclass Point { int x; };\nif (x) { y(); } else { z(); }";
    let profile = extract_profile(code);
    assert_eq!(profile.functions.get("add"), Some(&1));
    assert_eq!(profile.functions.len(), 1);
    assert_eq!(profile.classes.get("Point"), Some(&1));
    assert_eq!(profile.control.get("if"), Some(&1));
    assert_eq!(profile.control.get("else"), Some(&1));
    assert_eq!(profile.control.get("while"), Some(&0));
}

#[test]
fn multiset_similarity_empty_rules() {
    use std::collections::HashMap;

    let empty: HashMap<String, usize> = HashMap::new();
    let some: HashMap<String, usize> = [("f".to_string(), 1)].into_iter().collect();
    assert_eq!(multiset_similarity(&empty, &empty), 1.0);
    assert_eq!(multiset_similarity(&empty, &some), 0.0);
    assert_eq!(multiset_similarity(&some, &empty), 0.0);
}

#[test]
fn multiset_similarity_is_count_aware() {
    use std::collections::HashMap;

    let a: HashMap<String, usize> =
        [("f".to_string(), 2), ("g".to_string(), 1)].into_iter().collect();
    let b: HashMap<String, usize> =
        [("f".to_string(), 1), ("h".to_string(), 1)].into_iter().collect();
    // common = min(2,1) = 1; total = max(2,1) + 1 + 1 = 4
    assert_eq!(multiset_similarity(&a, &b), 0.25);
}

#[test]
fn control_similarity_rules() {
    use std::collections::HashMap;

    let empty: HashMap<&'static str, usize> = HashMap::new();
    assert_eq!(control_similarity(&empty, &empty), 1.0);

    let a: HashMap<&'static str, usize> = [("if", 2)].into_iter().collect();
    let b: HashMap<&'static str, usize> = [("if", 1)].into_iter().collect();
    assert_eq!(control_similarity(&a, &b), 0.5);
}

#[test]
fn matching_blocks_full_match() {
    let a = words("p q r s");
    assert_eq!(
        matching_blocks(&a, &a),
        vec![MatchBlock { a: 0, b: 0, len: 4 }]
    );
}

#[test]
fn matching_blocks_splits_around_gap() {
    let a = words("x y q z");
    let b = words("x y z");
    assert_eq!(
        matching_blocks(&a, &b),
        vec![
            MatchBlock { a: 0, b: 0, len: 2 },
            MatchBlock { a: 3, b: 2, len: 1 },
        ]
    );
}

#[test]
fn matching_blocks_empty_inputs() {
    let empty: Vec<String> = Vec::new();
    let some = words("x y");
    assert!(matching_blocks(&empty, &some).is_empty());
    assert!(matching_blocks(&some, &empty).is_empty());
}

#[test]
fn similarity_ratio_rules() {
    let empty: Vec<char> = Vec::new();
    assert_eq!(similarity_ratio(&empty, &empty), 1.0);

    let a: Vec<char> = "abcd".chars().collect();
    let b: Vec<char> = "bcd".chars().collect();
    let ratio = similarity_ratio(&a, &b);
    assert!((ratio - 6.0 / 7.0).abs() < 1e-12);
}

#[test]
fn level_thresholds_are_inclusive_lower_bounds() {
    assert_eq!(SimilarityLevel::from_score(0.8), SimilarityLevel::VeryHigh);
    assert_eq!(SimilarityLevel::from_score(0.6), SimilarityLevel::High);
    assert_eq!(SimilarityLevel::from_score(0.4), SimilarityLevel::Moderate);
    assert_eq!(SimilarityLevel::from_score(0.2), SimilarityLevel::Low);
    assert_eq!(SimilarityLevel::from_score(0.19), SimilarityLevel::VeryLow);
}

#[test]
fn identical_inputs_score_full_similarity() {
    let code = "int add(int a, int b) {\n    if (a > b) {\n        return a;\n    }\n    return b;\n}";
    let report = compare(code, code, &default_options()).expect("compare");

    assert_eq!(report.fingerprint, 1.0);
    assert!((report.structural - 1.0).abs() < 1e-12);
    assert_eq!(report.line, 1.0);
    assert!((report.overall - 1.0).abs() < 1e-12);
    assert_eq!(report.level, SimilarityLevel::VeryHigh);
}

#[test]
fn renamed_identifiers_still_match() {
    let code_a = "int add(int a,int b){return a+b;}";
    let code_b = "int sum(int x,int y){return x+y;}";
    let report = compare(code_a, code_b, &default_options()).expect("compare");

    // Canonicalization makes the token streams identical.
    assert!(report.fingerprint >= 0.7);
    // Function names differ (0.0), no classes on either side (1.0), no
    // control keywords on either side (1.0): 0.4*0 + 0.3 + 0.3.
    assert!((report.structural - 0.6).abs() < 1e-12);
    assert_eq!(report.line, 1.0);
    assert_eq!(report.level, SimilarityLevel::VeryHigh);
}

#[test]
fn comparison_is_symmetric() {
    let code_a = "if (x) {\n  y = 1;\n}\n";
    let code_b = "while (x) {\n  y = 1;\n  z = 2;\n}\n";
    let options = default_options();

    let forward = compare(code_a, code_b, &options).expect("compare");
    let backward = compare(code_b, code_a, &options).expect("compare");

    assert_eq!(forward.fingerprint, backward.fingerprint);
    assert_eq!(forward.structural, backward.structural);
    assert_eq!(forward.line, backward.line);
    assert_eq!(forward.overall, backward.overall);
    assert_eq!(forward.level, backward.level);
}

#[test]
fn blank_input_is_valid() {
    let report = compare("", "", &default_options()).expect("compare");
    assert_eq!(report.fingerprint, 0.0);
    assert!(report.segments.is_empty());
}

#[test]
fn disjoint_inputs_score_very_low() {
    let code_a = "int alpha(int q) {\nif (q) {\nreturn q;\n}\nreturn 0;\n}";
    let code_b = "y = 2;";
    let report = compare(code_a, code_b, &default_options()).expect("compare");

    assert_eq!(report.fingerprint, 0.0);
    assert_eq!(report.line, 0.0);
    assert!(report.overall < 0.2);
    assert_eq!(report.level, SimilarityLevel::VeryLow);
}

const REORDERED_A: &str = "int main ( ) {\nint a = 1;\nint b = 2;\nint c = 3;\nint d = 4;\na = a + 1;\nb = b + 2;\nc = c + 3;\nd = d + 4;\nprint(a);\nprint(b);\nprint(c);\nprint(d);\nreturn 0;\n}";

const REORDERED_B: &str = "int main ( ) {\nint a = 1;\nint b = 2;\nint c = 3;\nint d = 4;\nprint(a);\nprint(b);\nprint(c);\nprint(d);\na = a + 1;\nb = b + 2;\nc = c + 3;\nd = d + 4;\nreturn 0;\n}";

#[test]
fn reordered_block_yields_exact_segment() {
    let report = compare(REORDERED_A, REORDERED_B, &default_options()).expect("compare");

    assert!(
        report
            .segments
            .iter()
            .any(|segment| segment.len >= 4 && segment.score == 1.0),
        "expected an exact segment of at least 4 lines, got {:?}",
        report.segments
    );
    for segment in &report.segments {
        assert_eq!(segment.text_a, segment.text_b);
    }
}

#[test]
fn top_segments_truncates_ranked_list() {
    let options = CompareOptions {
        top_segments: 1,
        ..CompareOptions::default()
    };
    let report = compare(REORDERED_A, REORDERED_B, &options).expect("compare");
    assert_eq!(report.segments.len(), 1);
    assert_eq!(report.segments[0].score, 1.0);
}

#[test]
fn segment_lines_are_one_indexed() {
    let report = compare(REORDERED_A, REORDERED_B, &default_options()).expect("compare");
    let first = report
        .segments
        .iter()
        .min_by_key(|segment| segment.start_line_a)
        .expect("segments");
    assert_eq!(first.start_line_a, 1);
    assert_eq!(first.start_line_b, 1);
}

#[test]
fn comment_stripping_shifts_are_clamped() {
    let code_a = "/* c1\nc2\nc3 */\nint a = 1;\nint b = 2;\nint c = 3;\nint d = 4;\n";
    let code_b = "int a = 1;\nint b = 2;\nint c = 3;\nint d = 4;\n";
    let report = compare(code_a, code_b, &default_options()).expect("compare");

    // The block comment swallows two newlines, so normalized indices no
    // longer line up with the original text; mapping must stay in bounds.
    assert!(report.segments.iter().any(|segment| segment.len >= 4));
}

#[test]
fn comments_are_ignored_by_default() {
    let code_a = "int x = 1; // note\n";
    let code_b = "int x = 1;\n";
    let report = compare(code_a, code_b, &default_options()).expect("compare");
    assert_eq!(report.fingerprint, 1.0);
    assert_eq!(report.line, 1.0);
}

#[test]
fn kept_comments_lower_the_score() {
    let options = CompareOptions {
        ignore_comments: false,
        normalize_identifiers: false,
        ..CompareOptions::default()
    };
    let code_a = "int x = 1; // note\n";
    let code_b = "int x = 1;\n";
    let report = compare(code_a, code_b, &options).expect("compare");
    assert!(report.fingerprint < 1.0);
    assert!(report.line < 1.0);
}

#[test]
fn literal_identifiers_distinguish_renames() {
    let options = CompareOptions {
        normalize_identifiers: false,
        ..CompareOptions::default()
    };
    let code_a = "int foo = 1;";
    let code_b = "int bar = 1;";

    let literal = compare(code_a, code_b, &options).expect("compare");
    assert_eq!(literal.fingerprint, 0.0);

    let canonical = compare(code_a, code_b, &default_options()).expect("compare");
    assert_eq!(canonical.fingerprint, 1.0);
}

#[test]
fn invalid_options_are_rejected() {
    let options = CompareOptions {
        kgram_size: 0,
        ..CompareOptions::default()
    };
    let err = compare("a", "b", &options).expect_err("zero kgram_size");
    assert!(matches!(err, CompareError::InvalidOptions(_)));
}

#[test]
fn load_source_missing_file_is_not_found() {
    let path = temp_dir("missing").join("nope.cpp");
    let err = load_source(&path).expect_err("missing file");
    assert!(matches!(err, CompareError::NotFound { .. }));
}

#[test]
fn load_source_drops_undecodable_bytes() -> io::Result<()> {
    let root = temp_dir("lossy");
    fs::create_dir_all(&root)?;
    let path = root.join("a.cpp");
    fs::write(&path, b"int a\xff;\n")?;

    let text = load_source(&path).expect("load");
    assert_eq!(text, "int a;\n");
    Ok(())
}

#[test]
fn compare_files_reads_both_sources() -> io::Result<()> {
    let root = temp_dir("files");
    fs::create_dir_all(&root)?;
    let path_a = root.join("a.cpp");
    let path_b = root.join("b.cpp");
    let code = "int add(int a, int b) { return a + b; }\n";
    fs::write(&path_a, code)?;
    fs::write(&path_b, code)?;

    let report = compare_files(&path_a, &path_b, &default_options()).expect("compare");
    assert_eq!(report.level, SimilarityLevel::VeryHigh);
    Ok(())
}

fn temp_dir(suffix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!("code-sim-check-core-{suffix}-{nanos}"))
}
