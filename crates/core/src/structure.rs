use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const CONTROL_KEYWORDS: [&str; 6] = ["if", "else", "for", "while", "switch", "case"];

// Greedy non-nested body matching: `[^}]*` stops at the first closing
// brace, so nested blocks truncate the matched body. A depth-counting
// scanner would delimit nested bodies correctly; counts stay usable as a
// coarse profile either way.
static FUNCTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+\s+(\w+)\s*\([^)]*\)\s*\{[^}]*\}").expect("function pattern"));

static CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"class\s+(\w+)[^{]*\{[^}]*\}").expect("class pattern"));

static CONTROL_RES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    CONTROL_KEYWORDS
        .iter()
        .map(|kw| {
            (
                *kw,
                Regex::new(&format!(r"\b{kw}\b")).expect("control pattern"),
            )
        })
        .collect()
});

/// Coarse shape of one input: function/class name multisets plus
/// control-keyword counts. Extracted from the original text so names stay
/// literal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct StructuralProfile {
    pub(crate) functions: HashMap<String, usize>,
    pub(crate) classes: HashMap<String, usize>,
    pub(crate) control: HashMap<&'static str, usize>,
}

pub(crate) fn extract_profile(code: &str) -> StructuralProfile {
    let mut profile = StructuralProfile::default();

    for caps in FUNCTION_RE.captures_iter(code) {
        *profile.functions.entry(caps[1].to_string()).or_insert(0) += 1;
    }
    for caps in CLASS_RE.captures_iter(code) {
        *profile.classes.entry(caps[1].to_string()).or_insert(0) += 1;
    }
    for (kw, re) in CONTROL_RES.iter() {
        profile.control.insert(*kw, re.find_iter(code).count());
    }

    profile
}

pub(crate) fn structural_similarity(code_a: &str, code_b: &str) -> f64 {
    let profile_a = extract_profile(code_a);
    let profile_b = extract_profile(code_b);

    let function_sim = multiset_similarity(&profile_a.functions, &profile_b.functions);
    let class_sim = multiset_similarity(&profile_a.classes, &profile_b.classes);
    let control_sim = control_similarity(&profile_a.control, &profile_b.control);

    0.4 * function_sim + 0.3 * class_sim + 0.3 * control_sim
}

/// Count-aware intersection over union. Both multisets empty is a perfect
/// match; exactly one empty is a total mismatch.
pub(crate) fn multiset_similarity(
    a: &HashMap<String, usize>,
    b: &HashMap<String, usize>,
) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut common = 0usize;
    let mut total = 0usize;
    for (name, &count_a) in a {
        let count_b = b.get(name).copied().unwrap_or(0);
        common += count_a.min(count_b);
        total += count_a.max(count_b);
    }
    for (name, &count_b) in b {
        if !a.contains_key(name) {
            total += count_b;
        }
    }

    if total == 0 {
        0.0
    } else {
        common as f64 / total as f64
    }
}

/// `1 - Σ|c_a - c_b| / Σ max(c_a, c_b)` over the control keyword set;
/// 1.0 when neither input uses any control keyword.
pub(crate) fn control_similarity(
    a: &HashMap<&'static str, usize>,
    b: &HashMap<&'static str, usize>,
) -> f64 {
    let mut differences = 0usize;
    let mut max_possible = 0usize;
    for kw in CONTROL_KEYWORDS {
        let count_a = a.get(kw).copied().unwrap_or(0);
        let count_b = b.get(kw).copied().unwrap_or(0);
        differences += count_a.abs_diff(count_b);
        max_possible += count_a.max(count_b);
    }

    if max_possible == 0 {
        1.0
    } else {
        1.0 - differences as f64 / max_possible as f64
    }
}
