use std::collections::HashSet;

/// Jaccard overlap of the winnowed fingerprint sets of two token streams.
/// Either side winnowing down to nothing (including any input shorter than
/// `k` tokens) scores 0.0.
pub(crate) fn fingerprint_similarity(a: &[String], b: &[String], k: usize, w: usize) -> f64 {
    let fp_a: HashSet<u64> = winnow(&kgram_hashes(a, k), w).into_iter().collect();
    let fp_b: HashSet<u64> = winnow(&kgram_hashes(b, k), w).into_iter().collect();

    if fp_a.is_empty() || fp_b.is_empty() {
        return 0.0;
    }

    let intersection = fp_a.intersection(&fp_b).count();
    let union = fp_a.union(&fp_b).count();
    intersection as f64 / union as f64
}

pub(crate) fn kgram_hashes(tokens: &[String], k: usize) -> Vec<u64> {
    if k == 0 || tokens.len() < k {
        return Vec::new();
    }
    tokens
        .windows(k)
        .map(|kgram| fnv1a64(kgram.join(" ").as_bytes()))
        .collect()
}

/// Simplified winnowing: per window of `w` hashes, keep the minimum
/// (leftmost on ties), appending it only when it differs from the last
/// kept hash. Repeats of an earlier, non-adjacent selection are kept
/// again rather than suppressed. A hash list shorter than the window is
/// returned whole.
pub(crate) fn winnow(hashes: &[u64], w: usize) -> Vec<u64> {
    if hashes.is_empty() {
        return Vec::new();
    }
    if w == 0 || hashes.len() < w {
        return hashes.to_vec();
    }

    let mut out: Vec<u64> = Vec::new();
    for window in hashes.windows(w) {
        let mut min = window[0];
        for &hash in &window[1..] {
            if hash < min {
                min = hash;
            }
        }
        if out.last() != Some(&min) {
            out.push(min);
        }
    }
    out
}

pub(crate) fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    let mut hash = FNV_OFFSET_BASIS;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
