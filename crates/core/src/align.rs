use std::collections::HashMap;
use std::hash::Hash;

/// One contiguous run common to both sequences: start index in each plus
/// its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MatchBlock {
    pub(crate) a: usize,
    pub(crate) b: usize,
    pub(crate) len: usize,
}

/// Longest-matching-block decomposition: repeatedly take the longest
/// common contiguous run, then recurse into the regions left and right of
/// it. Returned blocks are sorted by position with adjacent runs merged.
pub(crate) fn matching_blocks<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<MatchBlock> {
    let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
    for (j, item) in b.iter().enumerate() {
        b2j.entry(item).or_default().push(j);
    }

    let mut queue: Vec<(usize, usize, usize, usize)> = vec![(0, a.len(), 0, b.len())];
    let mut blocks: Vec<MatchBlock> = Vec::new();

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let found = find_longest_match(a, &b2j, alo, ahi, blo, bhi);
        if found.len == 0 {
            continue;
        }
        blocks.push(found);
        if alo < found.a && blo < found.b {
            queue.push((alo, found.a, blo, found.b));
        }
        if found.a + found.len < ahi && found.b + found.len < bhi {
            queue.push((found.a + found.len, ahi, found.b + found.len, bhi));
        }
    }

    blocks.sort_by_key(|blk| (blk.a, blk.b));

    let mut merged: Vec<MatchBlock> = Vec::new();
    for blk in blocks {
        if let Some(last) = merged.last_mut()
            && last.a + last.len == blk.a
            && last.b + last.len == blk.b
        {
            last.len += blk.len;
            continue;
        }
        merged.push(blk);
    }
    merged
}

/// `2M / (lenA + lenB)` where `M` is the total matched length; 1.0 when
/// both sequences are empty.
pub(crate) fn similarity_ratio<T: Eq + Hash>(a: &[T], b: &[T]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let matched: usize = matching_blocks(a, b).iter().map(|blk| blk.len).sum();
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

fn find_longest_match<T: Eq + Hash>(
    a: &[T],
    b2j: &HashMap<&T, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchBlock {
    let mut best = MatchBlock {
        a: alo,
        b: blo,
        len: 0,
    };
    // j2len[j] = length of the longest run ending at (i - 1, j - 1).
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut next_j2len: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let run = if j > blo {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                next_j2len.insert(j, run);
                if run > best.len {
                    best = MatchBlock {
                        a: i + 1 - run,
                        b: j + 1 - run,
                        len: run,
                    };
                }
            }
        }
        j2len = next_j2len;
    }

    best
}
