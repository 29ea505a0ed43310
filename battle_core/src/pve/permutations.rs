//! Enumeration helpers for the rotation search

/// Distinct orderings of a multiset, in lexicographic order.
///
/// Starts from the sorted input and steps with the classic next-permutation
/// algorithm, so repeated elements never produce duplicate orderings.
#[derive(Debug, Clone)]
pub struct MultisetPermutations {
    current: Vec<usize>,
    done: bool,
}

impl MultisetPermutations {
    pub fn new(mut items: Vec<usize>) -> Self {
        items.sort_unstable();
        Self {
            current: items,
            done: false,
        }
    }
}

impl Iterator for MultisetPermutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.current.clone();
        self.done = !next_permutation(&mut self.current);
        Some(result)
    }
}

/// Advance `items` to the next lexicographic permutation; false when it was the last
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    // Rightmost ascent
    let Some(pivot) = (0..items.len() - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        return false;
    };
    let successor = (pivot + 1..items.len())
        .rev()
        .find(|&j| items[j] > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}

/// Every way to split `total` uses across `slots` moves, in lexicographic order
pub fn compositions(total: u32, slots: usize) -> Vec<Vec<u32>> {
    let mut out = Vec::new();
    if slots == 0 {
        return out;
    }
    let mut prefix = Vec::with_capacity(slots);
    extend_compositions(total, slots, &mut prefix, &mut out);
    out
}

fn extend_compositions(remaining: u32, slots: usize, prefix: &mut Vec<u32>, out: &mut Vec<Vec<u32>>) {
    if slots == 1 {
        prefix.push(remaining);
        out.push(prefix.clone());
        prefix.pop();
        return;
    }
    for count in 0..=remaining {
        prefix.push(count);
        extend_compositions(remaining - count, slots - 1, prefix, out);
        prefix.pop();
    }
}

/// Expand per-move counts into a sorted index list: `[2, 1]` becomes `[0, 0, 1]`
pub fn expand_counts(counts: &[u32]) -> Vec<usize> {
    counts
        .iter()
        .enumerate()
        .flat_map(|(index, &count)| std::iter::repeat(index).take(count as usize))
        .collect()
}
