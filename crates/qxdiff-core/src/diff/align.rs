//! Array element alignment.
//!
//! Elements are aligned by longest common subsequence of their values.
//! Between two anchors, leftover elements are paired by position (reported
//! as value changes); whatever remains is one-sided, old elements first.
//! When both sides could be skipped without shortening the subsequence,
//! the element with the smaller JSON rendering is skipped, so swapping the
//! arrays mirrors the alignment.

use serde_json::Value;
use std::cmp::Ordering;

/// One aligned position, holding indices into the old and new arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Both(usize, usize),
    Old(usize),
    New(usize),
}

pub fn align(old: &[Value], new: &[Value]) -> Vec<Step> {
    let n = old.len();
    let m = new.len();

    // lcs[i][j] = length of the LCS of old[i..] and new[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut steps = Vec::with_capacity(n.max(m));
    let mut gap_old = Vec::new();
    let mut gap_new = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            flush_gap(&mut steps, &mut gap_old, &mut gap_new);
            steps.push(Step::Both(i, j));
            i += 1;
            j += 1;
        } else if skip_old(lcs[i + 1][j], lcs[i][j + 1], &old[i], &new[j]) {
            gap_old.push(i);
            i += 1;
        } else {
            gap_new.push(j);
            j += 1;
        }
    }
    gap_old.extend(i..n);
    gap_new.extend(j..m);
    flush_gap(&mut steps, &mut gap_old, &mut gap_new);
    steps
}

fn skip_old(without_old: usize, without_new: usize, old: &Value, new: &Value) -> bool {
    match without_old.cmp(&without_new) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => old.to_string() <= new.to_string(),
    }
}

fn flush_gap(steps: &mut Vec<Step>, gap_old: &mut Vec<usize>, gap_new: &mut Vec<usize>) {
    let paired = gap_old.len().min(gap_new.len());
    steps.extend((0..paired).map(|k| Step::Both(gap_old[k], gap_new[k])));
    steps.extend(gap_old[paired..].iter().map(|&i| Step::Old(i)));
    steps.extend(gap_new[paired..].iter().map(|&j| Step::New(j)));
    gap_old.clear();
    gap_new.clear();
}
