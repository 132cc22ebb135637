//! Line-based unified diff (Myers edit script, `diff -u` style hunks).

use std::iter;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Equal,
    Delete,
    Insert,
}

/// One edit step; `old`/`new` are the line positions in each input when the
/// step is applied.
#[derive(Debug, Clone, Copy)]
struct Step {
    kind: Kind,
    old: usize,
    new: usize,
}

/// Furthest-reaching x per diagonal k, indexed from `-max_d` to `max_d`.
struct Frontier {
    offset: isize,
    v: Vec<isize>,
}

impl Frontier {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            v: vec![0; 2 * max_d + 1],
        }
    }
}

impl Index<isize> for Frontier {
    type Output = isize;

    fn index(&self, k: isize) -> &isize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut isize {
        &mut self.v[(k + self.offset) as usize]
    }
}

fn shared_prefix(a: &[&str], b: &[&str]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn shared_suffix(a: &[&str], b: &[&str]) -> usize {
    a.iter().rev().zip(b.iter().rev()).take_while(|(x, y)| x == y).count()
}

/// Myers' middle snake: a point on some shortest edit path that splits both
/// inputs into strictly smaller halves. Inputs must be non-empty.
fn middle_snake(
    old: &[&str],
    new: &[&str],
    fwd: &mut Frontier,
    bwd: &mut Frontier,
) -> Option<(usize, usize)> {
    let n = old.len() as isize;
    let m = new.len() as isize;
    let delta = n - m;
    let odd = delta & 1 == 1;
    let d_max = (n + m + 1) / 2 + 1;

    // bwd works on the reversed inputs: bwd[k] counts lines consumed from the end
    fwd[1] = 0;
    bwd[1] = 0;
    for d in 0..d_max {
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && fwd[k - 1] < fwd[k + 1]) {
                fwd[k + 1]
            } else {
                fwd[k - 1] + 1
            };
            let y = x - k;
            let (x0, y0) = (x, y);
            if x < n && (0..m).contains(&y) {
                x += shared_prefix(&old[x as usize..], &new[y as usize..]) as isize;
            }
            fwd[k] = x;
            if odd && (k - delta).abs() < d && fwd[k] + bwd[delta - k] >= n {
                return split_point(x0, y0, n, m);
            }
        }

        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && bwd[k - 1] < bwd[k + 1]) {
                bwd[k + 1]
            } else {
                bwd[k - 1] + 1
            };
            let mut y = x - k;
            if x < n && (0..m).contains(&y) {
                let run = shared_suffix(&old[..(n - x) as usize], &new[..(m - y) as usize]);
                x += run as isize;
                y += run as isize;
            }
            bwd[k] = x;
            if !odd && (k - delta).abs() <= d && bwd[k] + fwd[delta - k] >= n {
                return split_point(n - x, m - y, n, m);
            }
        }
    }
    None
}

fn split_point(x: isize, y: isize, n: isize, m: isize) -> Option<(usize, usize)> {
    let inside = (0..=n).contains(&x) && (0..=m).contains(&y);
    let proper = (x, y) != (0, 0) && (x, y) != (n, m);
    (inside && proper).then(|| (x as usize, y as usize))
}

fn conquer(
    old: &[&str],
    new: &[&str],
    fwd: &mut Frontier,
    bwd: &mut Frontier,
    out: &mut Vec<Kind>,
) {
    let prefix = shared_prefix(old, new);
    out.extend(iter::repeat(Kind::Equal).take(prefix));
    let (old, new) = (&old[prefix..], &new[prefix..]);
    let suffix = shared_suffix(old, new);
    let (old, new) = (&old[..old.len() - suffix], &new[..new.len() - suffix]);

    let split = if old.is_empty() || new.is_empty() {
        None
    } else {
        middle_snake(old, new, fwd, bwd)
    };
    match split {
        Some((x, y)) => {
            conquer(&old[..x], &new[..y], fwd, bwd, out);
            conquer(&old[x..], &new[y..], fwd, bwd, out);
        }
        None => {
            out.extend(iter::repeat(Kind::Delete).take(old.len()));
            out.extend(iter::repeat(Kind::Insert).take(new.len()));
        }
    }
    out.extend(iter::repeat(Kind::Equal).take(suffix));
}

/// Shortest edit script in linear space. Within each run of changes the
/// deletions come before the insertions.
fn edit_script(old: &[&str], new: &[&str]) -> Vec<Step> {
    let max_d = (old.len() + new.len() + 1) / 2 + 1;
    let mut fwd = Frontier::new(max_d);
    let mut bwd = Frontier::new(max_d);
    let mut kinds = Vec::with_capacity(old.len() + new.len());
    conquer(old, new, &mut fwd, &mut bwd, &mut kinds);

    let mut steps = Vec::with_capacity(kinds.len());
    let (mut i, mut j) = (0, 0);
    let mut idx = 0;
    while idx < kinds.len() {
        if kinds[idx] == Kind::Equal {
            steps.push(Step { kind: Kind::Equal, old: i, new: j });
            i += 1;
            j += 1;
            idx += 1;
            continue;
        }
        let end = kinds[idx..]
            .iter()
            .position(|k| *k == Kind::Equal)
            .map_or(kinds.len(), |p| idx + p);
        let deletes = kinds[idx..end].iter().filter(|k| **k == Kind::Delete).count();
        for _ in 0..deletes {
            steps.push(Step { kind: Kind::Delete, old: i, new: j });
            i += 1;
        }
        for _ in deletes..end - idx {
            steps.push(Step { kind: Kind::Insert, old: i, new: j });
            j += 1;
        }
        idx = end;
    }
    steps
}

/// Ranges of `steps` that make up each hunk.
fn hunk_ranges(steps: &[Step], context: usize) -> Vec<(usize, usize)> {
    let changes: Vec<usize> = steps
        .iter()
        .enumerate()
        .filter(|(_, s)| s.kind != Kind::Equal)
        .map(|(idx, _)| idx)
        .collect();

    let mut ranges = Vec::new();
    let Some(&first) = changes.first() else {
        return ranges;
    };

    let mut start = first.saturating_sub(context);
    let mut last = first;
    for &change in &changes[1..] {
        if change - last - 1 > 2 * context {
            ranges.push((start, (last + 1 + context).min(steps.len())));
            start = change.saturating_sub(context);
        }
        last = change;
    }
    ranges.push((start, (last + 1 + context).min(steps.len())));
    ranges
}

fn format_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{start},0"),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, len),
    }
}

/// Unified diff of two line sequences. Empty when they are identical.
pub(crate) fn unified_diff(
    old: &[&str],
    new: &[&str],
    from: &str,
    to: &str,
    context: usize,
) -> Vec<String> {
    let steps = edit_script(old, new);
    let ranges = hunk_ranges(&steps, context);
    if ranges.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![format!("--- {from}"), format!("+++ {to}")];
    for (start, end) in ranges {
        let hunk = &steps[start..end];
        let old_len = hunk.iter().filter(|s| s.kind != Kind::Insert).count();
        let new_len = hunk.iter().filter(|s| s.kind != Kind::Delete).count();
        lines.push(format!(
            "@@ -{} +{} @@",
            format_range(hunk[0].old, old_len),
            format_range(hunk[0].new, new_len)
        ));
        for step in hunk {
            lines.push(match step.kind {
                Kind::Equal => format!(" {}", old[step.old]),
                Kind::Delete => format!("-{}", old[step.old]),
                Kind::Insert => format!("+{}", new[step.new]),
            });
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_inputs_have_no_diff() {
        let a = ["x", "y"];
        assert!(unified_diff(&a, &a, "a", "b", 3).is_empty());
    }

    #[test]
    fn test_single_change() {
        let old = ["one", "two", "three"];
        let new = ["one", "2", "three"];
        let diff = unified_diff(&old, &new, "a.txt", "b.txt", 3);
        assert_eq!(
            diff,
            vec!["--- a.txt", "+++ b.txt", "@@ -1,3 +1,3 @@", " one", "-two", "+2", " three"]
        );
    }

    #[test]
    fn test_append_to_empty() {
        let old: [&str; 0] = [];
        let new = ["hello"];
        let diff = unified_diff(&old, &new, "a", "b", 3);
        assert_eq!(diff, vec!["--- a", "+++ b", "@@ -0,0 +1 @@", "+hello"]);
    }

    #[test]
    fn test_distant_changes_make_separate_hunks() {
        let old: Vec<String> = (1..=20).map(|n| n.to_string()).collect();
        let mut new = old.clone();
        new[1] = "two".to_string();
        new[18] = "nineteen".to_string();
        let old: Vec<&str> = old.iter().map(String::as_str).collect();
        let new: Vec<&str> = new.iter().map(String::as_str).collect();

        let diff = unified_diff(&old, &new, "a", "b", 3);
        let headers: Vec<&String> = diff.iter().filter(|l| l.starts_with("@@")).collect();
        assert_eq!(headers, vec!["@@ -1,5 +1,5 @@", "@@ -16,5 +16,5 @@"]);
    }

    #[test]
    fn test_interleaved_changes_list_deletions_first() {
        let old = ["a", "b", "c", "d"];
        let new = ["x", "b", "y", "z"];
        let diff = unified_diff(&old, &new, "a", "b", 3);
        assert_eq!(
            diff[2..],
            ["@@ -1,4 +1,4 @@", "-a", "+x", " b", "-c", "-d", "+y", "+z"]
        );
    }

    #[test]
    fn test_large_inputs() {
        let old: Vec<String> = (1..=20_000).map(|n| format!("line {n}")).collect();
        let mut new = old.clone();
        new[9_999] = "changed".to_string();
        new.push("tail".to_string());
        let old: Vec<&str> = old.iter().map(String::as_str).collect();
        let new: Vec<&str> = new.iter().map(String::as_str).collect();

        let diff = unified_diff(&old, &new, "a", "b", 3);
        let headers: Vec<&String> = diff.iter().filter(|l| l.starts_with("@@")).collect();
        assert_eq!(headers, vec!["@@ -9997,7 +9997,7 @@", "@@ -19998,3 +19998,4 @@"]);
        assert!(diff.contains(&"-line 10000".to_string()));
        assert!(diff.contains(&"+changed".to_string()));
        assert_eq!(diff.last().map(String::as_str), Some("+tail"));
    }

    #[test]
    fn test_unrelated_inputs() {
        let old: Vec<String> = (0..2_000).map(|n| format!("old {n}")).collect();
        let new: Vec<String> = (0..1_500).map(|n| format!("new {n}")).collect();
        let old: Vec<&str> = old.iter().map(String::as_str).collect();
        let new: Vec<&str> = new.iter().map(String::as_str).collect();

        let diff = unified_diff(&old, &new, "a", "b", 3);
        assert_eq!(diff[2], "@@ -1,2000 +1,1500 @@");
        assert_eq!(diff.len(), 3 + 2_000 + 1_500);
    }
}
