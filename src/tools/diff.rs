//! In-process unified diff, for machines without a `diff` binary.

use std::path::Path;

use difference::{Changeset, Difference};

use super::{DiffOutcome, TextDiffer, ToolError};

/// Unchanged lines shown around each change, as `diff -u` does
pub const CONTEXT_LINES: usize = 3;

/// Diffs against the golden file without spawning a process
#[derive(Debug, Clone, Default)]
pub struct BuiltinDiff;

impl TextDiffer for BuiltinDiff {
    fn diff_text(&self, golden: &Path, actual: &str) -> Result<DiffOutcome, ToolError> {
        let expected = match std::fs::read_to_string(golden) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(DiffOutcome::Missing)
            }
            Err(source) => {
                return Err(ToolError::Io {
                    path: golden.to_path_buf(),
                    source,
                })
            }
        };

        if expected == actual {
            return Ok(DiffOutcome::Identical);
        }

        let label = golden.display().to_string();
        Ok(DiffOutcome::Differs(unified_diff(
            &label,
            "-",
            &expected,
            actual,
            CONTEXT_LINES,
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Same,
    Rem,
    Add,
}

/// One line of the edit script, with how many old/new lines precede it
struct Op<'a> {
    tag: Tag,
    text: &'a str,
    old_before: usize,
    new_before: usize,
}

/// Format a unified diff of `expected` → `actual`.
///
/// Returns an empty string when the texts are equal.
pub fn unified_diff(
    old_label: &str,
    new_label: &str,
    expected: &str,
    actual: &str,
    context: usize,
) -> String {
    if expected == actual {
        return String::new();
    }

    let changeset = Changeset::new(expected, actual, "\n");
    let ops = edit_script(&changeset.diffs);

    let mut out = format!("--- {}\n+++ {}\n", old_label, new_label);
    for (start, end) in hunk_ranges(&ops, context) {
        write_hunk(&mut out, &ops[start..end]);
    }
    out
}

fn edit_script(diffs: &[Difference]) -> Vec<Op<'_>> {
    let mut ops = Vec::new();
    let (mut old_before, mut new_before) = (0, 0);
    for diff in diffs {
        let (tag, chunk) = match diff {
            Difference::Same(x) => (Tag::Same, x),
            Difference::Rem(x) => (Tag::Rem, x),
            Difference::Add(x) => (Tag::Add, x),
        };
        for text in chunk.split('\n') {
            ops.push(Op {
                tag,
                text,
                old_before,
                new_before,
            });
            if tag != Tag::Add {
                old_before += 1;
            }
            if tag != Tag::Rem {
                new_before += 1;
            }
        }
    }
    ops
}

/// Half-open op ranges, one per hunk; changes closer than `2 * context`
/// unchanged lines share a hunk.
fn hunk_ranges(ops: &[Op<'_>], context: usize) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for (i, op) in ops.iter().enumerate() {
        if op.tag == Tag::Same {
            continue;
        }
        let start = i.saturating_sub(context);
        let end = (i + 1 + context).min(ops.len());
        match ranges.last_mut() {
            Some(last) if start <= last.1 => last.1 = end,
            _ => ranges.push((start, end)),
        }
    }
    ranges
}

fn write_hunk(out: &mut String, hunk: &[Op<'_>]) {
    let Some(first) = hunk.first() else {
        return;
    };
    let old_len = hunk.iter().filter(|op| op.tag != Tag::Add).count();
    let new_len = hunk.iter().filter(|op| op.tag != Tag::Rem).count();

    out.push_str(&format!(
        "@@ -{} +{} @@\n",
        range(first.old_before, old_len),
        range(first.new_before, new_len)
    ));
    for op in hunk {
        let marker = match op.tag {
            Tag::Same => ' ',
            Tag::Rem => '-',
            Tag::Add => '+',
        };
        out.push(marker);
        out.push_str(op.text);
        out.push('\n');
    }
}

/// `start,len` in diff's convention: 1-based, an empty range names the
/// line before it, and a length of one is left implicit.
fn range(before: usize, len: usize) -> String {
    match len {
        0 => format!("{},0", before),
        1 => format!("{}", before + 1),
        _ => format!("{},{}", before + 1, len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unified_diff_equal_is_empty() {
        assert_eq!(unified_diff("a", "b", "x\ny", "x\ny", 3), "");
    }

    #[test]
    fn test_unified_diff_single_change() {
        let diff = unified_diff(
            "foo.golden",
            "-",
            "(a\n  (b)\n  (c))",
            "(a\n  (b)\n  (d))",
            3,
        );
        assert_eq!(
            diff,
            "--- foo.golden\n+++ -\n@@ -1,3 +1,3 @@\n (a\n   (b)\n-  (c))\n+  (d))\n"
        );
    }

    #[test]
    fn test_unified_diff_splits_distant_hunks() {
        let expected: Vec<String> = (1..=20).map(|n| n.to_string()).collect();
        let mut actual = expected.clone();
        actual[1] = "two".to_string();
        actual[17] = "eighteen".to_string();

        let diff = unified_diff("old", "new", &expected.join("\n"), &actual.join("\n"), 3);
        let headers: Vec<&str> = diff.lines().filter(|l| l.starts_with("@@")).collect();
        assert_eq!(headers, vec!["@@ -1,5 +1,5 @@", "@@ -15,6 +15,6 @@"]);
    }

    #[test]
    fn test_unified_diff_pure_insertion() {
        let diff = unified_diff("old", "new", "", "(a)", 3);
        assert!(diff.contains("+(a)\n"), "diff: {}", diff);
    }

    #[test]
    fn test_range_format() {
        assert_eq!(range(0, 0), "0,0");
        assert_eq!(range(4, 1), "5");
        assert_eq!(range(4, 3), "5,3");
    }
}
