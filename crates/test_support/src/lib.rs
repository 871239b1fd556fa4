//! Shared helpers for the workspace's integration tests.

use std::fmt::Write;

const MISSING: &str = "<missing>";
const MAX_REPORTED: usize = 8;

/// Line-by-line report of where `actual` departs from `expected`.
///
/// Every differing line is listed (up to a fixed limit) as a `-`/`+` pair,
/// followed by the line counts of both sides.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    let max = expected.len().max(actual.len());
    let mismatches: Vec<usize> = (0..max)
        .filter(|&i| expected.get(i) != actual.get(i))
        .collect();

    let mut out = String::new();
    if let Some(first) = mismatches.first() {
        let _ = writeln!(
            &mut out,
            "{} differing lines, first at line {}:",
            mismatches.len(),
            first + 1
        );
    }
    for &i in mismatches.iter().take(MAX_REPORTED) {
        let left = expected.get(i).map(String::as_str).unwrap_or(MISSING);
        let right = actual.get(i).map(String::as_str).unwrap_or(MISSING);
        let _ = writeln!(&mut out, "{:>4} - {left}", i + 1);
        let _ = writeln!(&mut out, "{:>4} + {right}", i + 1);
    }
    if mismatches.len() > MAX_REPORTED {
        let _ = writeln!(&mut out, "... {} more", mismatches.len() - MAX_REPORTED);
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

/// Panics with a line diff unless `actual` equals `expected`.
pub fn assert_lines_eq(context: &str, expected: &[String], actual: &[String]) {
    if expected != actual {
        panic!("{context}: line mismatch\n{}", diff_lines(expected, actual));
    }
}

#[cfg(feature = "corpus")]
pub mod corpus;
