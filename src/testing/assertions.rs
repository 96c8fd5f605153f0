//! Assertion functions for comparing rendered output.
//!
//! Parallel rendering places partition buffers into the output in completion
//! order, so two runs over the same records can interleave rows differently.
//! These helpers compare output at the row level instead of byte for byte.

use std::collections::HashMap;

/// Split rendered output into its non-empty rows.
///
/// Chunk boundaries and the trailing newline disappear; what remains is the
/// header row followed by one entry per rendered record.
///
/// # Example
///
/// ```
/// use rowmill::testing::rows_of;
///
/// let rows = rows_of("a,b\n1,2\n\n");
/// assert_eq!(rows, vec!["a,b".to_string(), "1,2".to_string()]);
/// ```
#[must_use]
pub fn rows_of(output: &str) -> Vec<String> {
    output
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Assert that two outputs contain the same rows, ignoring row order.
///
/// Rows are compared as a multiset, so repeated rows must repeat the same
/// number of times on both sides.
///
/// # Panics
///
/// Panics if any row appears a different number of times in the two outputs.
///
/// # Example
///
/// ```
/// use rowmill::testing::assert_same_rows;
///
/// assert_same_rows("h\n1\n2\n", "h\n2\n1\n");
/// ```
pub fn assert_same_rows(actual: &str, expected: &str) {
    let actual_rows = rows_of(actual);
    let expected_rows = rows_of(expected);

    let mut counts: HashMap<&str, i64> = HashMap::new();
    for row in &actual_rows {
        *counts.entry(row.as_str()).or_insert(0) += 1;
    }
    for row in &expected_rows {
        *counts.entry(row.as_str()).or_insert(0) -= 1;
    }

    let missing: Vec<&str> = counts
        .iter()
        .filter(|(_, n)| **n < 0)
        .map(|(row, _)| *row)
        .collect();
    let extra: Vec<&str> = counts
        .iter()
        .filter(|(_, n)| **n > 0)
        .map(|(row, _)| *row)
        .collect();

    assert!(
        missing.is_empty() && extra.is_empty(),
        "Row content mismatch:\n  Missing rows: {missing:?}\n  Extra rows: {extra:?}\n  Expected row count: {}\n  Actual row count: {}",
        expected_rows.len(),
        actual_rows.len()
    );
}

/// Assert that `output` starts with `header` and contains it exactly once.
///
/// # Panics
///
/// Panics if the first row differs from `header` or if the header row
/// repeats later in the output.
///
/// # Example
///
/// ```
/// use rowmill::testing::assert_header_once;
///
/// assert_header_once("a,b\n1,2\n3,4\n", "a,b");
/// ```
pub fn assert_header_once(output: &str, header: &str) {
    let rows = rows_of(output);
    assert_eq!(
        rows.first().map(String::as_str),
        Some(header),
        "Output does not start with the header:\n  Expected header: {header:?}\n  First row: {:?}",
        rows.first()
    );

    let occurrences = rows.iter().filter(|row| row.as_str() == header).count();
    assert_eq!(
        occurrences, 1,
        "Header row appears {occurrences} times:\n  Header: {header:?}"
    );
}
