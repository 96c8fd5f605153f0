//! Pre-built record types and sample data for rendering tests.
//!
//! The report family exercises every field shape at once: scalars, a wide
//! scalar sequence, a sequence of nested records, and a nested record that
//! flattens into its parent row. Display orders run 1 through 12 across the
//! three types with no collisions, so one `Report` row carries 12 cells.

use crate::field::{ColumnMeta, Field};
use crate::record::Record;

/// Top-level report with one field of every shape.
#[derive(Clone, Debug)]
pub struct Report {
    pub a: i32,
    pub b: String,
    pub c: Vec<String>,
    pub subreports: Vec<SubReport>,
    pub sub_report: SubReport,
}

/// Mid-level report, nested both as a sequence and as a single record.
#[derive(Clone, Debug)]
pub struct SubReport {
    pub c: Vec<String>,
    pub adr: i32,
    pub sub_sub: SubSubReport,
}

/// Innermost report; reuses column names from the other levels on purpose.
#[derive(Clone, Debug)]
pub struct SubSubReport {
    pub a: i32,
    pub b: String,
    pub c: Vec<String>,
    pub a1: i32,
    pub b1: String,
    pub c1: Vec<String>,
}

impl Record for Report {
    fn fields() -> Vec<Field> {
        vec![
            Field::scalar(ColumnMeta::new(1, "Hello"), |r: &Report| r.a),
            Field::scalar(ColumnMeta::new(2, "World"), |r: &Report| r.b.clone()),
            Field::array(ColumnMeta::new(3, "Cool").with_width(13), |r: &Report| {
                r.c.as_slice()
            }),
            Field::table(ColumnMeta::new(4, "ASA"), |r: &Report| {
                r.subreports.as_slice()
            }),
            Field::nested(|r: &Report| &r.sub_report),
        ]
    }
}

impl Record for SubReport {
    fn fields() -> Vec<Field> {
        vec![
            Field::array(ColumnMeta::new(5, "Cool2").with_width(13), |r: &SubReport| {
                r.c.as_slice()
            }),
            Field::scalar(ColumnMeta::new(6, "Cool2"), |r: &SubReport| r.adr),
            Field::nested(|r: &SubReport| &r.sub_sub),
        ]
    }
}

impl Record for SubSubReport {
    fn fields() -> Vec<Field> {
        vec![
            Field::scalar(ColumnMeta::new(7, "Hello"), |r: &SubSubReport| r.a),
            Field::scalar(ColumnMeta::new(8, "World"), |r: &SubSubReport| r.b.clone()),
            Field::array(
                ColumnMeta::new(9, "Cool").with_width(13),
                |r: &SubSubReport| r.c.as_slice(),
            ),
            Field::scalar(ColumnMeta::new(10, "Hello"), |r: &SubSubReport| r.a1),
            Field::scalar(ColumnMeta::new(11, "World"), |r: &SubSubReport| r.b1.clone()),
            Field::array(
                ColumnMeta::new(12, "Cool").with_width(13),
                |r: &SubSubReport| r.c1.as_slice(),
            ),
        ]
    }
}

/// The thirteen letters `A` through `M`, matching the declared widths.
///
/// # Example
///
/// ```
/// use rowmill::testing::letters;
///
/// assert_eq!(letters().len(), 13);
/// ```
#[must_use]
pub fn letters() -> Vec<String> {
    ('A'..='M').map(|c| c.to_string()).collect()
}

/// One fully populated report.
///
/// Shapes mirror a production payload: the `i` parameter feeds every
/// varying cell, the two `subreports` entries share their nested record,
/// and `sub_report.adr` differs from the sequence entries.
///
/// # Example
///
/// ```
/// use rowmill::testing::sample_report;
///
/// let report = sample_report(7);
/// assert_eq!(report.sub_report.adr, 35);
/// assert_eq!(report.subreports.len(), 2);
/// ```
#[must_use]
pub fn sample_report(i: i32) -> Report {
    let letters = letters();
    let sub_sub = SubSubReport {
        a: i,
        b: format!("string{i}"),
        c: letters.clone(),
        a1: i,
        b1: format!("string{i}"),
        c1: letters.clone(),
    };
    Report {
        a: 32,
        b: format!("string{i}"),
        c: letters.clone(),
        subreports: vec![
            SubReport {
                c: letters.clone(),
                adr: 34,
                sub_sub: sub_sub.clone(),
            },
            SubReport {
                c: letters.clone(),
                adr: 34,
                sub_sub: sub_sub.clone(),
            },
        ],
        sub_report: SubReport {
            c: letters,
            adr: 35,
            sub_sub,
        },
    }
}

/// `n` sample reports with distinct varying cells.
///
/// # Example
///
/// ```
/// use rowmill::testing::sample_reports;
///
/// let reports = sample_reports(4);
/// assert_eq!(reports.len(), 4);
/// assert_eq!(reports[3].b, "string3");
/// ```
#[must_use]
pub fn sample_reports(n: usize) -> Vec<Report> {
    (0..n).map(|i| sample_report(i as i32)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        let l = letters();
        assert_eq!(l.len(), 13);
        assert_eq!(l.first().map(String::as_str), Some("A"));
        assert_eq!(l.last().map(String::as_str), Some("M"));
    }

    #[test]
    fn test_sample_report_shape() {
        let report = sample_report(0);
        assert_eq!(report.a, 32);
        assert_eq!(report.subreports.len(), 2);
        assert_eq!(report.subreports[0].adr, 34);
        assert_eq!(report.sub_report.adr, 35);
    }

    #[test]
    fn test_sample_reports_vary() {
        let reports = sample_reports(3);
        assert_eq!(reports[0].b, "string0");
        assert_eq!(reports[2].sub_report.sub_sub.a, 2);
    }
}
