//! Read-only aggregations over a filtered set of loan records.
//!
//! Every function here is total: an empty input produces zeros or empty
//! series, and percentages never divide by zero. Null loan amounts count as
//! zero everywhere.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;

use super::model::LoanRecord;

/// Number of rows shown in the preview table.
pub const PREVIEW_ROWS: usize = 8;

/// Sum of loan amounts.
pub fn total_amount(rows: &[&LoanRecord]) -> f64 {
    rows.iter().map(|r| r.amount_or_zero()).sum()
}

/// Number of rows. Repeated borrowers are counted once per loan.
pub fn borrower_count(rows: &[&LoanRecord]) -> usize {
    rows.len()
}

// ---------------------------------------------------------------------------
// Status distribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct StatusShare {
    pub status: String,
    pub amount: f64,
    /// Share of the grand total in percent (0 when the total is 0).
    pub percentage: f64,
}

/// Loan amount per status with its share of the total, ordered by status.
/// Rows with a blank status are left out of both the groups and the total.
pub fn status_distribution(rows: &[&LoanRecord]) -> Vec<StatusShare> {
    let mut amounts: BTreeMap<&str, f64> = BTreeMap::new();
    for rec in rows.iter().filter(|r| !r.loan_status.is_empty()) {
        *amounts.entry(rec.loan_status.as_str()).or_insert(0.0) += rec.amount_or_zero();
    }

    let total: f64 = amounts.values().sum();
    amounts
        .into_iter()
        .map(|(status, amount)| StatusShare {
            status: status.to_string(),
            amount,
            percentage: if total == 0.0 {
                0.0
            } else {
                100.0 * amount / total
            },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Yearly trend
// ---------------------------------------------------------------------------

/// `(year, total)` pairs ascending by year. Rows without a date are skipped.
pub fn yearly_trend(rows: &[&LoanRecord]) -> Vec<(i32, f64)> {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for rec in rows {
        if let Some(date) = rec.date {
            *by_year.entry(date.year()).or_insert(0.0) += rec.amount_or_zero();
        }
    }
    by_year.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Branch × status pivot
// ---------------------------------------------------------------------------

/// Pivot of summed amounts: one row per branch, one column per status.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BranchStatusBreakdown {
    /// Branches present in the rows, ascending.
    pub branches: Vec<String>,
    /// Statuses present in the rows, ascending.
    pub statuses: Vec<String>,
    /// `cells[b][s]` is the total for `branches[b]` and `statuses[s]`.
    pub cells: Vec<Vec<f64>>,
}

impl BranchStatusBreakdown {
    /// Cell lookup by name; unknown pairs are 0.
    #[cfg(test)]
    pub fn get(&self, branch: &str, status: &str) -> f64 {
        let b = self.branches.iter().position(|x| x == branch);
        let s = self.statuses.iter().position(|x| x == status);
        match (b, s) {
            (Some(b), Some(s)) => self.cells[b][s],
            _ => 0.0,
        }
    }

    /// One column of the pivot (a stacked-bar layer).
    pub fn status_column(&self, s: usize) -> Vec<f64> {
        self.cells.iter().map(|row| row[s]).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

/// Sum amounts per (branch, status) and fill missing pairs with 0.
/// Rows missing either key are skipped.
pub fn branch_status_breakdown(rows: &[&LoanRecord]) -> BranchStatusBreakdown {
    let mut sums: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    let mut branches: BTreeSet<&str> = BTreeSet::new();
    let mut statuses: BTreeSet<&str> = BTreeSet::new();

    for rec in rows
        .iter()
        .filter(|r| !r.branch.is_empty() && !r.loan_status.is_empty())
    {
        branches.insert(&rec.branch);
        statuses.insert(&rec.loan_status);
        *sums
            .entry((rec.branch.as_str(), rec.loan_status.as_str()))
            .or_insert(0.0) += rec.amount_or_zero();
    }

    let cells = branches
        .iter()
        .map(|b| {
            statuses
                .iter()
                .map(|s| sums.get(&(*b, *s)).copied().unwrap_or(0.0))
                .collect()
        })
        .collect();

    BranchStatusBreakdown {
        branches: branches.into_iter().map(String::from).collect(),
        statuses: statuses.into_iter().map(String::from).collect(),
        cells,
    }
}

/// The first [`PREVIEW_ROWS`] rows, in order.
pub fn preview<'a>(rows: &[&'a LoanRecord]) -> Vec<&'a LoanRecord> {
    rows.iter().take(PREVIEW_ROWS).copied().collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::filter::{FilterCriteria, filter};
    use crate::data::model::LoanTable;

    fn rec(
        borrower: &str,
        branch: &str,
        date: Option<(i32, u32, u32)>,
        amount: Option<f64>,
        status: &str,
    ) -> LoanRecord {
        LoanRecord {
            borrower: borrower.into(),
            branch: branch.into(),
            date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            loan_amount: amount,
            interest_rate: Some(5.0),
            tenor: Some(12.0),
            loan_status: status.into(),
        }
    }

    fn two_records() -> LoanTable {
        LoanTable::from_records(vec![
            rec("A", "X", Some((2023, 1, 1)), Some(100.0), "Current"),
            rec("B", "Y", Some((2022, 6, 1)), Some(200.0), "Defaulted"),
        ])
    }

    #[test]
    fn branch_filter_scenario() {
        let table = two_records();
        let rows = filter(&table, &FilterCriteria::from_inputs("X", "All", "All"));

        assert_eq!(total_amount(&rows), 100.0);
        assert_eq!(borrower_count(&rows), 1);
        assert_eq!(
            status_distribution(&rows),
            vec![StatusShare {
                status: "Current".into(),
                amount: 100.0,
                percentage: 100.0,
            }]
        );
        assert_eq!(yearly_trend(&rows), vec![(2023, 100.0)]);

        let pivot = branch_status_breakdown(&rows);
        assert_eq!(pivot.branches, vec!["X"]);
        assert_eq!(pivot.statuses, vec!["Current"]);
        assert_eq!(pivot.get("X", "Current"), 100.0);
    }

    #[test]
    fn null_amount_counts_as_zero() {
        let table = LoanTable::from_records(vec![
            rec("A", "X", Some((2023, 1, 1)), None, "Current"),
            rec("B", "X", Some((2023, 2, 1)), Some(50.0), "Current"),
        ]);
        let rows: Vec<&LoanRecord> = table.records.iter().collect();
        assert_eq!(total_amount(&rows), 50.0);
        assert_eq!(borrower_count(&rows), 2);
    }

    #[test]
    fn empty_rows_degrade_to_zero() {
        let rows: Vec<&LoanRecord> = Vec::new();
        assert_eq!(total_amount(&rows), 0.0);
        assert_eq!(borrower_count(&rows), 0);
        assert!(status_distribution(&rows).is_empty());
        assert!(yearly_trend(&rows).is_empty());
        assert!(branch_status_breakdown(&rows).is_empty());
        assert!(preview(&rows).is_empty());
    }

    #[test]
    fn count_is_rows_not_distinct_borrowers() {
        let table = LoanTable::from_records(vec![
            rec("A", "X", None, Some(1.0), "Current"),
            rec("A", "X", None, Some(1.0), "Current"),
            rec("A", "Y", None, Some(1.0), "PaidOff"),
        ]);
        let rows: Vec<&LoanRecord> = table.records.iter().collect();
        assert_eq!(borrower_count(&rows), 3);
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let table = LoanTable::from_records(vec![
            rec("A", "X", None, Some(300.0), "PaidOff"),
            rec("B", "X", None, Some(100.0), "Current"),
            rec("C", "Y", None, Some(600.0), "Defaulted"),
            rec("D", "Y", None, Some(0.0), "Current"),
        ]);
        let rows: Vec<&LoanRecord> = table.records.iter().collect();
        let dist = status_distribution(&rows);

        let statuses: Vec<&str> = dist.iter().map(|s| s.status.as_str()).collect();
        assert_eq!(statuses, vec!["Current", "Defaulted", "PaidOff"]);
        assert_eq!(dist[0].amount, 100.0);
        assert!((dist[1].percentage - 60.0).abs() < 1e-9);
        let sum: f64 = dist.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_total_gives_zero_percentages() {
        let table = LoanTable::from_records(vec![
            rec("A", "X", None, None, "Current"),
            rec("B", "X", None, Some(0.0), "Defaulted"),
        ]);
        let rows: Vec<&LoanRecord> = table.records.iter().collect();
        let dist = status_distribution(&rows);
        assert_eq!(dist.len(), 2);
        assert!(dist.iter().all(|s| s.percentage == 0.0 && s.amount == 0.0));
    }

    #[test]
    fn trend_skips_null_dates_and_sorts_years() {
        let table = LoanTable::from_records(vec![
            rec("A", "X", Some((2024, 3, 1)), Some(10.0), "Current"),
            rec("B", "X", None, Some(1000.0), "Current"),
            rec("C", "X", Some((2021, 1, 9)), Some(5.0), "Current"),
            rec("D", "X", Some((2024, 12, 31)), Some(2.5), "Current"),
            rec("E", "X", Some((2021, 7, 1)), None, "Current"),
        ]);
        let rows: Vec<&LoanRecord> = table.records.iter().collect();
        assert_eq!(yearly_trend(&rows), vec![(2021, 5.0), (2024, 12.5)]);
    }

    #[test]
    fn pivot_fills_missing_pairs_with_zero() {
        let table = LoanTable::from_records(vec![
            rec("A", "South", None, Some(10.0), "Current"),
            rec("B", "North", None, Some(20.0), "Defaulted"),
            rec("C", "North", None, Some(5.0), "Defaulted"),
            rec("D", "South", None, None, "PaidOff"),
        ]);
        let rows: Vec<&LoanRecord> = table.records.iter().collect();
        let pivot = branch_status_breakdown(&rows);

        assert_eq!(pivot.branches, vec!["North", "South"]);
        assert_eq!(pivot.statuses, vec!["Current", "Defaulted", "PaidOff"]);
        assert_eq!(pivot.cells, vec![vec![0.0, 25.0, 0.0], vec![10.0, 0.0, 0.0]]);
        assert_eq!(pivot.get("North", "Current"), 0.0);
        assert_eq!(pivot.get("Nowhere", "Current"), 0.0);
        assert_eq!(pivot.status_column(1), vec![25.0, 0.0]);
    }

    #[test]
    fn blank_keys_are_not_groups() {
        let table = LoanTable::from_records(vec![
            rec("A", "X", None, Some(100.0), "Current"),
            rec("B", "X", None, Some(300.0), ""),
            rec("C", "", None, Some(50.0), "Current"),
        ]);
        let rows: Vec<&LoanRecord> = table.records.iter().collect();

        let dist = status_distribution(&rows);
        assert_eq!(dist.len(), 1);
        assert_eq!(dist[0].status, "Current");
        assert_eq!(dist[0].amount, 150.0);
        assert_eq!(dist[0].percentage, 100.0);

        let pivot = branch_status_breakdown(&rows);
        assert_eq!(pivot.branches, vec!["X"]);
        assert_eq!(pivot.statuses, vec!["Current"]);
        assert_eq!(pivot.cells, vec![vec![100.0]]);

        // The card total still includes every row.
        assert_eq!(total_amount(&rows), 450.0);
    }

    #[test]
    fn preview_is_capped_and_ordered() {
        let records: Vec<LoanRecord> = (0..1200)
            .map(|i| rec(&format!("B{i}"), "X", None, Some(i as f64), "Current"))
            .collect();
        let table = LoanTable::from_records(records);
        let rows: Vec<&LoanRecord> = table.records.iter().collect();

        let head = preview(&rows);
        assert_eq!(head.len(), PREVIEW_ROWS);
        let names: Vec<&str> = head.iter().map(|r| r.borrower.as_str()).collect();
        assert_eq!(names, vec!["B0", "B1", "B2", "B3", "B4", "B5", "B6", "B7"]);

        assert_eq!(preview(&rows[..3]).len(), 3);
    }
}
