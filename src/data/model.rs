use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Column names – the fixed header of the source table
// ---------------------------------------------------------------------------

pub const COL_BORROWER: &str = "Borrower";
pub const COL_BRANCH: &str = "Branch";
pub const COL_DATE: &str = "Date";
pub const COL_LOAN_AMOUNT: &str = "Loan Amount";
pub const COL_INTEREST_RATE: &str = "Interest Rate";
pub const COL_TENOR: &str = "Tenor";
pub const COL_LOAN_STATUS: &str = "Loan Status";

/// Required columns, in display order.
pub const COLUMNS: [&str; 7] = [
    COL_BORROWER,
    COL_BRANCH,
    COL_DATE,
    COL_LOAN_AMOUNT,
    COL_INTEREST_RATE,
    COL_TENOR,
    COL_LOAN_STATUS,
];

/// Statuses offered by the status selector (besides "All").
pub const KNOWN_STATUSES: [&str; 3] = ["Current", "Defaulted", "PaidOff"];

// ---------------------------------------------------------------------------
// LoanRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single loan (one row of the source file). `None` marks a cell that
/// was empty or could not be coerced to its type.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRecord {
    pub borrower: String,
    pub branch: String,
    pub date: Option<NaiveDate>,
    pub loan_amount: Option<f64>,
    pub interest_rate: Option<f64>,
    pub tenor: Option<f64>,
    pub loan_status: String,
}

impl LoanRecord {
    /// Loan amount with nulls counted as zero.
    pub fn amount_or_zero(&self) -> f64 {
        self.loan_amount.unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// LoanTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full loaded table plus the distinct values used by the selectors.
#[derive(Debug, Clone, Default)]
pub struct LoanTable {
    /// All records, in file order.
    pub records: Vec<LoanRecord>,
    /// Distinct branches in first-seen order.
    pub branches: Vec<String>,
    /// Distinct borrowers in first-seen order.
    pub borrowers: Vec<String>,
    /// Distinct statuses in first-seen order.
    pub statuses: Vec<String>,
}

impl LoanTable {
    /// Build the selector indices from the loaded records.
    pub fn from_records(records: Vec<LoanRecord>) -> Self {
        let mut branches = Vec::new();
        let mut borrowers = Vec::new();
        let mut statuses = Vec::new();

        for rec in &records {
            push_unique(&mut branches, &rec.branch);
            push_unique(&mut borrowers, &rec.borrower);
            push_unique(&mut statuses, &rec.loan_status);
        }

        LoanTable {
            records,
            branches,
            borrowers,
            statuses,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Blank cells are not selectable values.
fn push_unique(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(borrower: &str, branch: &str, status: &str) -> LoanRecord {
        LoanRecord {
            borrower: borrower.into(),
            branch: branch.into(),
            date: None,
            loan_amount: None,
            interest_rate: None,
            tenor: None,
            loan_status: status.into(),
        }
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let table = LoanTable::from_records(vec![
            rec("Zed", "North", "Defaulted"),
            rec("Amy", "South", "Current"),
            rec("Zed", "North", "Current"),
        ]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.borrowers, vec!["Zed", "Amy"]);
        assert_eq!(table.branches, vec!["North", "South"]);
        assert_eq!(table.statuses, vec!["Defaulted", "Current"]);
    }

    #[test]
    fn blank_cells_are_not_distinct_values() {
        let table = LoanTable::from_records(vec![rec("Amy", "", ""), rec("", "North", "Current")]);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert_eq!(table.borrowers, vec!["Amy"]);
        assert_eq!(table.branches, vec!["North"]);
        assert_eq!(table.statuses, vec!["Current"]);
    }

    #[test]
    fn null_amount_counts_as_zero() {
        let r = rec("A", "X", "Current");
        assert_eq!(r.amount_or_zero(), 0.0);
    }
}
