use std::fmt;

use super::model::{LoanRecord, LoanTable};

/// Input value that means "no constraint on this field".
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Selection – one filter input
// ---------------------------------------------------------------------------

/// The state of a single selector: either everything, or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Interpret a raw UI input; the sentinel `"All"` disables the filter.
    pub fn from_input(value: &str) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    /// Exact, case-sensitive match. `All` matches everything.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    /// The text shown in the selector.
    pub fn as_input(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(v) => v,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_input())
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria – the three dashboard inputs
// ---------------------------------------------------------------------------

/// Branch, status and borrower selections. Default is "All" everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub branch: Selection,
    pub loan_status: Selection,
    pub borrower: Selection,
}

impl FilterCriteria {
    /// Build criteria from the raw selector strings.
    pub fn from_inputs(branch: &str, loan_status: &str, borrower: &str) -> Self {
        FilterCriteria {
            branch: Selection::from_input(branch),
            loan_status: Selection::from_input(loan_status),
            borrower: Selection::from_input(borrower),
        }
    }

    /// A record passes when it matches every active selection.
    pub fn matches(&self, rec: &LoanRecord) -> bool {
        self.branch.matches(&rec.branch)
            && self.loan_status.matches(&rec.loan_status)
            && self.borrower.matches(&rec.borrower)
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "branch={} status={} borrower={}",
            self.branch, self.loan_status, self.borrower
        )
    }
}

/// Return the records that pass all active criteria, in table order.
pub fn filter<'a>(table: &'a LoanTable, criteria: &FilterCriteria) -> Vec<&'a LoanRecord> {
    table
        .records
        .iter()
        .filter(|rec| criteria.matches(rec))
        .collect()
}
