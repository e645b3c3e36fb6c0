//! Recompute path: new criteria in, a complete dashboard view out.
//!
//! ```text
//!  widgets ──FilterCriteria──▶ CriteriaChannel ──latest──▶ render()
//!                                                            │
//!                          filter → aggregate → present ◀────┘
//!                                                            │
//!                                                            ▼
//!                                                      DashboardView
//! ```

use std::sync::mpsc::{self, Receiver, Sender};

use crate::data::aggregate;
use crate::data::filter::{FilterCriteria, filter};
use crate::data::model::LoanTable;
use crate::present::{self, PieSeries, Presenter, PreviewTable, StackedBars, TrendSeries};

/// Everything the UI shows for one set of criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub criteria: FilterCriteria,
    pub visible_rows: usize,
    pub total_loan: String,
    pub total_customers: String,
    pub loan_status_pie: PieSeries,
    pub loan_trend_line: TrendSeries,
    pub branches_loan_status: StackedBars,
    pub loan_table: PreviewTable,
}

/// Filter the table and run every aggregation. Pure; nothing is cached.
pub fn render(table: &LoanTable, criteria: &FilterCriteria, presenter: &Presenter) -> DashboardView {
    let rows = filter(table, criteria);

    let distribution = aggregate::status_distribution(&rows);
    for share in &distribution {
        log::debug!(
            "status {}: amount {:.2}, {:.1}%",
            share.status,
            share.amount,
            share.percentage
        );
    }
    let trend = aggregate::yearly_trend(&rows);
    let pivot = aggregate::branch_status_breakdown(&rows);
    let head = aggregate::preview(&rows);

    log::debug!("recomputed for {criteria}: {} of {} rows", rows.len(), table.len());

    DashboardView {
        criteria: criteria.clone(),
        visible_rows: rows.len(),
        total_loan: present::format_currency(aggregate::total_amount(&rows)),
        total_customers: present::format_count(aggregate::borrower_count(&rows)),
        loan_status_pie: presenter.pie(&distribution),
        loan_trend_line: presenter.trend(&trend),
        branches_loan_status: presenter.stacked_bars(&pivot),
        loan_table: presenter.preview_table(&head),
    }
}

// ---------------------------------------------------------------------------
// CriteriaChannel – widgets push, the app pulls
// ---------------------------------------------------------------------------

/// Carries new criteria from the input widgets to the recompute step.
pub struct CriteriaChannel {
    tx: Sender<FilterCriteria>,
    rx: Receiver<FilterCriteria>,
}

impl Default for CriteriaChannel {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl CriteriaChannel {
    /// A handle for widgets to publish changes.
    pub fn sender(&self) -> Sender<FilterCriteria> {
        self.tx.clone()
    }

    /// Drain pending messages, keeping only the newest.
    pub fn latest(&self) -> Option<FilterCriteria> {
        self.rx.try_iter().last()
    }
}
