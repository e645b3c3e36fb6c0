use crate::data::filter::FilterCriteria;
use crate::data::model::LoanTable;
use crate::pipeline::{self, CriteriaChannel, DashboardView};
use crate::present::Presenter;
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, read-only afterwards.
    pub table: LoanTable,

    pub theme: Theme,

    presenter: Presenter,

    /// Criteria published by the widgets, waiting to be applied.
    channel: CriteriaChannel,

    /// Output of the last recompute. `view.criteria` is what the selectors show.
    pub view: DashboardView,
}

impl AppState {
    /// Render the unfiltered dashboard for a freshly loaded table.
    pub fn new(table: LoanTable, theme: Theme) -> Self {
        let presenter = Presenter::new(&table, &theme);
        let view = pipeline::render(&table, &FilterCriteria::default(), &presenter);
        Self {
            table,
            theme,
            presenter,
            channel: CriteriaChannel::default(),
            view,
        }
    }

    /// Queue new criteria; they take effect on the next [`Self::apply_pending`].
    pub fn publish(&self, criteria: FilterCriteria) {
        if let Err(e) = self.channel.sender().send(criteria) {
            log::error!("Dropped filter change: {e}");
        }
    }

    /// Recompute the view if any criteria arrived. Returns whether it did.
    pub fn apply_pending(&mut self) -> bool {
        match self.channel.latest() {
            Some(criteria) if criteria != self.view.criteria => {
                self.view = pipeline::render(&self.table, &criteria, &self.presenter);
                true
            }
            _ => false,
        }
    }
}
