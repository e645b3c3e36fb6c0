//! Presentation adapter: turns aggregate results into display-ready values.
//!
//! Nothing outside this module formats numbers or picks chart colours; the
//! UI layer only draws what it receives from here.

use eframe::egui::Color32;
use num_format::{Locale, ToFormattedString};

use crate::color::StatusColors;
use crate::data::aggregate::{BranchStatusBreakdown, StatusShare};
use crate::data::model::{COLUMNS, LoanRecord, LoanTable};
use crate::theme::Theme;

/// Shown in table cells whose value is null.
pub const NULL_CELL: &str = "-";
pub const CURRENCY_SYMBOL: &str = "$";

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// `1234567.891` → `"1,234,567.89"`. Rounds before grouping so that a
/// carry reaches the integer part.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let unit = 10u64.pow(decimals as u32);
    let scaled = (value.abs() * unit as f64).round() as u64;
    let whole = (scaled / unit).to_formatted_string(&Locale::en);
    let sign = if value < 0.0 && scaled > 0 { "-" } else { "" };

    if decimals == 0 {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{:0decimals$}", scaled % unit)
    }
}

/// Currency with thousands separators and cents: `$1,234.50`, `$-12.00`.
pub fn format_currency(amount: f64) -> String {
    format!("{CURRENCY_SYMBOL}{}", group_thousands(amount, 2))
}

/// Plain integer string.
pub fn format_count(n: usize) -> String {
    n.to_string()
}

/// Whole numbers without decimals, everything else with up to two.
fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

// ---------------------------------------------------------------------------
// Chart-ready series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub status: String,
    pub amount: f64,
    pub percentage: f64,
    /// `"Current: $1,000.00 (25.0%)"`
    pub label: String,
    pub color: Color32,
}

/// Loan status distribution, one slice per status.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieSeries {
    pub slices: Vec<PieSlice>,
}

impl PieSeries {
    /// A pie of only zero slices has nothing to draw.
    pub fn is_drawable(&self) -> bool {
        self.slices.iter().any(|s| s.amount > 0.0)
    }
}

/// Loan amount per year as `[year, total]` points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendSeries {
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayer {
    pub status: String,
    /// One value per branch, aligned with [`StackedBars::branches`].
    pub values: Vec<f64>,
    pub color: Color32,
}

/// Branch × status pivot as stacked bar layers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackedBars {
    pub branches: Vec<String>,
    pub layers: Vec<BarLayer>,
}

// ---------------------------------------------------------------------------
// Styled preview table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub background: Color32,
    pub text: Color32,
    pub border: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTable {
    pub headers: [&'static str; 7],
    pub rows: Vec<[String; 7]>,
    pub style: TableStyle,
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

/// Holds the colours that stay fixed for the lifetime of the table.
#[derive(Debug, Clone)]
pub struct Presenter {
    status_colors: StatusColors,
    trend_color: Color32,
    table_style: TableStyle,
}

impl Presenter {
    pub fn new(table: &LoanTable, theme: &Theme) -> Self {
        Presenter {
            status_colors: StatusColors::new(&table.statuses, &theme.palette()),
            trend_color: theme.accent.0,
            table_style: TableStyle {
                background: theme.table_background.0,
                text: theme.table_text.0,
                border: theme.table_border.0,
            },
        }
    }

    pub fn pie(&self, distribution: &[StatusShare]) -> PieSeries {
        let slices = distribution
            .iter()
            .map(|share| PieSlice {
                status: share.status.clone(),
                amount: share.amount,
                percentage: share.percentage,
                label: format!(
                    "{}: {} ({:.1}%)",
                    share.status,
                    format_currency(share.amount),
                    share.percentage
                ),
                color: self.status_colors.color_for(&share.status),
            })
            .collect();
        PieSeries { slices }
    }

    pub fn trend(&self, trend: &[(i32, f64)]) -> TrendSeries {
        TrendSeries {
            points: trend.iter().map(|&(y, v)| [y as f64, v]).collect(),
            color: self.trend_color,
        }
    }

    pub fn stacked_bars(&self, pivot: &BranchStatusBreakdown) -> StackedBars {
        if pivot.is_empty() {
            return StackedBars::default();
        }
        let layers = pivot
            .statuses
            .iter()
            .enumerate()
            .map(|(s, status)| BarLayer {
                status: status.clone(),
                values: pivot.status_column(s),
                color: self.status_colors.color_for(status),
            })
            .collect();
        StackedBars {
            branches: pivot.branches.clone(),
            layers,
        }
    }

    pub fn preview_table(&self, rows: &[&LoanRecord]) -> PreviewTable {
        PreviewTable {
            headers: COLUMNS,
            rows: rows.iter().map(|r| preview_cells(r)).collect(),
            style: self.table_style,
        }
    }
}

fn preview_cells(rec: &LoanRecord) -> [String; 7] {
    let or_null = |v: Option<String>| v.unwrap_or_else(|| NULL_CELL.to_string());
    [
        rec.borrower.clone(),
        rec.branch.clone(),
        or_null(rec.date.map(|d| d.format("%Y-%m-%d").to_string())),
        or_null(rec.loan_amount.map(|a| group_thousands(a, 2))),
        or_null(rec.interest_rate.map(format_number)),
        or_null(rec.tenor.map(format_number)),
        rec.loan_status.clone(),
    ]
}
