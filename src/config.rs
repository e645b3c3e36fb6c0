use std::path::PathBuf;

use clap::Parser;

/// Dataset used when neither an argument nor `LOAN_DESK_DATA` is given.
pub const DEFAULT_DATA_PATH: &str = "loan_data.csv";
pub const DATA_ENV: &str = "LOAN_DESK_DATA";
pub const THEME_ENV: &str = "LOAN_DESK_THEME";

#[derive(Parser, Debug)]
#[command(name = "loan-desk")]
#[command(about = "Bank loan analysis dashboard")]
pub struct Args {
    /// Loan table to open (.csv, .json or .parquet)
    #[arg(env = DATA_ENV, default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// JSON file overriding the default colours and sizes
    #[arg(long, env = THEME_ENV)]
    pub theme: Option<PathBuf>,
}

/// Startup settings, resolved once in `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub theme_path: Option<PathBuf>,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl DashboardConfig {
    /// Data path precedence: first argument, then `LOAN_DESK_DATA`, then
    /// [`DEFAULT_DATA_PATH`].
    pub fn from_args() -> Self {
        Args::parse().into()
    }
}

impl From<Args> for DashboardConfig {
    /// Blank values count as unset.
    fn from(args: Args) -> Self {
        let blank = |p: &PathBuf| p.as_os_str().to_string_lossy().trim().is_empty();

        let data_path = if blank(&args.data_path) {
            PathBuf::from(DEFAULT_DATA_PATH)
        } else {
            args.data_path
        };

        DashboardConfig {
            data_path,
            theme_path: args.theme.filter(|p| !blank(p)),
            window_size: [1400.0, 900.0],
            min_window_size: [900.0, 600.0],
        }
    }
}
