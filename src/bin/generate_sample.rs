//! Writes a deterministic demo loan dataset.
//!
//! `generate_sample [path] [--rows N] [--seed S]` – `.csv` (default
//! `loan_data.csv`) or `.parquet`.
//! A few rows carry an `N/A` amount or an unreadable date so the dashboard's
//! null handling is visible.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;

const BRANCHES: [&str; 5] = ["Leeds", "Manchester", "Bristol", "Glasgow", "Cardiff"];
const BORROWERS: [&str; 24] = [
    "Alice Mensah", "Ben Carter", "Chloe Davies", "Dan Okafor", "Ella Nowak", "Femi Adeyemi",
    "Grace Liu", "Harry Patel", "Isla Murphy", "Jack Evans", "Kemi Bello", "Liam Walsh",
    "Maya Singh", "Noah Clarke", "Olivia Rossi", "Priya Shah", "Quinn Hughes", "Ruby Ahmed",
    "Sam Taylor", "Tara Kelly", "Umar Farooq", "Vera Ivanova", "Will Turner", "Zara Khan",
];
/// (status, cumulative probability)
const STATUSES: [(&str, f64); 3] = [("Current", 0.6), ("PaidOff", 0.85), ("Defaulted", 1.0)];
const TENORS: [i64; 8] = [12, 24, 36, 48, 60, 120, 240, 360];

#[derive(Parser)]
#[command(name = "generate_sample")]
#[command(about = "Write a demo loan table for the dashboard")]
struct Args {
    /// Output file; `.parquet` or `.pq` writes Parquet, anything else CSV
    #[arg(default_value = "loan_data.csv")]
    output: PathBuf,

    /// Number of loans to generate
    #[arg(long, default_value_t = 600)]
    rows: usize,

    /// Seed for the generator; the same seed gives the same file
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Seeded xoshiro256** stream so every run produces the same loans.
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    /// Spread the seed over the four state words with an LCG step.
    fn new(seed: u64) -> Self {
        let mut state = [0u64; 4];
        let mut x = seed;
        for word in &mut state {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *word = x;
        }
        SimpleRng { state }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)` from the top 53 bits.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct SampleLoan {
    borrower: &'static str,
    branch: &'static str,
    /// `None` is written as an unreadable date.
    date: Option<NaiveDate>,
    /// `None` is written as `N/A`.
    amount: Option<f64>,
    rate: f64,
    tenor: i64,
    status: &'static str,
}

fn generate(rng: &mut SimpleRng, rows: usize) -> Result<Vec<SampleLoan>> {
    let first_day = NaiveDate::from_ymd_opt(2019, 1, 1).context("invalid start date")?;

    let loans = (0..rows)
        .map(|_| {
            let roll = rng.next_f64();
            let status = STATUSES
                .iter()
                .find(|(_, p)| roll < *p)
                .map(|(s, _)| *s)
                .unwrap_or("Current");

            let days = (rng.next_u64() % (6 * 365)) as i64;
            let date = (rng.next_f64() > 0.02).then(|| first_day + chrono::Duration::days(days));
            let amount = (rng.next_f64() > 0.03)
                .then(|| (rng.range(1_000.0, 250_000.0) * 100.0).round() / 100.0);

            SampleLoan {
                borrower: *rng.pick(&BORROWERS),
                branch: *rng.pick(&BRANCHES),
                date,
                amount,
                rate: (rng.range(2.5, 14.0) * 100.0).round() / 100.0,
                tenor: *rng.pick(&TENORS),
                status,
            }
        })
        .collect();
    Ok(loans)
}

fn write_csv(path: &Path, loans: &[SampleLoan]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record([
        "Borrower",
        "Branch",
        "Date",
        "Loan Amount",
        "Interest Rate",
        "Tenor",
        "Loan Status",
    ])?;
    for loan in loans {
        let date = loan
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let amount = loan
            .amount
            .map(|a| format!("{a:.2}"))
            .unwrap_or_else(|| "N/A".to_string());
        writer.write_record([
            loan.borrower.to_string(),
            loan.branch.to_string(),
            date,
            amount,
            format!("{:.2}", loan.rate),
            loan.tenor.to_string(),
            loan.status.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, loans: &[SampleLoan]) -> Result<()> {
    // NaiveDate's default is the Unix epoch.
    let epoch = NaiveDate::default();
    let days_since_epoch =
        |d: NaiveDate| (d.num_days_from_ce() - epoch.num_days_from_ce()) as i32;

    let schema = Arc::new(Schema::new(vec![
        Field::new("Borrower", DataType::Utf8, false),
        Field::new("Branch", DataType::Utf8, false),
        Field::new("Date", DataType::Date32, true),
        Field::new("Loan Amount", DataType::Float64, true),
        Field::new("Interest Rate", DataType::Float64, false),
        Field::new("Tenor", DataType::Int64, false),
        Field::new("Loan Status", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(loans.iter().map(|l| l.borrower))),
            Arc::new(StringArray::from_iter_values(loans.iter().map(|l| l.branch))),
            Arc::new(Date32Array::from(
                loans.iter().map(|l| l.date.map(days_since_epoch)).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                loans.iter().map(|l| l.amount).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                loans.iter().map(|l| l.rate).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                loans.iter().map(|l| l.tenor).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from_iter_values(loans.iter().map(|l| l.status))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let path = args.output.as_path();

    let mut rng = SimpleRng::new(args.seed);
    let loans = generate(&mut rng, args.rows)?;

    let is_parquet = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));
    if is_parquet {
        write_parquet(path, &loans)?;
    } else {
        write_csv(path, &loans)?;
    }

    println!("Wrote {} loans to {}", loans.len(), path.display());
    Ok(())
}
