use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{COLUMNS, LoanRecord, LoanTable};
use crate::error::LoadError;

/// One raw row: the seven required cells in [`COLUMNS`] order.
/// `None` is an empty / null cell.
type RawRow = [Option<String>; 7];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the loan table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row containing the seven loan columns (primary format)
/// * `.json`    – `[{ "Borrower": "...", "Loan Amount": 1200.0, ... }, ...]`
/// * `.parquet` – one column per loan field, any type that renders as text
pub fn load_file(path: &Path) -> Result<LoanTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => read_csv(open(path)?)?,
        "json" => {
            let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            read_json(&text)?
        }
        "parquet" | "pq" => read_parquet(open(path)?)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let table = build_table(rows);
    log::info!(
        "Loaded {} loan records from {} ({} branches, {} borrowers)",
        table.len(),
        path.display(),
        table.branches.len(),
        table.borrowers.len()
    );
    Ok(table)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Read raw rows from CSV text. Column order in the file is free; every
/// required column must be present and unknown columns are skipped.
/// Short rows are kept; their missing trailing cells read as null.
pub(crate) fn read_csv<R: Read>(input: R) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut positions = [0usize; 7];
    for (slot, col) in positions.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == col)
            .ok_or(LoadError::MissingColumn(col))?;
    }
    for extra in headers
        .iter()
        .filter(|h| !COLUMNS.iter().any(|col| *col == h.as_str()))
    {
        log::warn!("Ignoring unknown column '{extra}'");
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(positions.map(|idx| non_empty(record.get(idx).unwrap_or(""))));
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `orient='records'` layout:
///
/// ```json
/// [
///   { "Borrower": "Ada", "Branch": "Leeds", "Date": "2023-01-04",
///     "Loan Amount": 12000.0, "Interest Rate": 4.5, "Tenor": 36,
///     "Loan Status": "Current" }
/// ]
/// ```
pub(crate) fn read_json(text: &str) -> Result<Vec<RawRow>, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(LoadError::NotARecord(i))?;

        let mut row: RawRow = Default::default();
        for (cell, col) in row.iter_mut().zip(COLUMNS) {
            let value = obj.get(col).ok_or(LoadError::MissingColumn(col))?;
            *cell = json_to_text(value);
        }
        rows.push(row);
    }
    Ok(rows)
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => non_empty(s.trim()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Works with files written by Pandas (`df.to_parquet()`), Polars and
/// the bundled `generate_sample` binary. Every cell is rendered to text with
/// Arrow's display formatter and coerced like a CSV cell.
pub(crate) fn read_parquet(file: File) -> Result<Vec<RawRow>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let schema = builder.schema().clone();
    let mut positions = [0usize; 7];
    for (slot, col) in positions.iter_mut().zip(COLUMNS) {
        *slot = schema
            .index_of(col)
            .map_err(|_| LoadError::MissingColumn(col))?;
    }

    let reader = builder.build()?;
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let mut raw: RawRow = Default::default();
            for (cell, &idx) in raw.iter_mut().zip(positions.iter()) {
                let col = batch.column(idx);
                if col.is_null(row) {
                    continue;
                }
                *cell = non_empty(array_value_to_string(col.as_ref(), row)?.trim());
            }
            rows.push(raw);
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Cell coercion
// ---------------------------------------------------------------------------

/// Text layouts accepted for the `Date` column, tried in order.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a calendar date, ignoring any time-of-day part.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Parse a finite number; placeholders like `N/A`, `nan` or `inf` are null.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Coerce raw rows into records, logging how many cells fell back to null.
fn build_table(rows: Vec<RawRow>) -> LoanTable {
    let mut bad_amounts = 0usize;
    let mut bad_dates = 0usize;

    let records: Vec<LoanRecord> = rows
        .into_iter()
        .map(|[borrower, branch, date, amount, rate, tenor, status]| {
            let rec = LoanRecord {
                borrower: borrower.unwrap_or_default(),
                branch: branch.unwrap_or_default(),
                date: date.as_deref().and_then(parse_date),
                loan_amount: amount.as_deref().and_then(parse_number),
                interest_rate: rate.as_deref().and_then(parse_number),
                tenor: tenor.as_deref().and_then(parse_number),
                loan_status: status.unwrap_or_default(),
            };
            if rec.loan_amount.is_none() {
                bad_amounts += 1;
            }
            if rec.date.is_none() {
                bad_dates += 1;
            }
            rec
        })
        .collect();

    if bad_amounts > 0 {
        log::warn!("{bad_amounts} rows have a missing or non-numeric Loan Amount (treated as null)");
    }
    if bad_dates > 0 {
        log::warn!("{bad_dates} rows have a missing or unparseable Date (treated as null)");
    }

    LoanTable::from_records(records)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    use super::*;

    const HEADER: &str = "Borrower,Branch,Date,Loan Amount,Interest Rate,Tenor,Loan Status\n";

    fn temp_with_suffix(suffix: &str, contents: &str) -> NamedTempFile {
        let mut tmp = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(tmp, "{contents}").unwrap();
        tmp
    }

    #[test]
    fn loads_csv_and_coerces_cells() {
        let csv = format!(
            "{HEADER}Ada,Leeds,2023-01-04,12000.50,4.5,36,Current\n\
             Bob,York,not a date,N/A,5,24,Defaulted\n"
        );
        let tmp = temp_with_suffix(".csv", &csv);
        let table = load_file(tmp.path()).unwrap();

        assert_eq!(table.len(), 2);
        let ada = &table.records[0];
        assert_eq!(ada.borrower, "Ada");
        assert_eq!(ada.date, NaiveDate::from_ymd_opt(2023, 1, 4));
        assert_eq!(ada.loan_amount, Some(12000.50));
        assert_eq!(ada.interest_rate, Some(4.5));
        assert_eq!(ada.tenor, Some(36.0));

        // Bad cells become null but the row is kept.
        let bob = &table.records[1];
        assert_eq!(bob.loan_amount, None);
        assert_eq!(bob.date, None);
        assert_eq!(bob.loan_status, "Defaulted");
    }

    #[test]
    fn csv_column_order_is_free_and_extras_ignored() {
        let csv = "Loan Status,Tenor,Notes,Interest Rate,Loan Amount,Date,Branch,Borrower\n\
                   PaidOff,12,vip,3.1,500,2021/05/06,Hull,Cy\n";
        let rows = read_csv(csv.as_bytes()).unwrap();
        let table = build_table(rows);
        let cy = &table.records[0];
        assert_eq!(cy.borrower, "Cy");
        assert_eq!(cy.branch, "Hull");
        assert_eq!(cy.loan_status, "PaidOff");
        assert_eq!(cy.date, NaiveDate::from_ymd_opt(2021, 5, 6));
        assert_eq!(cy.loan_amount, Some(500.0));
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "Borrower,Branch,Date,Loan Amount,Interest Rate,Tenor\nA,X,2023-01-01,1,1,1\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Loan Status")));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_file(Path::new("/definitely/not/here/loan_data.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn unsupported_extension_is_fatal() {
        let tmp = temp_with_suffix(".xlsx", "");
        let err = load_file(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn empty_csv_cells_are_null() {
        let csv = format!("{HEADER}Ada,Leeds,,,,,Current\n");
        let table = build_table(read_csv(csv.as_bytes()).unwrap());
        let ada = &table.records[0];
        assert_eq!(ada.date, None);
        assert_eq!(ada.loan_amount, None);
        assert_eq!(ada.interest_rate, None);
        assert_eq!(ada.tenor, None);
    }

    #[test]
    fn short_csv_rows_are_kept_with_null_tail() {
        let csv = format!(
            "{HEADER}A,X,2023-01-01,100,5,12,Current\n\
             B,Y,2022-06-01,200\n"
        );
        let table = build_table(read_csv(csv.as_bytes()).unwrap());

        assert_eq!(table.len(), 2);
        let short = &table.records[1];
        assert_eq!(short.borrower, "B");
        assert_eq!(short.loan_amount, Some(200.0));
        assert_eq!(short.interest_rate, None);
        assert_eq!(short.tenor, None);
        assert_eq!(short.loan_status, "");
    }

    #[test]
    fn csv_errors_keep_the_reader_message() {
        let err = read_csv(&b"Borrower\xff,Branch\n"[..]).unwrap_err();
        let LoadError::Csv(inner) = &err else {
            panic!("expected a CSV error, got {err:?}");
        };
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn loads_json_records() {
        let json = r#"[
            {"Borrower": "Ada", "Branch": "Leeds", "Date": "2023-01-04T00:00:00",
             "Loan Amount": 1200, "Interest Rate": 4.5, "Tenor": 36, "Loan Status": "Current"},
            {"Borrower": "Bob", "Branch": "York", "Date": null,
             "Loan Amount": "N/A", "Interest Rate": null, "Tenor": 12, "Loan Status": "PaidOff"}
        ]"#;
        let tmp = temp_with_suffix(".json", json);
        let table = load_file(tmp.path()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].loan_amount, Some(1200.0));
        assert_eq!(table.records[0].date, NaiveDate::from_ymd_opt(2023, 1, 4));
        assert_eq!(table.records[1].loan_amount, None);
        assert_eq!(table.records[1].date, None);
        assert_eq!(table.records[1].interest_rate, None);
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        assert!(matches!(read_json("{}"), Err(LoadError::NotAnArray)));
        assert!(matches!(read_json("[1]"), Err(LoadError::NotARecord(0))));
        assert!(matches!(
            read_json(r#"[{"Borrower": "A"}]"#),
            Err(LoadError::MissingColumn("Branch"))
        ));
    }

    #[test]
    fn loads_parquet_with_typed_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Borrower", DataType::Utf8, false),
            Field::new("Branch", DataType::Utf8, false),
            Field::new("Date", DataType::Date32, true),
            Field::new("Loan Amount", DataType::Float64, true),
            Field::new("Interest Rate", DataType::Float64, true),
            Field::new("Tenor", DataType::Int64, true),
            Field::new("Loan Status", DataType::Utf8, false),
        ]));
        // 19358 days after the epoch is 2023-01-01.
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(StringArray::from(vec!["X", "Y"])),
                Arc::new(Date32Array::from(vec![Some(19358), None])),
                Arc::new(Float64Array::from(vec![Some(100.0), None])),
                Arc::new(Float64Array::from(vec![Some(4.5), Some(6.0)])),
                Arc::new(Int64Array::from(vec![Some(36), Some(12)])),
                Arc::new(StringArray::from(vec!["Current", "Defaulted"])),
            ],
        )
        .unwrap();

        let tmp = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(File::create(tmp.path()).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(tmp.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].date, NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(table.records[0].loan_amount, Some(100.0));
        assert_eq!(table.records[0].tenor, Some(36.0));
        assert_eq!(table.records[1].date, None);
        assert_eq!(table.records[1].loan_amount, None);
        assert_eq!(table.records[1].loan_status, "Defaulted");
    }

    #[test]
    fn date_formats() {
        let jan4 = NaiveDate::from_ymd_opt(2023, 1, 4);
        assert_eq!(parse_date("2023-01-04"), jan4);
        assert_eq!(parse_date("2023/01/04"), jan4);
        assert_eq!(parse_date("01/04/2023"), jan4);
        assert_eq!(parse_date("04-Jan-2023"), jan4);
        assert_eq!(parse_date("January 04, 2023"), jan4);
        assert_eq!(parse_date("2023-01-04 13:45:00"), jan4);
        assert_eq!(parse_date("2023-01-04T13:45:00+02:00"), jan4);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2023-13-40"), None);
    }

    #[test]
    fn number_placeholders_are_null() {
        assert_eq!(parse_number(" 1500.25 "), Some(1500.25));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("N/A"), None);
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("1,000"), None);
    }
}
