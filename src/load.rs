//! CSV staging and normalization into the salary star schema.
//!
//! Raw rows are staged as text, deduplicated into the `employers` and
//! `individuals` dimensions, then resolved to surrogate keys and upserted
//! into `salaries`. The whole load runs in one transaction: a malformed
//! amount or year anywhere in the file leaves the database as it was.

use std::{io::Read, path::Path};

use duckdb::{Connection, params};
use encoding_rs::{Encoding, UTF_8};
use itertools::Itertools;
use log::{debug, info};

use crate::{
    Error, Result,
    database::{Database, TableCounts},
    io_utils,
    model::RAW_COLUMNS,
    schema,
};

// Filled through the appender; dropped before commit.
const CREATE_STAGING: &str = "
CREATE TABLE raw_salaries (
    source_row    BIGINT,
    sector        TEXT,
    last_name     TEXT,
    first_name    TEXT,
    salary        TEXT,
    benefits      TEXT,
    employer_name TEXT,
    job_title     TEXT,
    year          TEXT
)";

const STAGING_TABLE: &str = "raw_salaries";

// Surrogate ids follow first appearance in the file.
const INSERT_EMPLOYERS: &str = "
INSERT INTO employers (employer_name, sector)
SELECT employer_name, sector
FROM raw_salaries
GROUP BY employer_name, sector
ORDER BY MIN(source_row)
ON CONFLICT (employer_name, sector) DO NOTHING";

const INSERT_INDIVIDUALS: &str = "
INSERT INTO individuals (last_name, first_name, job_title)
SELECT last_name, first_name, job_title
FROM raw_salaries
GROUP BY last_name, first_name, job_title
ORDER BY MIN(source_row)
ON CONFLICT (last_name, first_name, job_title) DO NOTHING";

// A key repeated within one file keeps its last occurrence.
const UPSERT_SALARIES: &str = "
INSERT INTO salaries (employer_id, individual_id, year, salary, benefits)
SELECT employer_id, individual_id, year, salary, benefits
FROM (
    SELECT
        e.employer_id,
        i.individual_id,
        CAST(TRIM(r.year) AS INTEGER) AS year,
        CAST(REPLACE(TRIM(r.salary), ',', '') AS DOUBLE) AS salary,
        CAST(REPLACE(TRIM(r.benefits), ',', '') AS DOUBLE) AS benefits,
        r.source_row
    FROM raw_salaries r
    JOIN employers e
        ON r.employer_name = e.employer_name AND r.sector = e.sector
    JOIN individuals i
        ON r.last_name = i.last_name
        AND r.first_name = i.first_name
        AND r.job_title = i.job_title
) AS resolved
QUALIFY row_number() OVER (
    PARTITION BY employer_id, individual_id, year
    ORDER BY source_row DESC
) = 1
ON CONFLICT (employer_id, individual_id, year)
DO UPDATE SET salary = EXCLUDED.salary, benefits = EXCLUDED.benefits";

const DROP_STAGING: &str = "DROP TABLE raw_salaries";

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Field delimiter; inferred from the file extension when `None`.
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Data rows read from the CSV.
    pub staged_rows: usize,
    /// Table sizes after the load committed.
    pub counts: TableCounts,
}

/// Create a fresh database at `db_path` and load `csv_path` into it.
///
/// Nothing is created when the CSV is missing or the database already
/// exists. If the load fails, the new database file is removed again.
pub fn create_and_load(
    csv_path: &Path,
    db_path: &Path,
    options: &LoadOptions,
) -> Result<LoadSummary> {
    if !csv_path.is_file() {
        return Err(Error::CsvNotFound(csv_path.to_path_buf()));
    }
    let mut db = schema::create_database(db_path)?;
    match load_csv(&mut db, csv_path, options) {
        Ok(summary) => {
            db.close()?;
            Ok(summary)
        }
        Err(err) => {
            let _ = db.close();
            schema::discard_database(db_path);
            Err(err)
        }
    }
}

/// Stage, normalize and upsert the rows of `csv_path` into `db`.
pub fn load_csv(db: &mut Database, csv_path: &Path, options: &LoadOptions) -> Result<LoadSummary> {
    if !csv_path.is_file() {
        return Err(Error::CsvNotFound(csv_path.to_path_buf()));
    }
    let delimiter = io_utils::resolve_input_delimiter(csv_path, options.delimiter);
    let mut reader = io_utils::open_csv_reader_from_path(csv_path, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, options.encoding)?;
    validate_headers(&headers)?;
    debug!("Headers of {:?}: {}", csv_path, headers.iter().join(", "));

    let tx = db.connection_mut().transaction()?;
    tx.execute_batch(CREATE_STAGING)?;
    let staged_rows = stage_records(&tx, &mut reader, options.encoding)?;
    info!("Staged {staged_rows} row(s) from {:?}", csv_path);

    let employers = tx.execute(INSERT_EMPLOYERS, [])?;
    debug!("Inserted {employers} new employer(s)");
    let individuals = tx.execute(INSERT_INDIVIDUALS, [])?;
    debug!("Inserted {individuals} new individual(s)");
    let salaries = tx.execute(UPSERT_SALARIES, [])?;
    debug!("Upserted {salaries} salary row(s)");

    tx.execute_batch(DROP_STAGING)?;
    tx.commit()?;

    let counts = db.counts()?;
    info!(
        "Loaded {:?}: {} employer(s), {} individual(s), {} salary row(s)",
        csv_path, counts.employers, counts.individuals, counts.salaries
    );
    Ok(LoadSummary {
        staged_rows,
        counts,
    })
}

fn validate_headers(headers: &[String]) -> Result<()> {
    if headers.len() != RAW_COLUMNS.len() {
        return Err(header_mismatch(headers.len()));
    }
    Ok(())
}

fn header_mismatch(found: usize) -> Error {
    Error::HeaderMismatch {
        expected: RAW_COLUMNS.len(),
        found,
        columns: RAW_COLUMNS.iter().join(", "),
    }
}

fn stage_records<R: Read>(
    conn: &Connection,
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<usize> {
    let mut appender = conn.appender(STAGING_TABLE)?;
    let mut staged = 0usize;
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record?;
        let fields = io_utils::decode_record(&record, encoding)?;
        let [sector, last_name, first_name, salary, benefits, employer_name, job_title, year] =
            fields.as_slice()
        else {
            return Err(header_mismatch(fields.len()));
        };
        appender.append_row(params![
            row_idx as i64 + 2,
            non_empty(sector),
            non_empty(last_name),
            non_empty(first_name),
            non_empty(salary),
            non_empty(benefits),
            non_empty(employer_name),
            non_empty(job_title),
            non_empty(year)
        ])?;
        staged += 1;
    }
    appender.flush()?;
    Ok(staged)
}

/// Fields are staged trimmed, so `" Doe "` and `"Doe"` resolve to one
/// individual. Blank fields are staged as NULL and trip a NOT NULL
/// constraint instead of loading as an empty string.
fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}
