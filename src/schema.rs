//! Star schema for salary disclosures and the database file lifecycle.
//!
//! Two dimension tables (`employers`, `individuals`) keyed by sequence-backed
//! surrogate ids and one fact table (`salaries`) keyed by
//! `(employer_id, individual_id, year)`.

use std::{fs, path::Path};

use duckdb::{AccessMode, Config, Connection};
use log::{debug, info, warn};

use crate::{Error, Result, database::Database};

/// Schema DDL, executed once when the database file is created.
pub const SCHEMA: &str = "
CREATE SEQUENCE employer_id_seq;

CREATE TABLE employers (
    employer_id   INTEGER PRIMARY KEY DEFAULT nextval('employer_id_seq'),
    employer_name TEXT NOT NULL,
    sector        TEXT NOT NULL,
    UNIQUE (employer_name, sector)
);

CREATE SEQUENCE individual_id_seq;

CREATE TABLE individuals (
    individual_id INTEGER PRIMARY KEY DEFAULT nextval('individual_id_seq'),
    last_name     TEXT NOT NULL,
    first_name    TEXT NOT NULL,
    job_title     TEXT NOT NULL,
    UNIQUE (last_name, first_name, job_title)
);

-- One row per person, employer and year; reloads overwrite the amounts.
CREATE TABLE salaries (
    employer_id   INTEGER,
    individual_id INTEGER,
    year          INTEGER NOT NULL,
    salary        DOUBLE NOT NULL,
    benefits      DOUBLE NOT NULL,
    PRIMARY KEY (employer_id, individual_id, year),
    FOREIGN KEY (employer_id) REFERENCES employers (employer_id),
    FOREIGN KEY (individual_id) REFERENCES individuals (individual_id)
);
";

/// Create a new database file at `path` and install the schema.
///
/// Refuses to touch anything that already exists at `path`.
pub fn create_database(path: &Path) -> Result<Database> {
    if path.exists() {
        return Err(Error::DatabaseExists(path.to_path_buf()));
    }
    info!("Creating database {:?}", path);
    let conn = Connection::open(path)?;
    if let Err(err) = conn.execute_batch(SCHEMA) {
        drop(conn);
        discard_database(path);
        return Err(err.into());
    }
    debug!("Schema installed in {:?}", path);
    Ok(Database::new(conn))
}

/// Open an existing database file read-only.
pub fn open_database(path: &Path) -> Result<Database> {
    if !path.is_file() {
        return Err(Error::DatabaseNotFound(path.to_path_buf()));
    }
    let config = Config::default().access_mode(AccessMode::ReadOnly)?;
    let conn = Connection::open_with_flags(path, config)?;
    debug!("Opened {:?} read-only", path);
    Ok(Database::new(conn))
}

/// Remove a database file created by this process along with its
/// write-ahead log. Only called on paths [`create_database`] created.
pub(crate) fn discard_database(path: &Path) {
    let mut wal = path.as_os_str().to_os_string();
    wal.push(".wal");
    for target in [path.to_path_buf(), wal.into()] {
        match fs::remove_file(&target) {
            Ok(()) => debug!("Removed {:?}", target),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!("Could not remove {:?}: {err}", target),
        }
    }
}
