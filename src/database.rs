//! [`Database`] — an open handle on a salary star-schema file.

use duckdb::Connection;

use crate::{
    Error, Result,
    model::{Employer, Individual, SalaryFact},
};

/// Table row counts, used to summarize a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub employers: i64,
    pub individuals: i64,
    pub salaries: i64,
}

#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Close the underlying connection, surfacing any flush error.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| Error::Database(err))
    }

    pub fn counts(&self) -> Result<TableCounts> {
        let count = |table: &str| -> Result<i64> {
            let sql = format!("SELECT COUNT(*) FROM {table}");
            Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
        };
        Ok(TableCounts {
            employers: count("employers")?,
            individuals: count("individuals")?,
            salaries: count("salaries")?,
        })
    }

    /// All employers ordered by surrogate key.
    pub fn employers(&self) -> Result<Vec<Employer>> {
        let mut stmt = self.conn.prepare(
            "SELECT employer_id, employer_name, sector FROM employers ORDER BY employer_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Employer {
                id: row.get(0)?,
                name: row.get(1)?,
                sector: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// All individuals ordered by surrogate key.
    pub fn individuals(&self) -> Result<Vec<Individual>> {
        let mut stmt = self.conn.prepare(
            "SELECT individual_id, last_name, first_name, job_title \
             FROM individuals ORDER BY individual_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Individual {
                id: row.get(0)?,
                last_name: row.get(1)?,
                first_name: row.get(2)?,
                job_title: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// All salary facts ordered by composite key.
    pub fn salaries(&self) -> Result<Vec<SalaryFact>> {
        let mut stmt = self.conn.prepare(
            "SELECT employer_id, individual_id, year, salary, benefits \
             FROM salaries ORDER BY employer_id, individual_id, year",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(SalaryFact {
                employer_id: row.get(0)?,
                individual_id: row.get(1)?,
                year: row.get(2)?,
                salary: row.get(3)?,
                benefits: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
