//! Canned OLAP reports over the salary star schema.
//!
//! Six read-only queries, each paired with a French title and column labels.
//! Filter values are literals; nothing here takes user input.

use std::io::Write;

use duckdb::types::Value as DuckValue;
use log::{debug, info};

use crate::{Result, data::Value, database::Database, table};

pub const NO_ROWS_MESSAGE: &str = "Aucune donnée trouvée.";

/// One canned query with its presentation.
#[derive(Debug, Clone, Copy)]
pub struct Report {
    pub name: &'static str,
    pub title: &'static str,
    pub headers: &'static [&'static str],
    pub sql: &'static str,
}

pub const REPORTS: [Report; 6] = [
    Report {
        name: "roll-up",
        title: "Roll-up (moyenne des salaires par secteur et année):",
        headers: &["Secteur", "Année", "Salaire moyen"],
        sql: "
SELECT e.sector, s.year, AVG(s.salary) AS average_salary
FROM salaries s
JOIN employers e ON s.employer_id = e.employer_id
GROUP BY e.sector, s.year
ORDER BY e.sector, s.year",
    },
    Report {
        name: "drill-down",
        title: "Drill-down (moyenne des salaires par employeur dans le secteur Universities):",
        headers: &["Employeur", "Année", "Salaire moyen"],
        sql: "
SELECT e.employer_name, s.year, AVG(s.salary) AS average_salary
FROM salaries s
JOIN employers e ON s.employer_id = e.employer_id
WHERE e.sector = 'Universities'
GROUP BY e.employer_name, s.year
ORDER BY e.employer_name, s.year",
    },
    Report {
        name: "dice",
        title: "Dice (salaires des employés avec 'software' dans le titre pour employeurs commençant par 'Ontario'):",
        headers: &["Nom", "Prénom", "Employeur", "Salaire"],
        sql: "
SELECT i.last_name, i.first_name, e.employer_name, s.salary
FROM salaries s
JOIN individuals i ON s.individual_id = i.individual_id
JOIN employers e ON s.employer_id = e.employer_id
WHERE e.employer_name LIKE 'Ontario%' AND i.job_title ILIKE '%software%'
ORDER BY i.last_name, i.first_name, e.employer_name, s.year",
    },
    Report {
        name: "slice",
        title: "Slice (moyenne des salaires par année pour Pay Equity Commission):",
        headers: &["Année", "Salaire moyen"],
        sql: "
SELECT s.year, AVG(s.salary) AS average_salary
FROM salaries s
JOIN employers e ON s.employer_id = e.employer_id
WHERE e.employer_name = 'Pay Equity Commission'
GROUP BY s.year
ORDER BY s.year",
    },
    Report {
        name: "pivot",
        title: "Pivot (salaires moyens par année, secteurs en colonnes):",
        headers: &["Année", "Universities", "Colleges"],
        sql: "
SELECT
    s.year,
    AVG(s.salary) FILTER (WHERE e.sector = 'Universities') AS universities,
    AVG(s.salary) FILTER (WHERE e.sector = 'Colleges') AS colleges
FROM salaries s
JOIN employers e ON s.employer_id = e.employer_id
GROUP BY s.year
ORDER BY s.year",
    },
    Report {
        name: "approx-count-distinct",
        title: "Approximate count distinct (nombre approximatif d'employeurs par secteur):",
        headers: &["Secteur", "Nombre approximatif d'employeurs"],
        sql: "
SELECT e.sector, APPROX_COUNT_DISTINCT(e.employer_id) AS approx_employer_count
FROM employers e
GROUP BY e.sector
ORDER BY e.sector",
    },
];

/// The result set of one [`Report`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ReportSection {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Report {
    pub fn execute(&self, db: &Database) -> Result<ReportSection> {
        debug!("Running {} report", self.name);
        let column_count = self.headers.len();
        let mut stmt = db.connection().prepare(self.sql)?;
        let mut cursor = stmt.query([])?;
        let mut rows = Vec::new();
        while let Some(row) = cursor.next()? {
            let mut cells = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                let value: DuckValue = row.get(idx)?;
                cells.push(Value::from(value));
            }
            rows.push(cells);
        }
        debug!("{} report returned {} row(s)", self.name, rows.len());
        Ok(ReportSection {
            title: self.title.to_string(),
            headers: self.headers.iter().map(|h| h.to_string()).collect(),
            rows,
        })
    }
}

/// Run every canned report against `db`, in order.
pub fn run_reports(db: &Database) -> Result<Vec<ReportSection>> {
    let sections = REPORTS
        .iter()
        .map(|report| report.execute(db))
        .collect::<Result<Vec<_>>>()?;
    info!("Ran {} report(s)", sections.len());
    Ok(sections)
}

/// Title line followed by the table, or the "no rows" message.
pub fn render_section(section: &ReportSection) -> String {
    let mut output = format!("\n{}\n", section.title);
    if section.is_empty() {
        output.push_str(NO_ROWS_MESSAGE);
        output.push('\n');
    } else {
        let rows = section
            .rows
            .iter()
            .map(|row| row.iter().map(Value::as_display).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        output.push_str(&table::render_table(&section.headers, &rows));
    }
    output
}

pub fn write_sections<W: Write>(writer: &mut W, sections: &[ReportSection]) -> Result<()> {
    for section in sections {
        writer.write_all(render_section(section).as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
