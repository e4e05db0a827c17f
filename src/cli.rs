use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "sunshine-load",
    author,
    version,
    about = "Create a salary database and load a disclosure CSV into it",
    long_about = None
)]
pub struct LoadArgs {
    /// CSV with columns sector, last name, first name, salary, benefits,
    /// employer, job title, year (header row required)
    pub csv: PathBuf,
    /// Database file to create; must not exist yet
    pub database: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Parser)]
#[command(
    name = "sunshine-report",
    author,
    version,
    about = "Run the canned OLAP reports against a salary database",
    long_about = None
)]
pub struct ReportArgs {
    /// Database file produced by sunshine-load
    pub database: PathBuf,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delimiter_accepts_names_and_symbols() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("semicolon"), Ok(b';'));
        assert_eq!(parse_delimiter(":"), Ok(b':'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn load_args_take_two_positionals() {
        let args = LoadArgs::try_parse_from(["sunshine-load", "in.csv", "out.duckdb"]).unwrap();
        assert_eq!(args.csv, PathBuf::from("in.csv"));
        assert_eq!(args.database, PathBuf::from("out.duckdb"));
        assert!(args.delimiter.is_none());

        assert!(LoadArgs::try_parse_from(["sunshine-load", "in.csv"]).is_err());
        assert!(ReportArgs::try_parse_from(["sunshine-report"]).is_err());
        assert!(ReportArgs::try_parse_from(["sunshine-report", "a", "b"]).is_err());
    }
}
