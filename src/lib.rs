pub mod cli;
pub mod data;
pub mod database;
pub mod error;
pub mod io_utils;
pub mod load;
pub mod model;
pub mod report;
pub mod schema;
pub mod table;

use std::{env, io, process, sync::OnceLock};

use anyhow::Context;
use clap::Parser;
use log::{LevelFilter, debug, info};

pub use crate::error::{Error, Result};
use crate::{
    cli::{LoadArgs, ReportArgs},
    load::LoadOptions,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sunshine_olap", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

/// Parse arguments, exiting with status 1 on usage errors.
fn parse_args<P: Parser>() -> P {
    P::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        process::exit(code);
    })
}

/// Entry point of `sunshine-load`.
pub fn run_load() -> anyhow::Result<()> {
    init_logging();
    let args: LoadArgs = parse_args();
    handle_load(&args)
}

/// Entry point of `sunshine-report`.
pub fn run_report() -> anyhow::Result<()> {
    init_logging();
    let args: ReportArgs = parse_args();
    handle_report(&args)
}

pub fn handle_load(args: &LoadArgs) -> anyhow::Result<()> {
    let options = LoadOptions {
        delimiter: args.delimiter,
        encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
    };
    info!(
        "Loading '{}' into '{}'",
        args.csv.display(),
        args.database.display()
    );
    let summary = load::create_and_load(&args.csv, &args.database, &options)
        .with_context(|| format!("Loading {:?} into {:?}", args.csv, args.database))?;
    debug!("Load summary: {:?}", summary);
    println!(
        "Database {} created and data loaded successfully from {}.",
        args.database.display(),
        args.csv.display()
    );
    Ok(())
}

pub fn handle_report(args: &ReportArgs) -> anyhow::Result<()> {
    let db = schema::open_database(&args.database)
        .with_context(|| format!("Opening database {:?}", args.database))?;
    let sections = report::run_reports(&db)
        .with_context(|| format!("Running reports against {:?}", args.database))?;
    report::write_sections(&mut io::stdout().lock(), &sections)?;
    db.close()?;
    Ok(())
}
