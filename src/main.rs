//! logbrowser: read an access log file, and show its records for a date range.
//!
//! The log file is taken from `--log-file`, or from `LOGBROWSER_LOG_FILE` in the environment or `.env`.
//! Logging is set with `RUST_LOG`, for example `RUST_LOG=info`.
use std::{collections::HashMap, io::stdout, process};
use anyhow::{bail, Context, Result};
use clap::Parser;
use dotenv::dotenv;
use log::*;
use logbrowser::{dates, output, utility, LogStore};

#[derive(Debug, Parser)]
#[command(version, about = "Browse web server access logs by date")]
struct Opts {
    /// access log file to read
    #[arg(short, long, value_name = "path")]
    log_file: Option<String>,
    /// show records from this date (yyyy-mm-dd or dd/Mon/yyyy), default the first record date
    #[arg(short, long, value_name = "date")]
    from: Option<String>,
    /// show records up to and including this date, default the last record date
    #[arg(short, long, value_name = "date")]
    to: Option<String>,
    /// print the date span of the selected records
    #[arg(short, long)]
    span: bool,
    /// print all fields of every selected record
    #[arg(short, long)]
    details: bool,
    /// print all fields of the record at this position of the selected records
    #[arg(short, long, value_name = "position")]
    position: Option<usize>,
    /// write the selected records as json
    #[arg(long, conflicts_with = "csv")]
    json: bool,
    /// write the selected records as csv
    #[arg(long)]
    csv: bool,
    /// print the lines that could not be parsed to stderr
    #[arg(long)]
    show_rejected: bool,
    /// write the used log file to .env
    #[arg(long)]
    write_dotenv: bool,
}

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();
    let options = Opts::parse();
    let mut changed_options = HashMap::new();

    let log_file = utility::set_log_file(&options.log_file, &mut changed_options)?;

    let mut store = LogStore::new();
    let report = store.read_logs(&log_file)
        .with_context(|| format!("File not found or not readable: {}", log_file.display()))?;
    if options.show_rejected {
        for rejected in &report.rejected {
            eprintln!("{}", rejected);
        }
    }
    if store.all_records().is_empty() {
        warn!("no records in {} ({} lines read)", log_file.display(), report.lines_read);
        eprintln!("Incorrect file: no access log records found in {}", log_file.display());
        process::exit(1);
    }
    info!("{} records, {} lines rejected", report.records, report.rejected.len());

    if options.from.is_some() || options.to.is_some() {
        let (first, last) = store.get_logs_datespan()?;
        let from = utility::set_boundary(&options.from, first)?;
        let to = utility::set_boundary(&options.to, last)?;
        if from > to {
            bail!("To date must be equal or greater than from date: from {} to {}", from.date(), to.date());
        }
        store.filter_logs(from, to)?;
    }

    if options.span {
        match store.get_logs_datespan() {
            Ok((first, last)) => println!("{} - {}", dates::canonical_date(&first.date()), dates::canonical_date(&last.date())),
            Err(error) => eprintln!("{}", error),
        }
    }

    if options.json {
        output::write_json(&store, stdout().lock())?;
        println!();
    } else if options.csv {
        output::write_csv(&store, stdout().lock())?;
    } else if let Some(position) = options.position {
        output::print_details_at(&store, position)?;
    } else if options.details {
        output::print_all_details(&store);
    } else if !options.span {
        output::print_view(&store);
    }

    utility::dotenv_writer(options.write_dotenv, changed_options)?;

    Ok(())
}
