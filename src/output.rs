//! Printing and exporting the active view of a `LogStore`.
use std::io::Write;
use anyhow::{Context, Result};
use colored::*;
use log::*;
use crate::dates;
use crate::logs::{LogRecord, LogStore};

pub fn colored_status_code(status_code: &str) -> ColoredString {
    match status_code.as_bytes().first() {
        Some(b'2') => status_code.green(),
        Some(b'3') => status_code.cyan(),
        Some(b'4') => status_code.yellow(),
        Some(b'5') => status_code.red(),
        _ => status_code.underline(),
    }
}

/// The raw line of a record with its status code coloured.
///
/// Both grammar forms end in `<status code> <size>`, so the status code is the second last field.
pub fn colored_line(record: &LogRecord) -> String {
    let mut fields = record.raw_line.rsplitn(3, ' ');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(size), Some(_), Some(request)) => format!("{} {} {}", request, colored_status_code(&record.status_code), size),
        _ => record.raw_line.clone(),
    }
}

/// Print the raw line of every record of the active view, with the status code coloured by class.
pub fn print_view(store: &LogStore) {
    info!("print view: {} records", store.view_len());
    for (_, record) in store.view() {
        println!("{:6} {}", record.line_number, colored_line(record));
    }
}

/// The fields of a single record, one per line.
pub fn detail_pane(record: &LogRecord) -> String {
    format!("Remote host: {}\nDate:        {}\nTime:        {}  Timezone: {}\nStatus code: {}  Method: {}\nResources:   {}\nSize:        {}\n",
            record.remote_host,
            dates::canonical_date(&record.date),
            record.time,
            record.timezone,
            record.status_code,
            record.method.as_deref().unwrap_or(""),
            record.path,
            record.response_size,
    )
}

/// Print the detail pane of the record at `position` of the active view, and whether there is a previous and next record.
pub fn print_details_at(store: &LogStore, position: usize) -> Result<()> {
    let record = store
        .record_at(position)
        .with_context(|| format!("No record at position {} (view has {} records)", position, store.view_len()))?;
    println!("{}", record.raw_line.bold());
    print!("{}", detail_pane(record));
    println!("Previous: {}  Next: {}",
             store.previous_position(position).map_or("-".to_string(), |previous| previous.to_string()),
             store.next_position(position).map_or("-".to_string(), |next| next.to_string()),
    );
    Ok(())
}

pub fn print_all_details(store: &LogStore) {
    for (line, record) in store.view() {
        println!("{}", line.bold());
        println!("{}", detail_pane(record));
    }
}

pub fn write_json<W: Write>(store: &LogStore, writer: W) -> Result<()> {
    let records: Vec<&LogRecord> = store.view().map(|(_, record)| record).collect();
    serde_json::to_writer_pretty(writer, &records)
        .with_context(|| "Error writing records as json")?;
    Ok(())
}

pub fn write_csv<W: Write>(store: &LogStore, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for (_, record) in store.view() {
        writer.serialize(record)
            .with_context(|| format!("Error writing record of line {} as csv", record.line_number))?;
    }
    writer.flush()
        .with_context(|| "Error flushing csv output")?;
    Ok(())
}
