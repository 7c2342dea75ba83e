//! The impls and functions.
//!
use std::{collections::HashMap, fs::File, io::{self, BufRead, BufReader}, path::Path, time::Instant};
use chrono::NaiveTime;
use log::*;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use crate::dates::{self, PointInTime};
use crate::error::LogError;
use crate::logs::{ActiveView, IngestReport, LogRecord, LogStore, ResponseSize, LOGLINE_FORM_1, LOGLINE_FORM_2};

static LOGLINE_FORMS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(LOGLINE_FORM_1).expect("invalid logline form 1"),
        Regex::new(LOGLINE_FORM_2).expect("invalid logline form 2"),
    ]
});

impl LogRecord {
    /// Parse a single line (without terminator) into a record.
    ///
    /// The forms are tried in order, the first match wins.
    pub fn parse(
        line_number: usize,
        line: &str,
    ) -> Result<LogRecord, LogError>
    {
        let captures = LOGLINE_FORMS
            .iter()
            .find_map(|form| form.captures(line))
            .ok_or_else(|| LogError::MalformedLine { line_number, line: line.to_string() })?;

        LogRecord::from_captures(line_number, line, &captures)
    }
    fn from_captures(
        line_number: usize,
        line: &str,
        captures: &Captures<'_>,
    ) -> Result<LogRecord, LogError>
    {
        let date = dates::parse_date(&captures[2])?;
        let time = NaiveTime::parse_from_str(&captures[3], "%H:%M:%S")
            .map_err(|_| LogError::MalformedDate { text: captures[3].to_string() })?;
        let timezone = dates::canonical_offset_name(&dates::parse_utc_offset(&captures[4])?);
        let response_size = match &captures[8] {
            "-" => ResponseSize::NotRecorded,
            digits => ResponseSize::Bytes(digits
                .parse()
                .map_err(|_| LogError::MalformedLine { line_number, line: line.to_string() })?
            ),
        };

        Ok(LogRecord {
            line_number,
            remote_host: captures[1].to_string(),
            date,
            time,
            timezone,
            method: captures.get(5).map(|method| method.as_str().trim_end().to_string()),
            path: captures[6].to_string(),
            status_code: captures[7].to_string(),
            response_size,
            raw_line: line.to_string(),
        })
    }
    /// The value used for the date span and for filtering: the record date at midnight.
    pub fn point_in_time(&self) -> PointInTime {
        self.date.and_time(NaiveTime::MIN)
    }
}

/// Split a chunk read up to and including `\n` into lines without terminators.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
fn split_lines(chunk: &[u8]) -> impl Iterator<Item = &[u8]> {
    let chunk = chunk.strip_suffix(b"\n").unwrap_or(chunk);
    let chunk = chunk.strip_suffix(b"\r").unwrap_or(chunk);
    chunk.split(|&byte| byte == b'\r')
}

impl LogStore {
    pub fn new() -> Self { Default::default() }
    /// Read and parse all lines of the file at `path`, replacing any previously read records.
    ///
    /// A file that cannot be opened or read fails the whole call and leaves the store as it was.
    /// A line that does not parse is logged, added to the returned report, and skipped.
    pub fn read_logs<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<IngestReport, LogError>
    {
        let path = path.as_ref();
        info!("begin read logs: {}", path.display());
        let timer = Instant::now();

        let file_access = |source: io::Error| LogError::FileAccess { path: path.to_path_buf(), source };
        let mut reader = BufReader::new(File::open(path).map_err(file_access)?);

        let mut records: Vec<LogRecord> = Vec::new();
        let mut line_index: HashMap<String, usize> = HashMap::new();
        let mut report = IngestReport::default();
        let mut buffer: Vec<u8> = Vec::new();

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer).map_err(file_access)? == 0 {
                break;
            }
            for raw_line in split_lines(&buffer) {
                report.lines_read += 1;
                let line_number = report.lines_read;

                let parsed = match std::str::from_utf8(raw_line) {
                    Ok(line) => LogRecord::parse(line_number, line),
                    Err(_) => Err(LogError::MalformedLine { line_number, line: String::from_utf8_lossy(raw_line).to_string() }),
                };
                match parsed {
                    Ok(record) => {
                        line_index.insert(record.raw_line.clone(), records.len());
                        records.push(record);
                    },
                    Err(error) => {
                        warn!("skipping line {}: {}", line_number, error);
                        report.rejected.push(error);
                    },
                }
            }
        }

        report.records = records.len();
        self.records = records;
        self.line_index = line_index;
        self.view = ActiveView::All;

        info!("end read logs: {} lines, {} records, {} rejected, {:?}", report.lines_read, report.records, report.rejected.len(), timer.elapsed());
        Ok(report)
    }
    /// The dates of the first and the last record of the active view.
    ///
    /// These are taken in view order, which is file order; for a date ordered log this is the earliest and latest date.
    pub fn get_logs_datespan(&self) -> Result<(PointInTime, PointInTime), LogError> {
        let last_position = self.view_len().checked_sub(1).ok_or(LogError::EmptyView)?;
        let first = self.record_at(0).ok_or(LogError::EmptyView)?;
        let last = self.record_at(last_position).ok_or(LogError::EmptyView)?;
        Ok((first.point_in_time(), last.point_in_time()))
    }
    /// Set the active view to the records with a date in `[min_date, max_date]`.
    ///
    /// This always selects from the full set of records, never from a previous filter result.
    /// The caller makes sure `min_date <= max_date`.
    pub fn filter_logs(
        &mut self,
        min_date: PointInTime,
        max_date: PointInTime,
    ) -> Result<(), LogError>
    {
        if self.records.is_empty() {
            return Err(LogError::EmptyView);
        }
        let positions: Vec<usize> = self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| (min_date..=max_date).contains(&record.point_in_time()))
            .map(|(position, _)| position)
            .collect();
        debug!("filter {} - {}: {} of {} records", min_date, max_date, positions.len(), self.records.len());
        self.view = ActiveView::Filtered(positions);
        Ok(())
    }
    pub fn reset_filtering(&mut self) {
        self.view = ActiveView::All;
    }
    pub fn is_filtered(&self) -> bool {
        matches!(self.view, ActiveView::Filtered(_))
    }
    /// All records of the last read, in file order.
    pub fn all_records(&self) -> &[LogRecord] {
        &self.records
    }
    pub fn view_len(&self) -> usize {
        match &self.view {
            ActiveView::All => self.records.len(),
            ActiveView::Filtered(positions) => positions.len(),
        }
    }
    /// The record at `position` in the active view.
    pub fn record_at(&self, position: usize) -> Option<&LogRecord> {
        match &self.view {
            ActiveView::All => self.records.get(position),
            ActiveView::Filtered(positions) => positions.get(position).and_then(|&index| self.records.get(index)),
        }
    }
    /// The active view as `(raw line, record)` pairs, in file order.
    pub fn view(&self) -> impl Iterator<Item = (&str, &LogRecord)> + '_ {
        (0..self.view_len())
            .filter_map(move |position| self.record_at(position))
            .map(|record| (record.raw_line.as_str(), record))
    }
    /// Look up a record of the active view by its raw line.
    ///
    /// When a line occurs more than once in the file, the last occurrence is returned.
    pub fn get_by_line(&self, raw_line: &str) -> Option<&LogRecord> {
        let index = *self.line_index.get(raw_line)?;
        match &self.view {
            ActiveView::All => self.records.get(index),
            ActiveView::Filtered(positions) => positions
                .binary_search(&index)
                .ok()
                .and_then(|_| self.records.get(index)),
        }
    }
    pub fn previous_position(&self, position: usize) -> Option<usize> {
        position.checked_sub(1).filter(|&previous| previous < self.view_len())
    }
    pub fn next_position(&self, position: usize) -> Option<usize> {
        position.checked_add(1).filter(|&next| next < self.view_len())
    }
}
