//! The structs
//!
use std::{collections::HashMap, fmt};
use chrono::{NaiveDate, NaiveTime};
use crate::error::LogError;

/// Grammar form 1: a response size of digits or `-`, and at most three tokens after the path.
pub const LOGLINE_FORM_1: &str = r#"^(\S+) \S+ \S+ \[(\d{2}/\w{3}/\d{4}):(\d{2}:\d{2}:\d{2}) ([-+]\d{4})\] "([A-Z]+ )?([^\s"]*)(?:\s+\S*){0,3}" (\d{3}) (\d+|-)$"#;
/// Grammar form 2: a numeric response size, and any number of tokens after the path.
pub const LOGLINE_FORM_2: &str = r#"^(\S+) \S+ \S+ \[(\d{2}/\w{3}/\d{4}):(\d{2}:\d{2}:\d{2}) ([-+]\d{4})\] "([A-Z]+ )?([^\s"]*)(?:\s+\S*)*" (\d{3}) (\d+)$"#;

/// The number of bytes sent, as logged in the last field of a line.
///
/// A `-` means the server did not record a size, which is different from a size of zero.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(into = "Option<u64>")]
pub enum ResponseSize {
    NotRecorded,
    Bytes(u64),
}

impl From<ResponseSize> for Option<u64> {
    fn from(size: ResponseSize) -> Self {
        match size {
            ResponseSize::NotRecorded => None,
            ResponseSize::Bytes(bytes) => Some(bytes),
        }
    }
}

impl fmt::Display for ResponseSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseSize::NotRecorded => write!(f, "-"),
            ResponseSize::Bytes(bytes) => write!(f, "{} B", bytes),
        }
    }
}

/// One parsed access log line.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// 1-based line number in the source file.
    pub line_number: usize,
    pub remote_host: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// The canonical offset name, for example `UTC-04:00`.
    pub timezone: String,
    /// `None` when the request line had no method.
    pub method: Option<String>,
    pub path: String,
    /// Always three digits.
    pub status_code: String,
    pub response_size: ResponseSize,
    /// The source line, without line terminator.
    pub raw_line: String,
}

/// Which records the store currently exposes.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum ActiveView {
    /// All records, in file order.
    #[default]
    All,
    /// Ascending positions into the full record set.
    Filtered(Vec<usize>),
}

/// The outcome of a `read_logs` call.
///
/// Rejected lines are handed back to the caller to decide how to present them.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub lines_read: usize,
    pub records: usize,
    pub rejected: Vec<LogError>,
}

/// The parsed records of one log file, and the active view over them.
///
/// All mutating calls replace state wholesale and take `&mut self`,
/// so a reader always sees the state before or after a call, never a partial rebuild.
#[derive(Debug, Default)]
pub struct LogStore {
    pub(crate) records: Vec<LogRecord>,
    /// Raw line to position of its last occurrence in `records`.
    pub(crate) line_index: HashMap<String, usize>,
    pub(crate) view: ActiveView,
}
