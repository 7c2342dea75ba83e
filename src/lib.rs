//! Read web server access logs in the common log format, and browse them by date.
//!
//! ```no_run
//! use logbrowser::{dates, LogStore};
//!
//! let mut store = LogStore::new();
//! let report = store.read_logs("access_log_Jul95")?;
//! println!("{} of {} lines parsed", report.records, report.lines_read);
//!
//! let (first, last) = store.get_logs_datespan()?;
//! store.filter_logs(dates::parse_point_in_time("1995-07-05")?, last)?;
//! for (line, record) in store.view() {
//!     println!("{} {} {}", record.date, record.status_code, line);
//! }
//! store.reset_filtering();
//! # let _ = first;
//! # Ok::<(), logbrowser::LogError>(())
//! ```
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod dates;
pub mod error;
pub mod logs;
pub mod output;
pub mod utility;

pub use dates::PointInTime;
pub use error::LogError;
pub use logs::{IngestReport, LogRecord, LogStore, ResponseSize};
