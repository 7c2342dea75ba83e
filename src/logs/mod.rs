//! Module for reading web server access log files and filtering the parsed records by date.
//!
//! Every line of the file is matched against two forms of the common log format.
//! The first form also allows a `-` response size, the second allows any number of trailing request line tokens.
//! Lines matching neither form are reported and skipped, the read continues.
//!
//! The store keeps all parsed records in file order, and exposes an active view:
//! all records after a read or a reset, or the records within a date range after `filter_logs`.
//!
mod structs;
mod functions;

pub use structs::*;
