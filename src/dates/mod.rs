//! Module for turning the textual dates found in access logs and in range boundaries into comparable values.
//!
//! Only explicit format strings are used, so the result never depends on the host locale.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
