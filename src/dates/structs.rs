//! The structs
//!
use chrono::NaiveDateTime;

/// The canonical, comparable point in time.
///
/// Access log dates carry their own UTC offset, which is kept as text on the record.
/// Range boundaries from the user have no offset at all, so comparisons happen on the naive value.
pub type PointInTime = NaiveDateTime;

/// The date and time formats accepted by `parse_point_in_time`, tried in order before `DATE_FORMATS`.
///
/// The first is the timestamp form inside access log lines (`17/Jul/1995:00:00:01`),
/// the others are the canonical date with a time.
pub const DATETIME_FORMATS: [&str; 3] = [
    "%d/%b/%Y:%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];
/// The date only formats: the access log date (`17/Jul/1995`) and the canonical date.
pub const DATE_FORMATS: [&str; 2] = [
    "%d/%b/%Y",
    "%Y-%m-%d",
];

/// The canonical form dates are rendered in.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";
