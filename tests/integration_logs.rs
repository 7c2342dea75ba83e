use std::io::Write;
use logbrowser::{dates, LogError, LogStore, PointInTime, ResponseSize};
use tempfile::NamedTempFile;

const JULY_LOG: &str = r#"199.72.81.55 - - [01/Jul/1995:00:00:01 -0400] "GET /history/apollo/ HTTP/1.0" 200 6245
unicomp6.unicomp.net - - [01/Jul/1995:00:00:06 -0400] "GET /shuttle/countdown/ HTTP/1.0" 200 3985
burger.letters.com - - [03/Jul/1995:00:00:12 -0400] "GET /shuttle/countdown/video/livevideo.gif HTTP/1.0" 200 0
d104.aa.net - - [05/Jul/1995:00:00:13 -0400] "GET /shuttle/countdown/ HTTP/1.0" 200 3985
this line is garbage
klothos.crl.research.digital.com - - [10/Jul/1995:16:45:50 -0400] "" 400 -
129.94.144.152 - - [12/Jul/1995:00:00:17 -0400] "GET /images/ksclogo-medium.gif HTTP/1.0" 304 -
firewall.dfw.ibm.com - - [20/Jul/1995:07:34:34 -0400] "1/history/apollo/images/" 400 -
"#;

fn log_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

fn point(text: &str) -> PointInTime {
    dates::parse_point_in_time(text).unwrap()
}

fn view_lines(store: &LogStore) -> Vec<String> {
    store.view().map(|(line, _)| line.to_string()).collect()
}

#[test]
fn read_logs_skips_malformed_lines() {
    let file = log_file(JULY_LOG.as_bytes());
    let mut store = LogStore::new();
    let report = store.read_logs(file.path()).unwrap();

    assert_eq!(report.lines_read, 8);
    assert_eq!(report.records, 7);
    assert_eq!(report.rejected.len(), 1);
    assert!(report.rejected.iter().all(LogError::is_per_line));
    assert!(matches!(&report.rejected[0], LogError::MalformedLine { line_number: 5, line } if line == "this line is garbage"));
    assert_eq!(store.view_len(), 7);
    assert!(store.view_len() <= report.lines_read);
    assert_eq!(store.record_at(4).unwrap().method, None);
    assert_eq!(store.record_at(5).unwrap().response_size, ResponseSize::NotRecorded);
    assert_eq!(store.record_at(2).unwrap().response_size, ResponseSize::Bytes(0));
}

#[test]
fn read_logs_all_lines_valid() {
    let content: String = JULY_LOG.lines().filter(|line| !line.contains("garbage")).map(|line| format!("{}\r\n", line)).collect();
    let file = log_file(content.as_bytes());
    let mut store = LogStore::new();
    let report = store.read_logs(file.path()).unwrap();

    assert_eq!(report.lines_read, 7);
    assert_eq!(store.view_len(), report.lines_read);
    assert!(report.rejected.is_empty());
    assert!(store.view().all(|(line, _)| !line.ends_with('\r')));
}

#[test]
fn read_logs_carriage_return_line_endings() {
    let content: String = JULY_LOG.lines().filter(|line| !line.contains("garbage")).map(|line| format!("{}\r", line)).collect();
    let file = log_file(content.as_bytes());
    let mut store = LogStore::new();
    let report = store.read_logs(file.path()).unwrap();

    assert_eq!(report.lines_read, 7);
    assert_eq!(report.records, 7);
    assert!(report.rejected.is_empty());
    assert_eq!(store.record_at(0).unwrap().remote_host, "199.72.81.55");
    assert_eq!(store.record_at(0).unwrap().response_size, ResponseSize::Bytes(6245));
    assert_eq!(store.record_at(1).unwrap().remote_host, "unicomp6.unicomp.net");
    assert_eq!(store.get_logs_datespan().unwrap(), (point("1995-07-01"), point("1995-07-20")));
}

#[test]
fn datespan_filter_and_reset() {
    let file = log_file(JULY_LOG.as_bytes());
    let mut store = LogStore::new();
    store.read_logs(file.path()).unwrap();

    assert_eq!(store.get_logs_datespan().unwrap(), (point("1995-07-01"), point("1995-07-20")));

    let (min, max) = (point("1995-07-03"), point("1995-07-10"));
    store.filter_logs(min, max).unwrap();
    assert!(store.view().all(|(_, record)| min <= record.point_in_time() && record.point_in_time() <= max));
    let manual_count = store.all_records().iter().filter(|record| min <= record.point_in_time() && record.point_in_time() <= max).count();
    assert_eq!(store.view_len(), manual_count);
    assert_eq!(store.view_len(), 3);
    assert_eq!(store.get_logs_datespan().unwrap(), (point("1995-07-03"), point("1995-07-10")));

    // a narrower filter after a wider one derives from all records again
    store.filter_logs(point("1995-07-12"), point("1995-07-20")).unwrap();
    assert_eq!(store.view_len(), 2);

    store.reset_filtering();
    let all_lines: Vec<String> = store.all_records().iter().map(|record| record.raw_line.clone()).collect();
    assert_eq!(view_lines(&store), all_lines);
}

#[test]
fn filter_logs_is_idempotent() {
    let file = log_file(JULY_LOG.as_bytes());
    let mut store = LogStore::new();
    store.read_logs(file.path()).unwrap();

    store.filter_logs(point("1995-07-01"), point("1995-07-05")).unwrap();
    let once = view_lines(&store);
    store.filter_logs(point("1995-07-01"), point("1995-07-05")).unwrap();
    assert_eq!(view_lines(&store), once);
    assert_eq!(once.len(), 4);
}

#[test]
fn duplicate_lines_are_kept() {
    let line = r#"199.72.81.55 - - [01/Jul/1995:00:00:01 -0400] "GET /history/apollo/ HTTP/1.0" 200 6245"#;
    let file = log_file(format!("{}\n{}\n", line, line).as_bytes());
    let mut store = LogStore::new();
    let report = store.read_logs(file.path()).unwrap();

    assert_eq!(report.records, 2);
    assert_eq!(store.view_len(), 2);
    assert_eq!(store.get_by_line(line).unwrap().line_number, 2);
}

#[test]
fn read_logs_replaces_previous_records() {
    let first = log_file(JULY_LOG.as_bytes());
    let second = log_file(br#"host - - [02/Aug/1995:10:00:00 +0000] "GET /x HTTP/1.0" 200 1
"#);
    let mut store = LogStore::new();
    store.read_logs(first.path()).unwrap();
    store.filter_logs(point("1995-07-01"), point("1995-07-01")).unwrap();

    store.read_logs(second.path()).unwrap();
    assert!(!store.is_filtered());
    assert_eq!(store.all_records().len(), 1);
    assert_eq!(store.record_at(0).unwrap().timezone, "UTC");
    assert_eq!(store.get_logs_datespan().unwrap(), (point("1995-08-02"), point("1995-08-02")));
}

#[test]
fn missing_file_keeps_previous_state() {
    let file = log_file(JULY_LOG.as_bytes());
    let mut store = LogStore::new();
    store.read_logs(file.path()).unwrap();

    let directory = tempfile::tempdir().unwrap();
    let result = store.read_logs(directory.path().join("no_such_file"));
    assert!(matches!(result, Err(LogError::FileAccess { .. })));
    assert_eq!(store.all_records().len(), 7);
}

#[test]
fn empty_file_has_no_records() {
    let file = log_file(b"");
    let mut store = LogStore::new();
    let report = store.read_logs(file.path()).unwrap();

    assert_eq!(report.lines_read, 0);
    assert_eq!(store.view_len(), 0);
    assert!(matches!(store.get_logs_datespan(), Err(LogError::EmptyView)));
    assert!(matches!(store.filter_logs(point("1995-07-01"), point("1995-07-31")), Err(LogError::EmptyView)));
}

#[test]
fn invalid_utf8_line_is_rejected() {
    let mut content = b"host - - [01/Jul/1995:00:00:01 -0400] \"GET /\xff HTTP/1.0\" 200 1\n".to_vec();
    content.extend_from_slice(b"host - - [01/Jul/1995:00:00:02 -0400] \"GET / HTTP/1.0\" 200 1\n");
    let file = log_file(&content);
    let mut store = LogStore::new();
    let report = store.read_logs(file.path()).unwrap();

    assert_eq!(report.lines_read, 2);
    assert_eq!(report.records, 1);
    assert!(matches!(report.rejected[0], LogError::MalformedLine { line_number: 1, .. }));
}

#[test]
fn export_active_view() {
    let file = log_file(JULY_LOG.as_bytes());
    let mut store = LogStore::new();
    store.read_logs(file.path()).unwrap();
    store.filter_logs(point("1995-07-10"), point("1995-07-10")).unwrap();

    let mut json = Vec::new();
    logbrowser::output::write_json(&store, &mut json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["remote_host"], "klothos.crl.research.digital.com");
    assert!(value[0]["response_size"].is_null());

    let mut csv = Vec::new();
    logbrowser::output::write_csv(&store, &mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("line_number,remote_host,date,time,timezone,method,path,status_code,response_size,raw_line"));
    assert!(lines.next().unwrap().starts_with("6,klothos.crl.research.digital.com,1995-07-10,16:45:50,UTC-04:00,,,400,,"));
}
