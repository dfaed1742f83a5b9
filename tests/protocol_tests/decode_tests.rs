//! Decode Tests
//!
//! Tests for turning framed reply lines into command results.

use gearadmin::protocol::{decode_ok, decode_status, decode_version, decode_workers};
use gearadmin::{AdminError, FunctionStatus};

// =============================================================================
// Status Tests
// =============================================================================

#[test]
fn test_status_preserves_rows_and_order() {
    let lines = [
        "reverse\t3\t1\t2",
        "resize\t0\t0\t5",
        "email.send\t120\t4\t4",
    ];
    let status = decode_status(&lines);

    let rows: Vec<(&str, u64, u64, u64)> = status
        .values()
        .map(|r| (r.function.as_str(), r.in_queue, r.jobs_running, r.capable_workers))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("reverse", 3, 1, 2),
            ("resize", 0, 0, 5),
            ("email.send", 120, 4, 4),
        ]
    );
    assert_eq!(
        status.keys().collect::<Vec<_>>(),
        vec!["reverse", "resize", "email.send"]
    );
}

#[test]
fn test_status_decoding_is_idempotent() {
    let lines = ["a\t1\t2\t3", "b\t4\t5\t6"];
    assert_eq!(decode_status(&lines), decode_status(&lines));
}

#[test]
fn test_status_lookup_by_function() {
    let status = decode_status(&["reverse\t3\t1\t2"]);
    assert_eq!(
        status.get("reverse"),
        Some(&FunctionStatus {
            function: "reverse".to_string(),
            in_queue: 3,
            jobs_running: 1,
            capable_workers: 2,
        })
    );
}

#[test]
fn test_status_duplicate_function_last_write_wins() {
    let status = decode_status(&["a\t1\t1\t1", "b\t0\t0\t0", "a\t9\t9\t9"]);
    assert_eq!(status.len(), 2);
    assert_eq!(status["a"].in_queue, 9);
    assert_eq!(status.get_index(0).map(|(k, _)| k.as_str()), Some("a"));
}

#[test]
fn test_status_skips_malformed_lines() {
    let status = decode_status(&[
        "good\t1\t2\t3",
        "short\t1\t2",
        "long\t1\t2\t3\t4",
        "words\tmany\tsome\tfew",
        "also.good\t0\t0\t0",
    ]);
    assert_eq!(
        status.keys().collect::<Vec<_>>(),
        vec!["good", "also.good"]
    );
}

#[test]
fn test_status_empty_reply() {
    let lines: [&str; 0] = [];
    assert!(decode_status(&lines).is_empty());
}

// =============================================================================
// Version Tests
// =============================================================================

#[test]
fn test_version_strips_prefix_of_last_line() {
    assert_eq!(decode_version(&["OK", "OK 1.2.3"]).unwrap(), "1.2.3");
    assert_eq!(decode_version(&["OK 1.1.19.1"]).unwrap(), "1.1.19.1");
}

#[test]
fn test_version_of_short_line_is_empty() {
    assert_eq!(decode_version(&["OK"]).unwrap(), "");
}

#[test]
fn test_version_without_lines_fails() {
    let lines: [&str; 0] = [];
    match decode_version(&lines) {
        Err(AdminError::Decode(_)) => {}
        other => panic!("Expected decode error, got {:?}", other),
    }
}

// =============================================================================
// Workers Tests
// =============================================================================

#[test]
fn test_workers_parses_line() {
    let workers = decode_workers(&["3 127.0.0.1 client123 : func.A func.B"]);
    assert_eq!(workers.len(), 1);

    let worker = &workers[0];
    assert_eq!(worker.file_descriptor, 3);
    assert_eq!(worker.host, "127.0.0.1");
    assert_eq!(worker.job_handle, "client123");
    assert_eq!(worker.functions, "func.A func.B");
    assert_eq!(
        worker.function_names().collect::<Vec<_>>(),
        vec!["func.A", "func.B"]
    );
}

#[test]
fn test_workers_skips_unmatched_lines() {
    let workers = decode_workers(&[
        "not a worker line",
        "12 10.0.0.5 - : resize",
        "x 10.0.0.6 - : resize",
    ]);
    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0].file_descriptor, 12);
    assert_eq!(workers[0].job_handle, "-");
}

#[test]
fn test_workers_without_functions() {
    let workers = decode_workers(&["30 ::1 - :"]);
    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0].host, "::1");
    assert_eq!(workers[0].functions, "");
    assert_eq!(workers[0].function_names().count(), 0);
}

#[test]
fn test_workers_colon_without_space() {
    let workers = decode_workers(&["4\thost\tid :a,b"]);
    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0].host, "host");
    assert_eq!(workers[0].job_handle, "id");
    assert_eq!(
        workers[0].function_names().collect::<Vec<_>>(),
        vec!["a", "b"]
    );
}

// =============================================================================
// OK Tests
// =============================================================================

#[test]
fn test_ok_checks_last_line_exactly() {
    assert!(decode_ok(&["OK"]));
    assert!(decode_ok(&["something", "OK"]));
    assert!(!decode_ok(&["OK", "done"]));
    assert!(!decode_ok(&["ok"]));
    assert!(!decode_ok(&["OK 1.0"]));

    let lines: [&str; 0] = [];
    assert!(!decode_ok(&lines));
}
