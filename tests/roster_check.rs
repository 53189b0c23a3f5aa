//! End-to-end roster evaluation through the public API: write the demo
//! roster to disk, load it back, and run the threshold check against a
//! recording sink.

use attendance_watch::attendance::ATTENDANCE_THRESHOLD;
use attendance_watch::models::NotificationKind;
use attendance_watch::notify::{evaluate_roster, MemorySink};
use attendance_watch::roster::{load_roster, write_sample_roster};

#[test]
fn sample_roster_round_trips_and_raises_alerts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");

    let written = write_sample_roster(&path).unwrap();
    let students = load_roster(&path).unwrap();
    assert_eq!(students.len(), written);

    let mut sink = MemorySink::default();
    let evaluated = evaluate_roster(&students, ATTENDANCE_THRESHOLD, &mut sink).unwrap();

    let below: Vec<_> = evaluated
        .iter()
        .filter(|entry| entry.percentage < ATTENDANCE_THRESHOLD)
        .collect();
    assert!(!below.is_empty(), "demo roster should include at-risk students");
    assert_eq!(sink.delivered.len(), below.len());

    for payload in &sink.delivered {
        assert_eq!(payload.kind, NotificationKind::Attendance);
        assert!(payload.measured_value < ATTENDANCE_THRESHOLD);
        assert!(payload.message.contains(&payload.student_name));
    }
}

#[test]
fn raised_payloads_serialize_for_the_json_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    write_sample_roster(&path).unwrap();

    let students = load_roster(&path).unwrap();
    let mut sink = MemorySink::default();
    evaluate_roster(&students, ATTENDANCE_THRESHOLD, &mut sink).unwrap();

    let json = serde_json::to_string_pretty(&sink.delivered).unwrap();
    assert!(json.contains("\"kind\": \"attendance\""));
    assert!(json.contains("guardian_email"));
}
