use std::io::Write;

use bitkub_dca::logging::{format_record, obj, open_events_file, v_str, Domain, Level};

#[test]
fn events_file_is_created_and_appended() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("runs").join("today");

    for seq in 0..2 {
        let mut file = open_events_file(&nested).unwrap();
        let line = format_record(
            "r-sink",
            seq,
            Level::Info,
            Domain::System,
            "system.start",
            obj(&[("api_secret", v_str("do-not-log"))]),
        );
        writeln!(file, "{}", line).unwrap();
    }

    let content = std::fs::read_to_string(nested.join("events.jsonl")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(!content.contains("do-not-log"));
    for (i, line) in lines.iter().enumerate() {
        let v: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(v["seq"], i as u64);
        assert_eq!(v["data"]["api_secret"], "[REDACTED]");
    }
}
