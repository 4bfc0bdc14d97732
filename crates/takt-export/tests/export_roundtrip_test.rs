// tests/export_roundtrip_test.rs
// Full pipeline: step definitions through the scheduler onto a CSV sheet.

use takt_core::testing::fixtures::{plain_step, zone_step};
use takt_core::{schedule_and_export, TicketOptions, WaitPolicy};
use takt_export::{open_sheet, CsvSheet};

#[test]
fn export_writes_a_readable_ticket() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ticket.csv");

    let defs = vec![
        plain_step(1, "prep", 5.0),
        zone_step(2, "EC1", 4.0, "Z", None),
        zone_step(3, "EC2", 6.0, "Z", None),
    ];
    let opts = TicketOptions::new(1.0, WaitPolicy::Before, "L7");

    let mut sheet = CsvSheet::create(&path);
    let schedule = schedule_and_export(&defs, 3, &opts, &mut sheet).expect("export succeeds");

    let content = std::fs::read_to_string(&path).expect("ticket written");
    let mut lines = content.lines();
    let header = lines.next().expect("header row");
    assert!(header.starts_with("Continuous-feed wait times (L7),Vehicle,Item,Time"));

    // One grid column per second of the makespan.
    let grid_cols = header.matches("1.0").count();
    assert_eq!(grid_cols, schedule.max_time.ceil() as usize);

    // Every step of every vehicle appears as a row, bars as fill markers.
    for display in ["prep", "EC1", "EC2"] {
        assert_eq!(
            content.matches(&format!(",,{display},")).count(),
            3,
            "{display} should appear once per vehicle"
        );
    }
    assert!(content.contains('#'));
}

#[test]
fn export_through_runtime_selected_backend() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ticket.csv");
    let dest = path.to_string_lossy().to_string();

    let defs = vec![plain_step(1, "only", 2.0)];
    let opts = TicketOptions::default();

    let mut sheet = open_sheet(&dest).expect("csv backend selected");
    schedule_and_export(&defs, 1, &opts, sheet.as_mut()).expect("export succeeds");

    assert!(path.exists());
}
