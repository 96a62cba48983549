// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use expensebook::store::{EXPENSES_KEY, RecordStore};
use expensebook::{cli, commands::exporter, db, export};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn seeded_conn() -> Connection {
    let conn = base_conn();
    conn.set(
        EXPENSES_KEY,
        r#"[
            {"id": 1, "amount": 100, "category": "Food", "note": "Dinner, with \"friends\"", "date": "2024-06-01T19:00:00.000Z"},
            {"id": 2, "amount": 12.5, "category": "Transport", "note": "", "date": "2024-06-02T08:00:00.000Z"}
        ]"#,
    )
    .unwrap();
    conn
}

fn run_export(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["expensebook", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_csv_has_header_and_rows_in_storage_order() {
    let conn = seeded_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&conn, &["--format", "csv", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("Date,Category,Amount,Note"));
    assert_eq!(
        lines.next(),
        Some(r#"2024-06-01T19:00:00.000Z,Food,100,"Dinner, with ""friends""""#)
    );
    assert_eq!(
        lines.next(),
        Some("2024-06-02T08:00:00.000Z,Transport,12.5,")
    );
    assert_eq!(lines.next(), None);

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let first = rdr.records().next().unwrap().unwrap();
    assert_eq!(&first[3], r#"Dinner, with "friends""#);
}

#[test]
fn export_json_uses_stored_shape() {
    let conn = seeded_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&conn, &["--format", "json", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed[0]["id"], json!(1));
    assert_eq!(parsed[0]["amount"], json!(100));
    assert_eq!(parsed[1]["amount"], json!(12.5));
    assert_eq!(parsed[1]["note"], json!(""));
    assert_eq!(parsed[1]["date"], json!("2024-06-02T08:00:00.000Z"));
}

#[test]
fn export_rejects_unknown_format() {
    let conn = seeded_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(run_export(&conn, &["--format", "xml", "--out", &out_str]).is_err());
    assert!(!out_path.exists());
}

#[test]
fn export_with_no_expenses_writes_nothing() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("empty.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&conn, &["--out", &out_str]).unwrap();
    assert!(!out_path.exists());
}

#[test]
fn write_csv_to_buffer() {
    let conn = seeded_conn();
    let expenses = expensebook::store::load_expenses(&conn).unwrap();
    let mut buf = Vec::new();
    export::write_csv(&mut buf, &expenses).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.lines().count(), 3);
}
