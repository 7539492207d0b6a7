// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Field codec tests: wire decoding, canonical re-encoding, and the
//! absent-versus-null distinction on partial payloads.

mod common;

use jiff::civil::Time;
use serde_json::json;
use things_cloud_core::{
    Destination, RecordId, Snapshot, Status, decode, encode_full,
};

use common::{fake_midnight, fixed_clock, test_todo};

fn record_id(value: &str) -> RecordId {
    value.parse().unwrap()
}

fn snapshot(value: serde_json::Value) -> Snapshot {
    let serde_json::Value::Object(map) = value else {
        panic!("payload must be an object");
    };
    map.into()
}

/// A full wire object in the server's canonical shape.
fn full_payload() -> Snapshot {
    snapshot(json!({
        "ix": 1234,
        "tt": "test task",
        "ss": 0,
        "st": 1,
        "cd": 1_641_234_567.0,
        "md": 1_641_234_567.0,
        "sr": null,
        "tir": null,
        "sp": null,
        "dd": null,
        "tr": false,
        "icp": false,
        "pr": ["ABCd1ee0ykmXYZqT98huxa"],
        "ar": [],
        "sb": 0,
        "tg": [],
        "tp": 0,
        "dds": null,
        "rt": [],
        "rmd": null,
        "dl": [],
        "do": 0,
        "lai": null,
        "agr": [],
        "lt": false,
        "icc": 0,
        "ti": 0,
        "ato": null,
        "icsd": null,
        "rp": null,
        "acrd": null,
        "rr": null,
        "nt": {"_t": "tx", "ch": 0, "v": "", "t": 0}
    }))
}

#[test]
fn decode_full_wire_object() {
    let id = record_id("Aaaaaaaaaaaaaaaaaaaaaa");
    let todo = decode(id.clone(), &full_payload(), fixed_clock()).unwrap();

    assert_eq!(todo.id(), &id);
    assert_eq!(todo.order_index(), 1234);
    assert_eq!(todo.title(), "test task");
    assert_eq!(todo.status(), Status::Todo);
    assert_eq!(todo.destination(), Destination::Anytime);
    assert_eq!(todo.creation_date().as_second(), 1_641_234_567);
    assert_eq!(todo.modification_date().as_second(), 1_641_234_567);
    assert_eq!(todo.scheduled_date(), None);
    assert_eq!(todo.completion_date(), None);
    assert_eq!(todo.due_date(), None);
    assert!(!todo.trashed());
    assert!(!todo.instance_creation_paused());
    assert_eq!(
        todo.project().map(RecordId::as_str),
        Some("ABCd1ee0ykmXYZqT98huxa")
    );
    assert_eq!(todo.area(), None);
    assert!(!todo.is_evening());
    assert_eq!(todo.reminder(), None);
    assert_eq!(todo.note().value, "");
}

#[test]
fn decode_then_encode_reproduces_wire_object() {
    let payload = full_payload();
    let todo = decode(record_id("Aaaaaaaaaaaaaaaaaaaaaa"), &payload, fixed_clock()).unwrap();
    assert_eq!(encode_full(&todo), payload);
}

#[test]
fn encode_then_decode_reproduces_record() {
    let mut todo = test_todo("round trip");
    todo.today();
    todo.set_due_date(Some(fake_midnight()));
    todo.set_reminder(Some(Time::new(18, 30, 0, 0).unwrap()));
    todo.set_note("some note");
    todo.complete().unwrap();

    let decoded = decode(todo.id().clone(), &encode_full(&todo), fixed_clock()).unwrap();

    assert_eq!(decoded.id(), todo.id());
    assert_eq!(decoded.title(), todo.title());
    assert_eq!(decoded.status(), todo.status());
    assert_eq!(decoded.destination(), todo.destination());
    assert_eq!(decoded.creation_date(), todo.creation_date());
    assert_eq!(decoded.modification_date(), todo.modification_date());
    assert_eq!(decoded.scheduled_date(), todo.scheduled_date());
    assert_eq!(decoded.completion_date(), todo.completion_date());
    assert_eq!(decoded.due_date(), todo.due_date());
    assert_eq!(decoded.reminder(), todo.reminder());
    assert_eq!(decoded.note(), todo.note());
    assert!(decoded.is_today());
}

#[test]
fn encoded_evening_flag_is_a_bit() {
    let mut todo = test_todo("evening task");
    todo.evening();
    let snapshot = encode_full(&todo);
    assert_eq!(snapshot.get("sb"), Some(&1.into()));
    assert_eq!(snapshot.get("st"), Some(&1.into()));
}

#[test]
fn encoded_reminder_is_seconds_since_midnight() {
    let mut todo = test_todo("with reminder");
    todo.set_reminder(Some(Time::new(6, 30, 0, 0).unwrap()));
    let snapshot = encode_full(&todo);
    assert_eq!(snapshot.get("ato"), Some(&23_400.into()));
}

#[test]
fn absent_field_keeps_default_but_null_clears() {
    // absent "dd": the due date stays untouched
    let sparse = snapshot(json!({"tt": "sparse"}));
    let todo = decode(record_id("Aaaaaaaaaaaaaaaaaaaaaa"), &sparse, fixed_clock()).unwrap();
    assert_eq!(todo.title(), "sparse");
    assert_eq!(todo.status(), Status::Todo);
    assert_eq!(todo.destination(), Destination::Inbox);

    // present null "rr": explicit clear decodes to None
    let cleared = snapshot(json!({"rr": null}));
    let todo = decode(record_id("Aaaaaaaaaaaaaaaaaaaaaa"), &cleared, fixed_clock()).unwrap();
    assert_eq!(todo.title(), "");
}

#[test]
fn unknown_keys_are_ignored() {
    let payload = snapshot(json!({"tt": "future proof", "zz": {"whatever": 1}}));
    let todo = decode(record_id("Aaaaaaaaaaaaaaaaaaaaaa"), &payload, fixed_clock()).unwrap();
    assert_eq!(todo.title(), "future proof");
}

#[test]
fn malformed_value_rejects_whole_record() {
    let payload = snapshot(json!({"tt": "ok", "ss": "broken"}));
    let err = decode(record_id("Aaaaaaaaaaaaaaaaaaaaaa"), &payload, fixed_clock())
        .expect_err("bad status must reject the record");
    assert!(err.to_string().contains("ss"));
}

#[test]
fn integer_timestamps_decode_as_seconds() {
    let payload = snapshot(json!({"cd": 1_641_234_567, "sr": 1_641_168_000}));
    let todo = decode(record_id("Aaaaaaaaaaaaaaaaaaaaaa"), &payload, fixed_clock()).unwrap();
    assert_eq!(todo.creation_date().as_second(), 1_641_234_567);
    assert_eq!(todo.scheduled_date().map(|ts| ts.as_second()), Some(1_641_168_000));
}
