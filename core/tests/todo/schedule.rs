// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Today/Evening derivation and scheduled-date mirroring.

use things_cloud_core::Destination;

use crate::common::{fake_midnight, test_todo};

#[test]
fn fresh_todo_is_not_today() {
    let todo = test_todo("test task");
    assert!(!todo.is_today());
    assert!(!todo.is_evening());
}

#[test]
fn today_schedules_for_local_midnight() {
    let mut todo = test_todo("test task");
    todo.today();
    assert!(todo.is_today());
    assert!(!todo.is_evening());
    assert_eq!(todo.destination(), Destination::Anytime);
    assert_eq!(todo.scheduled_date(), Some(fake_midnight()));
}

#[test]
fn evening_implies_today() {
    let mut todo = test_todo("test task");
    todo.evening();
    assert!(todo.is_today());
    assert!(todo.is_evening());
    assert_eq!(todo.destination(), Destination::Anytime);
    assert_eq!(todo.scheduled_date(), Some(fake_midnight()));
}

#[test]
fn scheduled_date_mirrors_into_reference_date() {
    let mut todo = test_todo("test task");
    todo.set_scheduled_date(Some(fake_midnight()));
    assert_eq!(todo.scheduled_date(), Some(fake_midnight()));

    // the mirror travels on the wire under its own key
    let snapshot = things_cloud_core::encode_full(&todo);
    assert_eq!(snapshot.get("sr"), snapshot.get("tir"));
}

#[test]
fn clearing_scheduled_date_clears_mirror() {
    let mut todo = test_todo("test task");
    todo.set_scheduled_date(Some(fake_midnight()));
    todo.set_scheduled_date(None);

    let snapshot = things_cloud_core::encode_full(&todo);
    assert_eq!(snapshot.get("sr"), Some(&serde_json::Value::Null));
    assert_eq!(snapshot.get("tir"), Some(&serde_json::Value::Null));
}

#[test]
fn someday_item_scheduled_today_is_not_today() {
    let mut todo = test_todo("test task");
    todo.today();
    todo.set_destination(Destination::Someday).unwrap();
    assert!(!todo.is_today());
    assert!(!todo.is_evening());
}
