// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Project/area assignment: mutual exclusivity, inbox promotion, and
//! self-reference rejection.

use things_cloud_core::{Destination, RecordId, TransitionError};

use crate::common::test_todo;

fn record_id(value: &str) -> RecordId {
    value.parse().unwrap()
}

#[test]
fn assign_project_id() {
    let mut todo = test_todo("test task");
    todo.set_project_id(Some(record_id("ABCd1ee0ykmXYZqT98huxa")))
        .unwrap();
    assert_eq!(todo.project().map(things_cloud_core::RecordId::as_str), Some("ABCd1ee0ykmXYZqT98huxa"));
    assert_eq!(todo.area(), None);
    assert_eq!(todo.destination(), Destination::Anytime);
}

#[test]
fn assign_project_record() {
    let mut project = test_todo("test project");
    project.as_project().unwrap();

    let mut todo = test_todo("test task");
    todo.assign_project(&project).unwrap();
    assert_eq!(todo.project(), Some(project.id()));
    assert_eq!(todo.area(), None);
    assert_eq!(todo.destination(), Destination::Anytime);
}

#[test]
fn assign_non_project_record_is_rejected() {
    let not_project = test_todo("not project");
    let mut todo = test_todo("test task");
    assert_eq!(
        todo.assign_project(&not_project),
        Err(TransitionError::NotAProject)
    );
    assert_eq!(todo.project(), None);
    assert_eq!(todo.destination(), Destination::Inbox);
}

#[test]
fn assign_self_is_rejected() {
    let mut todo = test_todo("test task");
    let own_id = todo.id().clone();
    assert_eq!(
        todo.set_project_id(Some(own_id)),
        Err(TransitionError::SelfAsProject)
    );
    assert_eq!(todo.project(), None);
}

#[test]
fn project_clears_area() {
    let mut todo = test_todo("test task");
    todo.set_area(Some("area-1".to_string()));
    assert_eq!(todo.area(), Some("area-1"));

    todo.set_project_id(Some(record_id("ABCd1ee0ykmXYZqT98huxa")))
        .unwrap();
    assert_eq!(todo.area(), None);
    assert_eq!(todo.project().map(things_cloud_core::RecordId::as_str), Some("ABCd1ee0ykmXYZqT98huxa"));
}

#[test]
fn area_clears_project() {
    let mut todo = test_todo("test task");
    todo.set_project_id(Some(record_id("ABCd1ee0ykmXYZqT98huxa")))
        .unwrap();

    todo.set_area(Some("area-1".to_string()));
    assert_eq!(todo.project(), None);
    assert_eq!(todo.area(), Some("area-1"));
}

#[test]
fn area_promotes_out_of_inbox() {
    let mut todo = test_todo("test task");
    assert_eq!(todo.destination(), Destination::Inbox);
    todo.set_area(Some("area-1".to_string()));
    assert_eq!(todo.destination(), Destination::Anytime);
}

#[test]
fn clearing_project_keeps_destination() {
    let mut todo = test_todo("test task");
    todo.set_project_id(Some(record_id("ABCd1ee0ykmXYZqT98huxa")))
        .unwrap();
    todo.set_project_id(None).unwrap();
    assert_eq!(todo.project(), None);
    assert_eq!(todo.destination(), Destination::Anytime);
}
