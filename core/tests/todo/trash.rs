// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Trash transitions: delete/restore toggles with double-transition
//! rejection, and the one-way task-to-project conversion.

use things_cloud_core::{Destination, RecordType, TransitionError};

use crate::common::test_todo;

#[test]
fn delete_moves_to_trash() {
    let mut todo = test_todo("test task");
    todo.delete().unwrap();
    assert!(todo.trashed());
}

#[test]
fn delete_twice_is_rejected() {
    let mut todo = test_todo("test task");
    todo.delete().unwrap();
    assert_eq!(todo.delete(), Err(TransitionError::AlreadyTrashed));
}

#[test]
fn restore_leaves_trash() {
    let mut todo = test_todo("test task");
    todo.delete().unwrap();
    todo.restore().unwrap();
    assert!(!todo.trashed());
}

#[test]
fn restore_without_delete_is_rejected() {
    let mut todo = test_todo("test task");
    assert_eq!(todo.restore(), Err(TransitionError::NotTrashed));
}

#[test]
fn as_project_converts_task() {
    let mut todo = test_todo("test project");
    todo.as_project().unwrap();
    assert_eq!(todo.record_type(), RecordType::Project);
    assert!(todo.instance_creation_paused());
    assert_eq!(todo.destination(), Destination::Anytime);
}

#[test]
fn as_project_is_one_way() {
    let mut todo = test_todo("test project");
    todo.as_project().unwrap();
    assert_eq!(
        todo.as_project(),
        Err(TransitionError::NotATask(RecordType::Project))
    );
}

#[test]
fn set_destination_requires_task() {
    let mut project = test_todo("test project");
    project.as_project().unwrap();
    assert_eq!(
        project.set_destination(Destination::Someday),
        Err(TransitionError::NotATask(RecordType::Project))
    );
    assert_eq!(project.destination(), Destination::Anytime);
}
