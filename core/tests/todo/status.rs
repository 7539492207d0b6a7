// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Status state machine tests: Todo ⇄ Complete, Todo ⇄ Cancelled,
//! self-transitions rejected, completion date effects.

use things_cloud_core::{Status, TransitionError};

use crate::common::{fixed_clock, test_todo};

#[test]
fn new_todo_defaults() {
    let todo = test_todo("test task");
    assert_eq!(todo.status(), Status::Todo);
    assert_eq!(todo.completion_date(), None);
    assert!(!todo.trashed());
}

#[test]
fn complete_stamps_completion_date() {
    let mut todo = test_todo("test task");
    todo.complete().unwrap();
    assert_eq!(todo.status(), Status::Complete);
    assert_eq!(todo.completion_date(), Some(fixed_clock().now()));
}

#[test]
fn cancel_stamps_completion_date() {
    let mut todo = test_todo("test task");
    todo.cancel().unwrap();
    assert_eq!(todo.status(), Status::Cancelled);
    assert_eq!(todo.completion_date(), Some(fixed_clock().now()));
}

#[test]
fn back_to_todo_clears_completion_date() {
    let mut todo = test_todo("test task");
    todo.complete().unwrap();
    todo.todo().unwrap();
    assert_eq!(todo.status(), Status::Todo);
    assert_eq!(todo.completion_date(), None);
}

#[test]
fn todo_on_todo_is_rejected() {
    let mut todo = test_todo("test task");
    assert_eq!(
        todo.todo(),
        Err(TransitionError::StatusUnchanged(Status::Todo))
    );
}

#[test]
fn complete_on_complete_is_rejected() {
    let mut todo = test_todo("test task");
    todo.complete().unwrap();
    assert_eq!(
        todo.complete(),
        Err(TransitionError::StatusUnchanged(Status::Complete))
    );
    // the failed transition leaves the record untouched
    assert_eq!(todo.status(), Status::Complete);
}

#[test]
fn cancel_on_cancelled_is_rejected() {
    let mut todo = test_todo("test task");
    todo.cancel().unwrap();
    assert_eq!(
        todo.cancel(),
        Err(TransitionError::StatusUnchanged(Status::Cancelled))
    );
}

#[test]
fn cancelled_can_return_to_todo() {
    let mut todo = test_todo("test task");
    todo.cancel().unwrap();
    todo.todo().unwrap();
    assert_eq!(todo.status(), Status::Todo);
    assert_eq!(todo.completion_date(), None);
}
