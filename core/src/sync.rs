// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Per-record sync state machine.
//!
//! A [`Tracked`] record carries the last snapshot known to be on the server.
//! Outbound payloads are derived from it: a record that was never committed
//! produces a full-snapshot create, everything else produces a minimal delta
//! computed by diffing the current encoding against the synced snapshot.

use crate::codec::{Field, apply_payload, encode_full};
use crate::error::{Error, TransitionError};
use crate::history::{HistoryUpdate, UpdateKind};
use crate::snapshot::Snapshot;
use crate::todo::TodoItem;

/// A to-do record together with its sync envelope.
#[derive(Debug, Clone)]
pub struct Tracked {
    todo: TodoItem,
    /// Last-known-synced full snapshot; `None` means the record was never
    /// successfully created on the server.
    synced: Option<Snapshot>,
}

impl Tracked {
    /// Wraps a locally created record that the server has never seen.
    #[must_use]
    pub fn new(todo: TodoItem) -> Self {
        Self { todo, synced: None }
    }

    /// Wraps a record decoded from a server snapshot.
    ///
    /// The synced state is the canonical re-encoding of the decoded record,
    /// so that later diffs compare like against like even when the server
    /// sent a sparse snapshot.
    pub(crate) fn from_server(todo: TodoItem) -> Self {
        let synced = Some(encode_full(&todo));
        Self { todo, synced }
    }

    /// The record.
    #[must_use]
    pub fn todo(&self) -> &TodoItem {
        &self.todo
    }

    /// Mutable access to the record for local edits.
    pub fn todo_mut(&mut self) -> &mut TodoItem {
        &mut self.todo
    }

    /// Whether the record has ever been committed to the server.
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.synced.is_some()
    }

    /// Builds the outbound update for this record.
    ///
    /// A never-committed record yields a create carrying the full snapshot.
    /// A committed record yields an edit carrying exactly the fields that
    /// differ from the synced snapshot, plus the modification date. Pending
    /// changes are re-derived here by comparison, so a field changed and then
    /// changed back does not appear.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NoChanges`] when nothing but the
    /// modification date differs; callers must not issue empty commits.
    pub fn to_update(&self) -> Result<HistoryUpdate, Error> {
        let current = encode_full(&self.todo);
        match &self.synced {
            None => Ok(HistoryUpdate {
                id: self.todo.id().clone(),
                kind: UpdateKind::New,
                payload: current,
            }),
            Some(synced) => {
                let mut delta = current.diff(synced);
                let md = Field::ModificationDate.wire_key();
                if delta.keys().all(|key| key == md) {
                    return Err(TransitionError::NoChanges.into());
                }
                // The server expects the modification date on every edit,
                // even when only sub-second noise separates it from the
                // synced value.
                if let Some(value) = current.get(md) {
                    delta.insert(md, value.clone());
                }
                Ok(HistoryUpdate {
                    id: self.todo.id().clone(),
                    kind: UpdateKind::Edit,
                    payload: delta,
                })
            }
        }
    }

    /// Records that the server accepted `update`.
    ///
    /// A create replaces the synced snapshot wholesale; an edit merges its
    /// fields into the existing snapshot one by one.
    pub fn commit_accepted(&mut self, update: &HistoryUpdate) {
        match update.kind {
            UpdateKind::New => self.synced = Some(update.payload.clone()),
            UpdateKind::Edit => match &mut self.synced {
                Some(synced) => synced.merge(&update.payload),
                None => self.synced = Some(update.payload.clone()),
            },
            UpdateKind::Delete => {}
        }
    }

    /// Applies an incoming remote delta onto the record's storage.
    ///
    /// The delta also advances the synced snapshot, so remote changes are
    /// not echoed back on the next commit.
    pub(crate) fn apply_remote_edit(&mut self, delta: &Snapshot) -> Result<(), Error> {
        apply_payload(&mut self.todo, delta)?;
        if let Some(synced) = &mut self.synced {
            synced.merge(delta);
        }
        Ok(())
    }
}
