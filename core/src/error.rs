// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use things_cloud::CloudError;

use crate::record_id::RecordId;
use crate::todo::{RecordType, Status};

/// Reconciliation engine errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A local precondition was violated; no mutation was applied.
    #[error("invalid transition: {0}")]
    InvalidTransition(#[from] TransitionError),

    /// Malformed server data; fatal for the batch being processed.
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// An update referenced a record that is not in the local table.
    #[error("unknown record reference: {0}")]
    UnknownRecord(RecordId),

    /// Transport failure reported by the cloud client.
    #[error(transparent)]
    Transport(#[from] CloudError),
}

/// Local precondition failures raised by record mutations and commit
/// preparation. Validation happens before any field is touched.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The record already holds the requested status.
    #[error("item already has {0} status")]
    StatusUnchanged(Status),

    /// Deleting a record that is already in the trash.
    #[error("item is already in the trash")]
    AlreadyTrashed,

    /// Restoring a record that is not in the trash.
    #[error("item is not in the trash")]
    NotTrashed,

    /// The operation is only valid on a task.
    #[error("operation requires a task, item is a {0}")]
    NotATask(RecordType),

    /// The assigned record is not a project.
    #[error("assigned item is not a project")]
    NotAProject,

    /// A record cannot be assigned itself as its own project.
    #[error("cannot assign an item as its own project")]
    SelfAsProject,

    /// An edit commit was requested but nothing differs from the last
    /// synced state.
    #[error("no changes to send")]
    NoChanges,
}
