// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Local/remote state reconciliation engine for Things Cloud.
//!
//! The engine tracks a to-do record's fields, decides between a full-object
//! "create" payload and a minimal "edit" delta depending on sync history, and
//! applies incoming remote deltas onto local records. Transport lives in the
//! `things-cloud` crate; this crate owns the record model, the wire field
//! codec, the per-record sync state machine, and the history processor.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod clock;
mod codec;
mod error;
mod history;
mod record_id;
mod snapshot;
mod sync;
mod things;
mod todo;

pub use crate::clock::Clock;
pub use crate::codec::{Field, decode, encode_full};
pub use crate::error::{Error, TransitionError};
pub use crate::history::{BatchSummary, HistoryUpdate, ItemTable, UpdateKind};
pub use crate::record_id::{InvalidRecordId, RecordId};
pub use crate::snapshot::Snapshot;
pub use crate::sync::Tracked;
pub use crate::things::Things;
pub use crate::todo::{Destination, Note, RecordType, Status, TodoItem};
