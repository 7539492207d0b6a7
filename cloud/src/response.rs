// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Wire shapes of the history and commit endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::HeadIndex;

/// Entity tag carried by every task-record change entry.
pub const ENTITY_TASK: &str = "Task6";

/// Change kind code: the record is created with a full snapshot payload.
pub const KIND_NEW: u8 = 0;
/// Change kind code: the record is edited with a partial delta payload.
pub const KIND_EDIT: u8 = 1;
/// Change kind code: the record is deleted; the payload is an empty marker.
pub const KIND_DELETE: u8 = 2;

/// One change entry, as it appears both in commit bodies and in fetched
/// history items: `{"t": <kind>, "e": <entity>, "p": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdate {
    /// Change kind code (see [`KIND_NEW`], [`KIND_EDIT`], [`KIND_DELETE`]).
    #[serde(rename = "t")]
    pub kind: u8,

    /// Entity tag, [`ENTITY_TASK`] for to-do records.
    #[serde(rename = "e")]
    pub entity: String,

    /// The snapshot or delta payload, keyed by wire field aliases.
    #[serde(rename = "p", default)]
    pub payload: Map<String, Value>,
}

impl ItemUpdate {
    /// Creates a task-entity change entry.
    #[must_use]
    pub fn task(kind: u8, payload: Map<String, Value>) -> Self {
        Self {
            kind,
            entity: ENTITY_TASK.to_string(),
            payload,
        }
    }
}

/// Commit request body: record id to change entry.
pub type CommitBody = BTreeMap<String, ItemUpdate>;

/// Response of `GET history/{account}/items`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    /// The server's current head index.
    #[serde(rename = "current-item-index")]
    pub current_item_index: HeadIndex,

    /// Updates after the requested start index, in history order. Each entry
    /// maps a record id to its change.
    #[serde(default)]
    pub items: Vec<BTreeMap<String, ItemUpdate>>,

    /// Total content size metadata reported alongside the batch.
    #[serde(rename = "latest-total-content-size", default)]
    pub latest_total_content_size: Option<u64>,

    /// Schema version of the payloads in this batch.
    #[serde(default)]
    pub schema: Option<u32>,
}

/// Response of `POST history/{account}/commit`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CommitResponse {
    /// The head index after the accepted commit.
    #[serde(rename = "server-head-index")]
    pub server_head_index: HeadIndex,
}
