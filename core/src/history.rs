// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! History processor: applies remote update batches to the local item table.

use std::collections::HashMap;
use std::fmt;

use things_cloud::{
    CommitBody, HeadIndex, HistoryResponse, ItemUpdate, KIND_DELETE, KIND_EDIT, KIND_NEW,
};

use crate::clock::Clock;
use crate::codec::decode;
use crate::error::Error;
use crate::record_id::RecordId;
use crate::snapshot::Snapshot;
use crate::sync::Tracked;
use crate::todo::TodoItem;

/// The kind of a history update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// A record was created; the payload is a full snapshot.
    New,
    /// A record was edited; the payload is a partial delta.
    Edit,
    /// A record was deleted; the payload is an empty marker.
    Delete,
}

impl From<UpdateKind> for u8 {
    fn from(kind: UpdateKind) -> Self {
        match kind {
            UpdateKind::New => KIND_NEW,
            UpdateKind::Edit => KIND_EDIT,
            UpdateKind::Delete => KIND_DELETE,
        }
    }
}

impl TryFrom<u8> for UpdateKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            KIND_NEW => Ok(Self::New),
            KIND_EDIT => Ok(Self::Edit),
            KIND_DELETE => Ok(Self::Delete),
            other => Err(other),
        }
    }
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::New => "new",
            Self::Edit => "edit",
            Self::Delete => "delete",
        };
        write!(f, "{name}")
    }
}

/// A single server-reported change to one record.
#[derive(Debug, Clone)]
pub struct HistoryUpdate {
    /// The record the change applies to.
    pub id: RecordId,
    /// What happened to the record.
    pub kind: UpdateKind,
    /// Full snapshot for a create, partial delta for an edit, empty for a
    /// delete.
    pub payload: Snapshot,
}

impl HistoryUpdate {
    /// Parses a wire change entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] on a malformed id or an unknown update
    /// kind.
    pub fn from_wire(id: &str, item: &ItemUpdate) -> Result<Self, Error> {
        let id: RecordId = id
            .parse()
            .map_err(|e| Error::Protocol(format!("bad record id: {e}")))?;
        let kind = UpdateKind::try_from(item.kind)
            .map_err(|code| Error::Protocol(format!("unknown update kind {code} for {id}")))?;
        Ok(Self {
            id,
            kind,
            payload: item.payload.clone().into(),
        })
    }

    /// Converts into a commit-body entry.
    #[must_use]
    pub fn into_wire(self) -> (String, ItemUpdate) {
        (
            self.id.into(),
            ItemUpdate::task(self.kind.into(), self.payload.into()),
        )
    }

    /// A commit body containing only this update.
    #[must_use]
    pub fn into_commit_body(self) -> CommitBody {
        let (id, item) = self.into_wire();
        CommitBody::from([(id, item)])
    }
}

/// What happened while applying one fetched batch.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Records inserted from create updates.
    pub created: usize,
    /// Records modified by edit updates.
    pub edited: usize,
    /// Records removed by delete updates.
    pub deleted: usize,
    /// Updates skipped because they referenced unknown records.
    pub skipped: Vec<RecordId>,
}

/// The local item table and its history watermark.
///
/// Records live here under their server id. They are never removed locally
/// (trashing is a field on the record); only a server-reported delete drops an
/// entry.
#[derive(Debug)]
pub struct ItemTable {
    items: HashMap<RecordId, Tracked>,
    watermark: HeadIndex,
    clock: Clock,
}

impl ItemTable {
    /// Creates an empty table with the watermark at zero.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            items: HashMap::new(),
            watermark: HeadIndex::default(),
            clock,
        }
    }

    /// The last observed position in the account's change history.
    #[must_use]
    pub fn watermark(&self) -> HeadIndex {
        self.watermark
    }

    /// Moves the watermark. Only done from a server-reported index, never
    /// optimistically.
    pub fn set_watermark(&mut self, head: HeadIndex) {
        self.watermark = head;
    }

    /// Number of records in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Tracked> {
        self.items.get(id)
    }

    /// Looks up a record by id for local mutation.
    pub fn get_mut(&mut self, id: &RecordId) -> Option<&mut Tracked> {
        self.items.get_mut(id)
    }

    /// Inserts a record under its own id.
    pub fn insert(&mut self, tracked: Tracked) {
        self.items.insert(tracked.todo().id().clone(), tracked);
    }

    /// Iterates over the records in the table, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Tracked> {
        self.items.values()
    }

    /// Applies a fetched batch to the table, in array order.
    ///
    /// Creates decode a full record and insert it, overwriting any existing
    /// entry with the same id. Edits apply their delta directly onto the
    /// record's storage; an edit or delete referencing an id that was never
    /// seen is logged, reported in the summary, and skipped; the rest of the
    /// batch still applies. The watermark advances to the batch's reported
    /// current index once the whole batch is processed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] on malformed batch data; the watermark is
    /// not advanced in that case.
    pub fn apply_batch(&mut self, response: &HistoryResponse) -> Result<BatchSummary, Error> {
        let mut summary = BatchSummary::default();
        for entry in &response.items {
            for (id, item) in entry {
                let update = HistoryUpdate::from_wire(id, item)?;
                self.apply_update(update, &mut summary)?;
            }
        }
        self.watermark = response.current_item_index;
        tracing::debug!(
            watermark = %self.watermark,
            created = summary.created,
            edited = summary.edited,
            deleted = summary.deleted,
            skipped = summary.skipped.len(),
            "applied history batch"
        );
        Ok(summary)
    }

    fn apply_update(
        &mut self,
        update: HistoryUpdate,
        summary: &mut BatchSummary,
    ) -> Result<(), Error> {
        match update.kind {
            UpdateKind::New => {
                let todo = self.decode_new(update.id, &update.payload)?;
                self.insert(Tracked::from_server(todo));
                summary.created += 1;
            }
            UpdateKind::Edit => match self.items.get_mut(&update.id) {
                Some(tracked) => {
                    tracked.apply_remote_edit(&update.payload)?;
                    summary.edited += 1;
                }
                None => {
                    tracing::warn!(id = %update.id, "edit references unknown record, skipping");
                    summary.skipped.push(update.id);
                }
            },
            UpdateKind::Delete => {
                if self.items.remove(&update.id).is_some() {
                    summary.deleted += 1;
                } else {
                    tracing::warn!(id = %update.id, "delete references unknown record, skipping");
                    summary.skipped.push(update.id);
                }
            }
        }
        Ok(())
    }

    fn decode_new(&self, id: RecordId, payload: &Snapshot) -> Result<TodoItem, Error> {
        decode(id, payload, self.clock.clone())
    }
}
