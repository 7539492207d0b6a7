// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Application core tying the cloud client to the local item table.
//!
//! All operations run on one logical actor: methods take `&mut self`, so at
//! most one commit is in flight at a time and every commit declares the
//! current watermark as its ancestor index. The watermark only moves on an
//! observed server response; a timed-out commit has unknown effect, and
//! truth is re-derived from the next [`refresh`](Things::refresh).

use things_cloud::{CloudClient, CloudConfig, HeadIndex};

use crate::clock::Clock;
use crate::error::Error;
use crate::history::{BatchSummary, ItemTable};
use crate::record_id::RecordId;
use crate::sync::Tracked;
use crate::todo::TodoItem;

/// Things Cloud application core.
#[derive(Debug)]
pub struct Things {
    client: CloudClient,
    table: ItemTable,
    clock: Clock,
}

impl Things {
    /// Creates an instance with an empty local table.
    ///
    /// # Errors
    ///
    /// Returns an error if the cloud client cannot be built from the
    /// configuration.
    pub fn new(config: CloudConfig, clock: Clock) -> Result<Self, Error> {
        let client = CloudClient::new(config)?;
        let table = ItemTable::new(clock.clone());
        Ok(Self {
            client,
            table,
            clock,
        })
    }

    /// The clock driving record timestamps.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// The local watermark: last observed head index.
    #[must_use]
    pub fn head(&self) -> HeadIndex {
        self.table.watermark()
    }

    /// Skips history up to `head` without fetching it, e.g. when resuming
    /// from a persisted offset or a shared session's head index.
    pub fn seek(&mut self, head: HeadIndex) {
        self.table.set_watermark(head);
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&TodoItem> {
        self.table.get(id).map(Tracked::todo)
    }

    /// Iterates over all records in the local table.
    pub fn todos(&self) -> impl Iterator<Item = &TodoItem> {
        self.table.iter().map(Tracked::todo)
    }

    /// A fresh record bound to this instance's clock, not yet tracked.
    /// Commit it with [`create`](Self::create).
    #[must_use]
    pub fn new_todo(&self) -> TodoItem {
        TodoItem::new(self.clock.clone())
    }

    /// Pulls all history after the current watermark and applies it to the
    /// local table.
    ///
    /// When there are no new updates the table is unchanged and the
    /// watermark still advances to whatever the server reports as current.
    ///
    /// # Errors
    ///
    /// Transport failures and malformed batches surface unchanged; the
    /// watermark does not move on failure.
    pub async fn refresh(&mut self) -> Result<BatchSummary, Error> {
        let response = self.client.fetch_history(self.table.watermark()).await?;
        self.table.apply_batch(&response)
    }

    /// Creates a record on the server.
    ///
    /// Refreshes first so the create consumes the next history slot, assigns
    /// the record's order index, and commits a full snapshot. Returns the
    /// record id.
    ///
    /// # Errors
    ///
    /// Transport failures surface unchanged; the record is only inserted
    /// into the local table after the server accepts the commit.
    pub async fn create(&mut self, mut todo: TodoItem) -> Result<RecordId, Error> {
        self.refresh().await?;
        let ancestor = self.table.watermark();
        todo.order_index = ancestor.next().get();

        let mut tracked = Tracked::new(todo);
        let update = tracked.to_update()?;
        let id = update.id.clone();
        tracing::info!(%id, "creating todo");

        let head = self
            .client
            .commit(ancestor, &update.clone().into_commit_body())
            .await?;
        tracked.commit_accepted(&update);
        self.table.insert(tracked);
        self.table.set_watermark(head);
        Ok(id)
    }

    /// Commits the pending local changes of one record as an edit delta.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownRecord`] if the id is not in the table and
    /// with [`TransitionError::NoChanges`](crate::TransitionError::NoChanges)
    /// if nothing differs from the synced state.
    pub async fn save(&mut self, id: &RecordId) -> Result<(), Error> {
        let tracked = self
            .table
            .get(id)
            .ok_or_else(|| Error::UnknownRecord(id.clone()))?;
        let update = tracked.to_update()?;
        tracing::info!(%id, kind = %update.kind, "committing changes");

        let ancestor = self.table.watermark();
        let head = self
            .client
            .commit(ancestor, &update.clone().into_commit_body())
            .await?;
        if let Some(tracked) = self.table.get_mut(id) {
            tracked.commit_accepted(&update);
        }
        self.table.set_watermark(head);
        Ok(())
    }

    /// Mutates a record locally, then commits the resulting delta.
    ///
    /// # Errors
    ///
    /// The mutation's own precondition errors surface before anything is
    /// sent; commit failures surface unchanged.
    pub async fn modify<F>(&mut self, id: &RecordId, mutate: F) -> Result<(), Error>
    where
        F: FnOnce(&mut TodoItem) -> Result<(), crate::TransitionError>,
    {
        let tracked = self
            .table
            .get_mut(id)
            .ok_or_else(|| Error::UnknownRecord(id.clone()))?;
        mutate(tracked.todo_mut())?;
        self.save(id).await
    }
}
