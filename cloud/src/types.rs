// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Position in the account's global change history.
///
/// A `HeadIndex` identifies the last observed entry of the server-side change
/// log. It doubles as the optimistic concurrency token for commits: every
/// commit declares its ancestor index, and the server rejects commits whose
/// ancestor does not match its own head.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct HeadIndex(i64);

impl HeadIndex {
    /// Creates a new `HeadIndex` from a raw index value.
    #[must_use]
    pub const fn new(index: i64) -> Self {
        Self(index)
    }

    /// Returns the raw index value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// The index following this one.
    ///
    /// Creating a record consumes the next history slot, so a create commit
    /// assigns `head.next()` as the new record's order index.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for HeadIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for HeadIndex {
    fn from(index: i64) -> Self {
        Self(index)
    }
}

impl From<HeadIndex> for i64 {
    fn from(index: HeadIndex) -> Self {
        index.0
    }
}
