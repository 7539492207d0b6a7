// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories: frozen clocks, sample records, and wire payloads.

use jiff::civil::date;
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use things_cloud_core::{Clock, TodoItem};

/// The frozen "now" used across tests: 2021-01-01 12:00 UTC.
#[must_use]
pub fn fake_now() -> Zoned {
    date(2021, 1, 1)
        .at(12, 0, 0, 0)
        .to_zoned(TimeZone::UTC)
        .unwrap()
}

/// Local midnight of the frozen day.
#[must_use]
pub fn fake_midnight() -> Timestamp {
    date(2021, 1, 1)
        .at(0, 0, 0, 0)
        .to_zoned(TimeZone::UTC)
        .unwrap()
        .timestamp()
}

/// A clock frozen at [`fake_now`].
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fake_now())
}

/// A fresh task with the given title, on the frozen clock.
#[must_use]
pub fn test_todo(title: &str) -> TodoItem {
    let mut todo = TodoItem::new(fixed_clock());
    todo.set_title(title);
    todo
}
