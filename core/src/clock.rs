// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

/// Time source injected into the record layer.
///
/// Every field-mutating operation stamps `modification_date` from this clock,
/// and the Today list is derived from its notion of local midnight. Tests
/// freeze it with [`Clock::fixed`].
#[derive(Debug, Clone)]
pub enum Clock {
    /// Wall clock, interpreting "today" in the given time zone.
    System(TimeZone),

    /// A frozen instant, for tests and deterministic replay.
    Fixed(Zoned),
}

impl Clock {
    /// Wall clock in the operating system's time zone.
    #[must_use]
    pub fn system() -> Self {
        Self::System(TimeZone::system())
    }

    /// A clock frozen at the given instant.
    #[must_use]
    pub const fn fixed(now: Zoned) -> Self {
        Self::Fixed(now)
    }

    /// The current instant.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        match self {
            Self::System(_) => Timestamp::now(),
            Self::Fixed(now) => now.timestamp(),
        }
    }

    /// Local midnight of the current day.
    #[must_use]
    pub fn today(&self) -> Timestamp {
        let now = self.zoned_now();
        match now.start_of_day() {
            Ok(midnight) => midnight.timestamp(),
            Err(err) => {
                tracing::warn!(%err, "no local midnight today, using current instant");
                now.timestamp()
            }
        }
    }

    fn zoned_now(&self) -> Zoned {
        match self {
            Self::System(tz) => Timestamp::now().to_zoned(tz.clone()),
            Self::Fixed(now) => now.clone(),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}
