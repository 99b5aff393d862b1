// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Abstractions to obtain the current time.
//!
//! Services should never query the system time directly.  Instead, they should receive a `Clock`
//! at construction time so that tests can control the timestamps that end up in the database.

use time::OffsetDateTime;

/// Generic definition of a clock.
pub trait Clock {
    /// Returns the current UTC time.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Clock implementation that uses the system clock.
#[derive(Clone, Default)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();

        // Truncate the timestamp to microsecond resolution as this is the resolution supported by
        // timestamps in the PostgreSQL database.  Values must compare equal after a round trip.
        let nanos = nanos / 1000 * 1000;

        OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .expect("nanos must be in range because they come from the current timestamp")
    }
}

/// Test utilities for clocks.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use time::{Date, Month, Time};

    /// Builds a UTC timestamp from its components.  The values must be valid.
    pub fn utc_datetime(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> OffsetDateTime {
        let month = Month::try_from(month).expect("Month must be valid");
        let date = Date::from_calendar_date(year, month, day).expect("Date must be valid");
        let time = Time::from_hms(hour, minute, second).expect("Time must be valid");
        date.with_time(time).assume_utc()
    }

    /// A clock that returns a monotonically increasing instant every time it is queried.
    ///
    /// Every call to `now_utc` advances the clock by one second, which makes it easy to tell apart
    /// the timestamps recorded by consecutive operations.
    pub struct MonotonicClock {
        /// Current fake time in seconds since the epoch.
        now: AtomicU64,
    }

    impl MonotonicClock {
        /// Creates a new clock whose first reading is `now` seconds since the epoch.
        pub fn new(now: u64) -> Self {
            Self { now: AtomicU64::new(now) }
        }
    }

    impl Clock for MonotonicClock {
        fn now_utc(&self) -> OffsetDateTime {
            let now = self.now.fetch_add(1, Ordering::SeqCst);
            OffsetDateTime::from_unix_timestamp(now as i64).unwrap()
        }
    }

}
