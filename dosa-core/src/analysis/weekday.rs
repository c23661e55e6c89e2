//! Day-of-week gating for edges.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::edge::Edge;

const DAYS: [Weekday; 7] = [
    Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat, Weekday::Sun,
];

/// 7-bit set of enabled weekdays; bit 0 is Monday, bit 6 is Sunday.
///
/// Serializes as the raw integer, so front ends can treat it as a bitmask.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify, derive_more::From)]
pub struct WeekdayMask(pub u8);

impl WeekdayMask {
    pub const ALL: WeekdayMask = WeekdayMask(0b111_1111);
    pub const NONE: WeekdayMask = WeekdayMask(0);

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    pub fn from_days(days: impl IntoIterator<Item = Weekday>) -> Self {
        days.into_iter().fold(Self::NONE, |mask, day| mask.with(day))
    }

    pub fn with(self, day: Weekday) -> Self {
        WeekdayMask(self.0 | Self::bit(day))
    }

    pub fn without(self, day: Weekday) -> Self {
        WeekdayMask(self.0 & !Self::bit(day))
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// Bits above Sunday are ignored.
    pub fn normalized(self) -> Self {
        WeekdayMask(self.0 & Self::ALL.0)
    }

    pub fn admits(&self, edge: &Edge) -> bool {
        self.contains(edge.weekday())
    }

    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        DAYS.into_iter().filter(|day| self.contains(*day))
    }
}

impl Default for WeekdayMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for WeekdayMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: Vec<String> = self.days().map(|d| d.to_string()).collect();
        if days.is_empty() {
            write!(f, "-")
        } else {
            write!(f, "{}", days.join(","))
        }
    }
}
