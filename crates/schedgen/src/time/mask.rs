//! Weekly time masks.
//!
//! A [`WeeklyTimeMask`] is a flat bit-set with one bit per minute of the
//! week (7 days × 1440 slots). Day `d` occupies bits
//! `d * SLOTS_PER_DAY .. (d + 1) * SLOTS_PER_DAY`, Monday first. Union and
//! overlap are plain word-wise OR / AND over 158 `u64` words.

use super::clock::TimeOfDay;
use crate::error::ScheduleError;
use chrono::Weekday;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Width of a single slot in minutes.
pub const SLOT_MINUTES: usize = 1;

/// Number of slots covering one day.
pub const SLOTS_PER_DAY: usize = 24 * 60 / SLOT_MINUTES;

pub const DAYS_PER_WEEK: usize = 7;

const TOTAL_SLOTS: usize = SLOTS_PER_DAY * DAYS_PER_WEEK;
const WORD_BITS: usize = u64::BITS as usize;
const WORDS: usize = TOTAL_SLOTS.div_ceil(WORD_BITS);

/// Recurring weekly occupied time, one bit per slot.
///
/// Masks are immutable values; combine them with [`WeeklyTimeMask::union`]
/// (or `|`). The empty mask is the identity for union and never overlaps
/// anything.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeeklyTimeMask {
    words: [u64; WORDS],
}

impl WeeklyTimeMask {
    pub const EMPTY: WeeklyTimeMask = WeeklyTimeMask { words: [0; WORDS] };

    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Builds a mask covering `[start, end)` on `day`.
    ///
    /// Slots are one minute wide, so `[start, end)` maps exactly onto bits.
    /// Intervals that meet at a boundary (one class ending at 0833, the next
    /// starting at 0833) never overlap.
    ///
    /// # Arguments
    /// * `start` - Inclusive start time
    /// * `end` - Exclusive end time
    /// * `day` - Day of the week the interval recurs on
    ///
    /// # Returns
    /// * `Ok(WeeklyTimeMask)` - Mask with exactly the interval's slots set
    /// * `Err(InvalidTimeRange)` - If `start >= end`
    pub fn from_interval(
        start: TimeOfDay,
        end: TimeOfDay,
        day: Weekday,
    ) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::time_range(format!(
                "start {start} must be before end {end}"
            )));
        }

        let base = day.num_days_from_monday() as usize * SLOTS_PER_DAY;
        let first = base + usize::from(start.minutes());
        let last = base + usize::from(end.minutes());

        let mut mask = Self::EMPTY;
        mask.set_range(first, last);
        Ok(mask)
    }

    fn set_range(&mut self, from: usize, to: usize) {
        let mut bit = from;
        while bit < to {
            let offset = bit % WORD_BITS;
            let span = (WORD_BITS - offset).min(to - bit);
            let bits = if span == WORD_BITS {
                u64::MAX
            } else {
                ((1u64 << span) - 1) << offset
            };
            self.words[bit / WORD_BITS] |= bits;
            bit += span;
        }
    }

    /// Bitwise OR of two masks: busy whenever either is busy.
    pub fn union(&self, other: &Self) -> Self {
        let mut words = self.words;
        for (w, o) in words.iter_mut().zip(other.words.iter()) {
            *w |= *o;
        }
        Self { words }
    }

    /// Returns true if the two masks share at least one occupied slot.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| a & b != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Number of occupied slots across the whole week.
    pub fn occupied_slots(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Returns true if minute `slot` (0-based, from midnight) on `day` is occupied.
    pub fn is_occupied(&self, day: Weekday, slot: usize) -> bool {
        if slot >= SLOTS_PER_DAY {
            return false;
        }
        let bit = day.num_days_from_monday() as usize * SLOTS_PER_DAY + slot;
        self.words[bit / WORD_BITS] & (1u64 << (bit % WORD_BITS)) != 0
    }
}

impl Default for WeeklyTimeMask {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BitOr for WeeklyTimeMask {
    type Output = WeeklyTimeMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(&rhs)
    }
}

impl BitOrAssign for WeeklyTimeMask {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(&rhs);
    }
}

impl FromIterator<WeeklyTimeMask> for WeeklyTimeMask {
    fn from_iter<I: IntoIterator<Item = WeeklyTimeMask>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |acc, m| acc | m)
    }
}

impl fmt::Debug for WeeklyTimeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeeklyTimeMask")
            .field("occupied_slots", &self.occupied_slots())
            .finish()
    }
}
