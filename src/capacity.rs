// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Per-day dose capacity for a single center.
//!
//! # Example
//!
//! ```
//! use vaccination_booking::{CapacityLedger, Day};
//!
//! let mut ledger = CapacityLedger::new();
//! ledger.add(Day(5), 2).unwrap();
//! ledger.reserve(Day(5)).unwrap();
//! assert_eq!(ledger.remaining(Day(5)), 1);
//! ```

use crate::base::Day;
use crate::error::BookingError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DaySlot {
    /// Doses ever added for the day.
    added: u32,
    /// Doses not yet booked.
    remaining: u32,
}

impl DaySlot {
    fn assert_invariants(&self) {
        debug_assert!(
            self.remaining <= self.added,
            "Invariant violated: remaining {} exceeds added {}",
            self.remaining,
            self.added
        );
    }
}

/// Remaining doses per day for one center.
///
/// Days that were never topped up have zero capacity.
#[derive(Debug, Clone, Default)]
pub struct CapacityLedger {
    days: BTreeMap<Day, DaySlot>,
}

impl CapacityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds doses for `day` on top of whatever is already there.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidInput`] if the total would overflow; the
    /// ledger is left unchanged.
    pub fn add(&mut self, day: Day, doses: u32) -> Result<u32, BookingError> {
        let current = self.days.get(&day).copied().unwrap_or_default();
        let slot = DaySlot {
            added: current
                .added
                .checked_add(doses)
                .ok_or_else(|| BookingError::invalid_input("capacity", &doses.to_string()))?,
            remaining: current.remaining + doses,
        };
        slot.assert_invariants();
        self.days.insert(day, slot);
        Ok(slot.remaining)
    }

    pub fn remaining(&self, day: Day) -> u32 {
        self.days.get(&day).map_or(0, |slot| slot.remaining)
    }

    /// Total doses ever added for `day`.
    pub fn added(&self, day: Day) -> u32 {
        self.days.get(&day).map_or(0, |slot| slot.added)
    }

    /// Takes one dose for `day`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::CapacityExhausted`] when nothing remains.
    pub fn reserve(&mut self, day: Day) -> Result<u32, BookingError> {
        match self.days.get_mut(&day) {
            Some(slot) if slot.remaining > 0 => {
                slot.remaining -= 1;
                slot.assert_invariants();
                Ok(slot.remaining)
            }
            _ => Err(BookingError::CapacityExhausted),
        }
    }

    /// Returns one previously reserved dose for `day`.
    pub fn release(&mut self, day: Day) -> u32 {
        let slot = self.days.entry(day).or_default();
        slot.remaining += 1;
        slot.assert_invariants();
        slot.remaining
    }

    /// Remaining doses keyed by day, in day order.
    pub fn schedule(&self) -> BTreeMap<Day, u32> {
        self.days
            .iter()
            .map(|(day, slot)| (*day, slot.remaining))
            .collect()
    }
}
