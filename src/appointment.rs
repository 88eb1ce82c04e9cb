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

//! Appointments and the per-center appointment book.

use crate::base::{CenterId, Day, UserId};
use serde::Serialize;

/// A confirmed booking of one user at one center on one day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Appointment {
    pub center_id: CenterId,
    pub user_id: UserId,
    pub day: Day,
}

impl Appointment {
    fn matches(&self, user_id: &UserId, day: Day) -> bool {
        self.day == day && &self.user_id == user_id
    }
}

/// Appointments held by a single center, in booking order.
///
/// A user holds at most one appointment per day; callers check
/// [`AppointmentBook::contains`] before [`AppointmentBook::push`].
#[derive(Debug, Clone, Default)]
pub struct AppointmentBook {
    entries: Vec<Appointment>,
}

impl AppointmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, user_id: &UserId, day: Day) -> bool {
        self.entries.iter().any(|a| a.matches(user_id, day))
    }

    pub fn push(&mut self, appointment: Appointment) {
        debug_assert!(
            !self.contains(&appointment.user_id, appointment.day),
            "Invariant violated: duplicate appointment for {} on day {}",
            appointment.user_id,
            appointment.day
        );
        self.entries.push(appointment);
    }

    /// Removes the first appointment matching `user_id` on `day`.
    pub fn remove_first(&mut self, user_id: &UserId, day: Day) -> Option<Appointment> {
        let index = self.entries.iter().position(|a| a.matches(user_id, day))?;
        Some(self.entries.remove(index))
    }

    pub fn on_day(&self, day: Day) -> Vec<Appointment> {
        self.entries.iter().filter(|a| a.day == day).cloned().collect()
    }

    pub fn count_on_day(&self, day: Day) -> usize {
        self.entries.iter().filter(|a| a.day == day).count()
    }

    pub fn all(&self) -> &[Appointment] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
