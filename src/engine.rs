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

//! Booking engine.
//!
//! The [`BookingEngine`] owns every user, center, capacity ledger, and
//! appointment book. It registers users and centers, tops up daily capacity,
//! books and cancels appointments, and answers listing queries.
//!
//! # Locking
//!
//! All state sits behind a single [`Mutex`]. Every public method takes the lock
//! for its whole duration, so check-then-act sequences such as "capacity left,
//! then decrement" cannot interleave with another caller. Reads block writes and
//! vice versa. Nothing inside the lock blocks or performs I/O.

use crate::appointment::{Appointment, AppointmentBook};
use crate::base::{CenterId, Day, UserId};
use crate::capacity::CapacityLedger;
use crate::center::VaccinationCenter;
use crate::error::{BookingError, Entity};
use crate::user::User;
use parking_lot::Mutex;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A center together with the state hanging off it.
#[derive(Debug)]
struct CenterEntry {
    center: VaccinationCenter,
    capacity: CapacityLedger,
    appointments: AppointmentBook,
}

impl CenterEntry {
    fn new(center: VaccinationCenter) -> Self {
        Self {
            center,
            capacity: CapacityLedger::new(),
            appointments: AppointmentBook::new(),
        }
    }

    fn assert_invariants(&self, day: Day) {
        debug_assert!(
            self.appointments.count_on_day(day) as u64 + u64::from(self.capacity.remaining(day))
                == u64::from(self.capacity.added(day)),
            "Invariant violated: center {} day {} has {} bookings and {} remaining of {} added",
            self.center.id,
            day,
            self.appointments.count_on_day(day),
            self.capacity.remaining(day),
            self.capacity.added(day)
        );
    }
}

#[derive(Debug, Default)]
struct EngineState {
    users: HashMap<UserId, User>,
    centers: HashMap<CenterId, CenterEntry>,
}

impl EngineState {
    fn center(&self, center_id: &CenterId) -> Result<&CenterEntry, BookingError> {
        self.centers
            .get(center_id)
            .ok_or(BookingError::NotFound(Entity::Center))
    }

    fn center_mut(&mut self, center_id: &CenterId) -> Result<&mut CenterEntry, BookingError> {
        self.centers
            .get_mut(center_id)
            .ok_or(BookingError::NotFound(Entity::Center))
    }

    fn user(&self, user_id: &UserId) -> Result<&User, BookingError> {
        self.users
            .get(user_id)
            .ok_or(BookingError::NotFound(Entity::User))
    }

    fn register_user(
        &mut self,
        id: UserId,
        name: &str,
        gender: &str,
        age: &str,
        state: &str,
        district: &str,
    ) -> Result<(), BookingError> {
        let Entry::Vacant(slot) = self.users.entry(id) else {
            return Err(BookingError::DuplicateKey(Entity::User));
        };
        let user = User::new(slot.key().clone(), name, gender, age, state, district)?;
        debug!(user_id = %user.id, age = user.age, district = %user.district, "user registered");
        slot.insert(user);
        Ok(())
    }

    fn register_center(
        &mut self,
        state: &str,
        district: &str,
        id: CenterId,
    ) -> Result<(), BookingError> {
        let Entry::Vacant(slot) = self.centers.entry(id) else {
            return Err(BookingError::DuplicateKey(Entity::Center));
        };
        let center = VaccinationCenter::new(slot.key().clone(), state, district);
        debug!(center_id = %center.id, district = %center.district, "center registered");
        slot.insert(CenterEntry::new(center));
        Ok(())
    }

    fn add_capacity(
        &mut self,
        center_id: &CenterId,
        day: &str,
        capacity: &str,
    ) -> Result<u32, BookingError> {
        let entry = self.center_mut(center_id)?;
        let day = Day::parse(day)?;
        let doses = capacity
            .parse::<u32>()
            .map_err(|_| BookingError::invalid_input("capacity", capacity))?;

        let remaining = entry.capacity.add(day, doses)?;
        entry.assert_invariants(day);
        debug!(%center_id, %day, doses, remaining, "capacity added");
        Ok(remaining)
    }

    fn book(&mut self, center_id: &CenterId, day: &str, user_id: &UserId) -> Result<(), BookingError> {
        self.center(center_id)?;
        let day = Day::parse(day)?;
        let user = self.user(user_id)?;
        if !user.is_eligible() {
            return Err(BookingError::Ineligible {
                age: i64::from(user.age),
            });
        }

        let entry = self.center_mut(center_id)?;
        if entry.capacity.remaining(day) == 0 {
            return Err(BookingError::CapacityExhausted);
        }
        if entry.appointments.contains(user_id, day) {
            return Err(BookingError::DuplicateBooking);
        }

        // Nothing below can fail once both checks passed.
        let remaining = entry.capacity.reserve(day)?;
        entry.appointments.push(Appointment {
            center_id: center_id.clone(),
            user_id: user_id.clone(),
            day,
        });
        entry.assert_invariants(day);
        debug!(%center_id, %user_id, %day, remaining, "appointment booked");
        Ok(())
    }

    fn cancel(
        &mut self,
        center_id: &CenterId,
        day: &str,
        user_id: &UserId,
    ) -> Result<(), BookingError> {
        self.center(center_id)?;
        let day = Day::parse(day)?;
        self.user(user_id)?;

        let entry = self.center_mut(center_id)?;
        entry
            .appointments
            .remove_first(user_id, day)
            .ok_or(BookingError::AppointmentNotFound)?;
        let remaining = entry.capacity.release(day);
        entry.assert_invariants(day);
        debug!(%center_id, %user_id, %day, remaining, "appointment cancelled");
        Ok(())
    }

    fn centers_in_district(&self, district: &str) -> Vec<VaccinationCenter> {
        let mut centers: Vec<_> = self
            .centers
            .values()
            .filter(|entry| entry.center.is_in_district(district))
            .map(|entry| entry.center.clone())
            .collect();
        centers.sort_by(|a, b| a.id.cmp(&b.id));
        centers
    }

    fn bookings_on_day(&self, center_id: &CenterId, day: &str) -> Result<Vec<Appointment>, BookingError> {
        let entry = self.center(center_id)?;
        let day = Day::parse(day)?;

        if entry.appointments.is_empty() {
            debug!(%center_id, "center has no bookings at all");
            return Err(BookingError::NoBookings);
        }
        let bookings = entry.appointments.on_day(day);
        if bookings.is_empty() {
            debug!(%center_id, %day, "center has no bookings on day");
            return Err(BookingError::NoBookings);
        }
        Ok(bookings)
    }
}

/// In-memory booking engine shared by any number of callers.
///
/// # Invariants
///
/// - Remaining capacity for a `(center, day)` is never negative, and the number
///   of appointments on that day never exceeds the doses ever added for it.
/// - A user holds at most one appointment per center per day.
/// - A failed operation leaves the store unchanged.
#[derive(Debug, Default)]
pub struct BookingEngine {
    inner: Mutex<EngineState>,
}

impl BookingEngine {
    /// Creates an engine with no users or centers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// - [`BookingError::DuplicateKey`] - `id` is already registered.
    /// - [`BookingError::InvalidInput`] - `age` is not an integer.
    /// - [`BookingError::Ineligible`] - `age` is 18 or less, including negative ages.
    pub fn register_user(
        &self,
        id: UserId,
        name: &str,
        gender: &str,
        age: &str,
        state: &str,
        district: &str,
    ) -> Result<(), BookingError> {
        let result = self
            .inner
            .lock()
            .register_user(id, name, gender, age, state, district);
        traced("register_user", result)
    }

    /// Registers a center with no capacity and no appointments.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::DuplicateKey`] if `id` is already registered.
    pub fn register_center(
        &self,
        state: &str,
        district: &str,
        id: CenterId,
    ) -> Result<(), BookingError> {
        let result = self.inner.lock().register_center(state, district, id);
        traced("register_center", result)
    }

    /// Adds `capacity` doses to the center's remaining count for `day`.
    ///
    /// Repeated additions for the same day accumulate. Returns the remaining
    /// count after the addition.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`] - center is unknown.
    /// - [`BookingError::InvalidInput`] - `day` or `capacity` is not a
    ///   non-negative integer, or the total would overflow.
    pub fn add_capacity(
        &self,
        center_id: &CenterId,
        day: &str,
        capacity: &str,
    ) -> Result<u32, BookingError> {
        let result = self.inner.lock().add_capacity(center_id, day, capacity);
        traced("add_capacity", result)
    }

    /// Books `user_id` at `center_id` on `day`, consuming one dose.
    ///
    /// Checks run in this order, and the first failure is returned:
    ///
    /// | Check | Error |
    /// |-------|-------|
    /// | center exists | [`BookingError::NotFound`] |
    /// | day parses | [`BookingError::InvalidInput`] |
    /// | user exists | [`BookingError::NotFound`] |
    /// | user is over 18 | [`BookingError::Ineligible`] |
    /// | a dose remains | [`BookingError::CapacityExhausted`] |
    /// | no booking for this user and day | [`BookingError::DuplicateBooking`] |
    pub fn book(&self, center_id: &CenterId, day: &str, user_id: &UserId) -> Result<(), BookingError> {
        let result = self.inner.lock().book(center_id, day, user_id);
        traced("book", result)
    }

    /// Cancels the user's appointment at `center_id` on `day`, returning the dose.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`] - center or user is unknown.
    /// - [`BookingError::InvalidInput`] - `day` is not a non-negative integer.
    /// - [`BookingError::AppointmentNotFound`] - no such appointment.
    pub fn cancel(
        &self,
        center_id: &CenterId,
        day: &str,
        user_id: &UserId,
    ) -> Result<(), BookingError> {
        let result = self.inner.lock().cancel(center_id, day, user_id);
        traced("cancel", result)
    }

    /// Returns every center in `district`, ordered by id. Empty if none.
    pub fn centers_in_district(&self, district: &str) -> Vec<VaccinationCenter> {
        self.inner.lock().centers_in_district(district)
    }

    /// Returns all appointments at `center_id` on `day`, in booking order.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`] - center is unknown.
    /// - [`BookingError::InvalidInput`] - `day` is not a non-negative integer.
    /// - [`BookingError::NoBookings`] - the center has no appointments at all,
    ///   or none on `day`.
    pub fn bookings_on_day(
        &self,
        center_id: &CenterId,
        day: &str,
    ) -> Result<Vec<Appointment>, BookingError> {
        let result = self.inner.lock().bookings_on_day(center_id, day);
        traced("bookings_on_day", result)
    }

    pub fn user(&self, user_id: &UserId) -> Option<User> {
        self.inner.lock().users.get(user_id).cloned()
    }

    pub fn center(&self, center_id: &CenterId) -> Option<VaccinationCenter> {
        self.inner
            .lock()
            .centers
            .get(center_id)
            .map(|entry| entry.center.clone())
    }

    /// Remaining doses at `center_id` on `day`; `None` if the center is unknown.
    pub fn remaining_capacity(&self, center_id: &CenterId, day: Day) -> Option<u32> {
        self.inner
            .lock()
            .centers
            .get(center_id)
            .map(|entry| entry.capacity.remaining(day))
    }

    /// Remaining doses per day for `center_id`; `None` if the center is unknown.
    pub fn capacity_schedule(&self, center_id: &CenterId) -> Option<BTreeMap<Day, u32>> {
        self.inner
            .lock()
            .centers
            .get(center_id)
            .map(|entry| entry.capacity.schedule())
    }

    /// Every appointment at `center_id` in booking order; `None` if the center is unknown.
    pub fn appointments(&self, center_id: &CenterId) -> Option<Vec<Appointment>> {
        self.inner
            .lock()
            .centers
            .get(center_id)
            .map(|entry| entry.appointments.all().to_vec())
    }

    pub fn user_count(&self) -> usize {
        self.inner.lock().users.len()
    }

    pub fn center_count(&self) -> usize {
        self.inner.lock().centers.len()
    }
}

fn traced<T>(operation: &'static str, result: Result<T, BookingError>) -> Result<T, BookingError> {
    if let Err(error) = &result {
        debug!(operation, %error, "operation rejected");
    }
    result
}
