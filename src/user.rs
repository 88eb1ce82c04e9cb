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

//! Registered users and the eligibility rule.

use crate::base::UserId;
use crate::error::BookingError;
use serde::Serialize;

/// Users must be strictly older than this to register or book.
pub const MIN_AGE_EXCLUSIVE: u32 = 18;

/// A registered user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub state: String,
    pub district: String,
}

impl User {
    /// Builds a user from raw registration fields, validating the age.
    ///
    /// # Errors
    ///
    /// - [`BookingError::InvalidInput`] - `age` is not an integer, or too large.
    /// - [`BookingError::Ineligible`] - `age` is 18 or less, negative included.
    pub fn new(
        id: UserId,
        name: &str,
        gender: &str,
        age: &str,
        state: &str,
        district: &str,
    ) -> Result<Self, BookingError> {
        let age = parse_age(age)?;
        Ok(Self {
            id,
            name: name.to_owned(),
            gender: gender.to_owned(),
            age,
            state: state.to_owned(),
            district: district.to_owned(),
        })
    }

    pub fn is_eligible(&self) -> bool {
        is_eligible_age(self.age)
    }
}

fn parse_age(raw: &str) -> Result<u32, BookingError> {
    let age = raw
        .parse::<i64>()
        .map_err(|_| BookingError::invalid_input("age", raw))?;
    if age <= i64::from(MIN_AGE_EXCLUSIVE) {
        return Err(BookingError::Ineligible { age });
    }
    u32::try_from(age).map_err(|_| BookingError::invalid_input("age", raw))
}

fn is_eligible_age(age: u32) -> bool {
    age > MIN_AGE_EXCLUSIVE
}
