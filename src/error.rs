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

//! Error types for booking operations and instruction parsing.

use std::fmt;
use thiserror::Error;

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    User,
    Center,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::User => f.write_str("user"),
            Entity::Center => f.write_str("vaccination center"),
        }
    }
}

/// Booking engine errors.
///
/// A failed operation never mutates the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Registration reused an existing identifier
    #[error("{0} with this ID already exists")]
    DuplicateKey(Entity),

    /// A numeric argument could not be parsed
    #[error("invalid {field} value: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    /// User is 18 or younger
    #[error("user is not eligible (age {age}, must be over 18)")]
    Ineligible { age: i64 },

    /// Referenced user or center is not registered
    #[error("{0} not found")]
    NotFound(Entity),

    /// No doses left for the requested day
    #[error("no capacity left on the requested day")]
    CapacityExhausted,

    /// The user already holds an appointment at this center on this day
    #[error("user already booked an appointment for this day")]
    DuplicateBooking,

    /// Cancellation target does not exist
    #[error("appointment not found")]
    AppointmentNotFound,

    /// Listing query has nothing to return
    #[error("no bookings found")]
    NoBookings,
}

/// Field-free classification of a [`BookingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DuplicateKey,
    InvalidInput,
    Ineligible,
    NotFound,
    CapacityExhausted,
    DuplicateBooking,
    AppointmentNotFound,
    NoBookings,
}

impl BookingError {
    pub(crate) fn invalid_input(field: &'static str, value: &str) -> Self {
        BookingError::InvalidInput {
            field,
            value: value.to_owned(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::DuplicateKey(_) => ErrorKind::DuplicateKey,
            BookingError::InvalidInput { .. } => ErrorKind::InvalidInput,
            BookingError::Ineligible { .. } => ErrorKind::Ineligible,
            BookingError::NotFound(_) => ErrorKind::NotFound,
            BookingError::CapacityExhausted => ErrorKind::CapacityExhausted,
            BookingError::DuplicateBooking => ErrorKind::DuplicateBooking,
            BookingError::AppointmentNotFound => ErrorKind::AppointmentNotFound,
            BookingError::NoBookings => ErrorKind::NoBookings,
        }
    }
}

/// Errors raised while splitting an input line into an instruction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstructionError {
    /// Line had no tokens
    #[error("empty instruction")]
    Empty,

    /// Line contains bytes that are not UTF-8
    #[error("instruction is not valid UTF-8")]
    NotUtf8,

    /// First token is not a known instruction
    #[error("unknown instruction {0:?}")]
    Unknown(String),

    /// Too few positional arguments
    #[error("{instruction} expects {expected} arguments, got {found}")]
    MissingArguments {
        instruction: &'static str,
        expected: usize,
        found: usize,
    },
}
