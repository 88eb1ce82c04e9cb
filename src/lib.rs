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

//! # Vaccination Booking
//!
//! This library provides an in-memory booking engine for vaccination centers:
//! user and center registration, per-day dose capacity, appointment booking,
//! and cancellation.
//!
//! ## Core Components
//!
//! - [`BookingEngine`]: Lock-guarded store exposing the booking operations
//! - [`CapacityLedger`]: Remaining doses per day for one center
//! - [`AppointmentBook`]: Appointments held by one center
//! - [`Instruction`]: Text instruction split into positional arguments
//! - [`BookingError`]: Error types for rejected operations
//!
//! ## Example
//!
//! ```
//! use vaccination_booking::{BookingEngine, BookingError, CenterId, Day, UserId};
//!
//! let engine = BookingEngine::new();
//! let center = CenterId::from("C1");
//! let user = UserId::from("U1");
//!
//! engine.register_center("KA", "Bangalore", center.clone()).unwrap();
//! engine.register_user(user.clone(), "Asha", "F", "30", "KA", "Bangalore").unwrap();
//! engine.add_capacity(&center, "5", "1").unwrap();
//!
//! engine.book(&center, "5", &user).unwrap();
//! assert_eq!(engine.remaining_capacity(&center, Day(5)), Some(0));
//!
//! // A second booking for the same day finds no dose left.
//! assert_eq!(engine.book(&center, "5", &user), Err(BookingError::CapacityExhausted));
//! ```
//!
//! ## Thread Safety
//!
//! The engine serializes every operation behind one lock, so it can be shared
//! across threads (for example in an `Arc`) without lost updates.

mod appointment;
mod base;
mod capacity;
mod center;
mod engine;
pub mod error;
mod instruction;
mod user;

pub use appointment::{Appointment, AppointmentBook};
pub use base::{CenterId, Day, UserId};
pub use capacity::CapacityLedger;
pub use center::VaccinationCenter;
pub use engine::BookingEngine;
pub use error::{BookingError, Entity, ErrorKind, InstructionError};
pub use instruction::Instruction;
pub use user::{MIN_AGE_EXCLUSIVE, User};
