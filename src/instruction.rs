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

//! Positional extraction of text instructions.
//!
//! Each line is split on whitespace; the first token names the instruction and
//! the rest are its arguments. Only arity is checked here. Numeric parsing and
//! every other rule belong to the [`BookingEngine`](crate::BookingEngine).
//!
//! | Instruction | Arguments |
//! |-------------|-----------|
//! | `ADD_USER` | `id name gender age state district` |
//! | `ADD_VACCINATION_CENTER` | `state district id` |
//! | `ADD_CAPACITY` | `centerId day capacity` |
//! | `BOOK_VACCINATION` | `centerId day userId` |
//! | `CANCEL_BOOKING` | `centerId day userId` |
//! | `LIST_VACCINATION_CENTERS` | `district` |
//! | `LIST_ALL_BOOKINGS` | `day centerId` |

use crate::base::{CenterId, UserId};
use crate::error::InstructionError;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    AddUser {
        id: UserId,
        name: String,
        gender: String,
        age: String,
        state: String,
        district: String,
    },
    AddVaccinationCenter {
        state: String,
        district: String,
        id: CenterId,
    },
    AddCapacity {
        center_id: CenterId,
        day: String,
        capacity: String,
    },
    BookVaccination {
        center_id: CenterId,
        day: String,
        user_id: UserId,
    },
    CancelBooking {
        center_id: CenterId,
        day: String,
        user_id: UserId,
    },
    ListVaccinationCenters {
        district: String,
    },
    ListAllBookings {
        day: String,
        center_id: CenterId,
    },
}

impl Instruction {
    /// The keyword this instruction is written with.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddUser { .. } => "ADD_USER",
            Self::AddVaccinationCenter { .. } => "ADD_VACCINATION_CENTER",
            Self::AddCapacity { .. } => "ADD_CAPACITY",
            Self::BookVaccination { .. } => "BOOK_VACCINATION",
            Self::CancelBooking { .. } => "CANCEL_BOOKING",
            Self::ListVaccinationCenters { .. } => "LIST_VACCINATION_CENTERS",
            Self::ListAllBookings { .. } => "LIST_ALL_BOOKINGS",
        }
    }
}

/// Takes exactly `N` positional arguments; extra trailing tokens are ignored.
fn take<const N: usize>(
    instruction: &'static str,
    args: &[&str],
) -> Result<[String; N], InstructionError> {
    if args.len() < N {
        return Err(InstructionError::MissingArguments {
            instruction,
            expected: N,
            found: args.len(),
        });
    }
    Ok(std::array::from_fn(|i| args[i].to_owned()))
}

impl FromStr for Instruction {
    type Err = InstructionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, args)) = tokens.split_first() else {
            return Err(InstructionError::Empty);
        };

        let instruction = match keyword {
            "ADD_USER" => {
                let [id, name, gender, age, state, district] = take::<6>("ADD_USER", args)?;
                Self::AddUser {
                    id: id.into(),
                    name,
                    gender,
                    age,
                    state,
                    district,
                }
            }
            "ADD_VACCINATION_CENTER" => {
                let [state, district, id] = take::<3>("ADD_VACCINATION_CENTER", args)?;
                Self::AddVaccinationCenter {
                    state,
                    district,
                    id: id.into(),
                }
            }
            "ADD_CAPACITY" => {
                let [center_id, day, capacity] = take::<3>("ADD_CAPACITY", args)?;
                Self::AddCapacity {
                    center_id: center_id.into(),
                    day,
                    capacity,
                }
            }
            "BOOK_VACCINATION" => {
                let [center_id, day, user_id] = take::<3>("BOOK_VACCINATION", args)?;
                Self::BookVaccination {
                    center_id: center_id.into(),
                    day,
                    user_id: user_id.into(),
                }
            }
            "CANCEL_BOOKING" => {
                let [center_id, day, user_id] = take::<3>("CANCEL_BOOKING", args)?;
                Self::CancelBooking {
                    center_id: center_id.into(),
                    day,
                    user_id: user_id.into(),
                }
            }
            "LIST_VACCINATION_CENTERS" => {
                let [district] = take::<1>("LIST_VACCINATION_CENTERS", args)?;
                Self::ListVaccinationCenters { district }
            }
            "LIST_ALL_BOOKINGS" => {
                let [day, center_id] = take::<2>("LIST_ALL_BOOKINGS", args)?;
                Self::ListAllBookings {
                    day,
                    center_id: center_id.into(),
                }
            }
            other => return Err(InstructionError::Unknown(other.to_owned())),
        };

        Ok(instruction)
    }
}
