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

//! Vaccination centers.

use crate::base::CenterId;
use serde::Serialize;

/// A registered vaccination site. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaccinationCenter {
    pub id: CenterId,
    pub district: String,
    pub state: String,
}

impl VaccinationCenter {
    pub fn new(id: CenterId, state: &str, district: &str) -> Self {
        Self {
            id,
            district: district.to_owned(),
            state: state.to_owned(),
        }
    }

    pub fn is_in_district(&self, district: &str) -> bool {
        self.district == district
    }
}
