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

//! Account holders.
//!
//! A [`Person`] carries identity only. Accounts point at their owner through
//! an [`Arc`](std::sync::Arc); the person never points back.

use crate::base::NationalId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Single-character sex code.
///
/// `'F'` and `'M'` map to named variants. Any other character is kept as
/// [`Sex::Other`] so the original code survives a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub enum Sex {
    Female,
    Male,
    Other(char),
}

impl Sex {
    pub fn code(self) -> char {
        match self {
            Self::Female => 'F',
            Self::Male => 'M',
            Self::Other(code) => code,
        }
    }
}

impl From<char> for Sex {
    fn from(code: char) -> Self {
        match code {
            'F' | 'f' => Self::Female,
            'M' | 'm' => Self::Male,
            other => Self::Other(other),
        }
    }
}

impl From<Sex> for char {
    fn from(sex: Sex) -> Self {
        sex.code()
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Identity record of an account holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    name: String,
    age: u32,
    sex: Sex,
    national_id: NationalId,
}

impl Person {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        sex: impl Into<Sex>,
        national_id: impl Into<NationalId>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            sex: sex.into(),
            national_id: national_id.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }
}
