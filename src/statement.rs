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

//! Account statements.

use crate::account::Account;
use crate::base::{AccountNumber, NationalId};
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Point-in-time view of an account: number, owner and available funds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub number: AccountNumber,
    pub owner_national_id: NationalId,
    /// Balance plus overdraft limit.
    pub available: Decimal,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "*** ACCOUNT STATEMENT ***")?;
        writeln!(f, "account: {}", self.number)?;
        writeln!(f, "owner: {}", self.owner_national_id)?;
        write!(
            f,
            "available for withdrawal: {}",
            self.available.round_dp(Account::DECIMAL_PRECISION)
        )
    }
}

impl Serialize for Statement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Statement", 3)?;
        state.serialize_field("account", &self.number)?;
        state.serialize_field("owner", &self.owner_national_id)?;
        state.serialize_field(
            "available",
            &self.available.round_dp(Account::DECIMAL_PRECISION),
        )?;
        state.end()
    }
}
