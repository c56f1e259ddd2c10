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

//! Scripted account operations.
//!
//! An [`Operation`] names the account it acts on by number, so a sequence of
//! operations can be stored, parsed or serialized and later replayed against
//! a [`Branch`](crate::Branch).

use crate::base::AccountNumber;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
    Deposit {
        account: AccountNumber,
        amount: Decimal,
    },
    Withdraw {
        account: AccountNumber,
        amount: Decimal,
    },
    Transfer {
        account: AccountNumber,
        destination: AccountNumber,
        amount: Decimal,
    },
    #[serde(rename = "interest")]
    OverdraftInterest {
        account: AccountNumber,
        rate: Decimal,
    },
    Statement {
        account: AccountNumber,
    },
}

impl Operation {
    /// The account the operation acts on (the source, for transfers).
    pub fn account(&self) -> &AccountNumber {
        match self {
            Self::Deposit { account, .. }
            | Self::Withdraw { account, .. }
            | Self::Transfer { account, .. }
            | Self::OverdraftInterest { account, .. }
            | Self::Statement { account } => account,
        }
    }

    /// Amount moved, or the rate for interest. Zero for statements.
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Deposit { amount, .. }
            | Self::Withdraw { amount, .. }
            | Self::Transfer { amount, .. } => *amount,
            Self::OverdraftInterest { rate, .. } => *rate,
            Self::Statement { .. } => Decimal::ZERO,
        }
    }
}
