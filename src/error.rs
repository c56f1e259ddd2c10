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

//! Error types for account operations.

use crate::base::AccountNumber;
use rust_decimal::Decimal;
use thiserror::Error;

/// Account operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// Withdrawal would exceed balance plus overdraft limit
    #[error("insufficient funds (available: {available})")]
    InsufficientFunds { available: Decimal },

    /// Amount or rate is zero or negative under the strict policy
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// Overdraft limit given at construction is negative
    #[error("overdraft limit must not be negative")]
    NegativeOverdraftLimit,

    /// Balance arithmetic overflowed the decimal range
    #[error("arithmetic overflow")]
    Overflow,

    /// No account with this number is open in the branch
    #[error("unknown account {0}")]
    UnknownAccount(AccountNumber),

    /// An account with this number is already open in the branch
    #[error("duplicate account {0}")]
    DuplicateAccount(AccountNumber),

    /// Transfer source and destination are the same account
    #[error("cannot transfer from an account into itself")]
    SameAccount,

    /// Transfer destination refused the amount; nothing was withdrawn
    #[error("destination rejected transfer: {0}")]
    DestinationRejected(Box<TransactionError>),
}
