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

//! Reporting of account activity.
//!
//! Account operations return data; a [`Reporter`] decides what to do with
//! the resulting [`Event`]s. The crate ships three reporters:
//!
//! - [`ConsoleReporter`]: writes each event as text to any [`Write`].
//! - `Vec<Event>`: records events in memory.
//! - any `FnMut(&Event)` closure: caller-supplied callback.
//!
//! [`NullReporter`] discards everything.

use crate::account::Account;
use crate::base::AccountNumber;
use crate::statement::Statement;
use rust_decimal::Decimal;
use std::fmt;
use std::io::{self, Write};

/// Something that happened to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Deposited {
        number: AccountNumber,
        amount: Decimal,
        balance: Decimal,
    },
    DepositRejected {
        number: AccountNumber,
        amount: Decimal,
    },
    Withdrawn {
        number: AccountNumber,
        amount: Decimal,
        balance: Decimal,
    },
    WithdrawalRejected {
        number: AccountNumber,
        amount: Decimal,
        available: Decimal,
    },
    Transferred {
        amount: Decimal,
        source: AccountNumber,
        destination: AccountNumber,
    },
    TransferRejected {
        amount: Decimal,
        source: AccountNumber,
        destination: AccountNumber,
        available: Decimal,
    },
    InterestCharged {
        number: AccountNumber,
        rate: Decimal,
        balance: Decimal,
    },
    InterestRejected {
        number: AccountNumber,
        rate: Decimal,
    },
    Statement(Statement),
}

impl Event {
    /// Returns `true` for the rejection variants.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::DepositRejected { .. }
                | Self::WithdrawalRejected { .. }
                | Self::TransferRejected { .. }
                | Self::InterestRejected { .. }
        )
    }
}

fn rounded(value: &Decimal) -> Decimal {
    value.round_dp(Account::DECIMAL_PRECISION)
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposited {
                number,
                amount,
                balance,
            } => write!(
                f,
                "Deposit of {} into account {number}. New balance: {}",
                rounded(amount),
                rounded(balance)
            ),
            Self::DepositRejected { number, amount } => write!(
                f,
                "ERROR: Deposit of {} into account {number} was rejected.",
                rounded(amount)
            ),
            Self::Withdrawn {
                number, balance, ..
            } => write!(
                f,
                "Withdrawal from account {number} succeeded. New balance: {}",
                rounded(balance)
            ),
            Self::WithdrawalRejected {
                number, available, ..
            } => write!(
                f,
                "ERROR: Withdrawal from account {number} failed. Available: {}",
                rounded(available)
            ),
            Self::Transferred {
                amount,
                source,
                destination,
            } => write!(
                f,
                "Transfer of {} from account {source} to account {destination} succeeded.",
                rounded(amount)
            ),
            Self::TransferRejected {
                amount,
                source,
                destination,
                available,
            } => write!(
                f,
                "ERROR: Could not transfer {} from account {source} to account {destination}. Available: {}",
                rounded(amount),
                rounded(available)
            ),
            Self::InterestCharged {
                number,
                rate,
                balance,
            } => write!(
                f,
                "Overdraft interest of {rate}% charged on account {number}. New balance: {}",
                rounded(balance)
            ),
            Self::InterestRejected { number, rate } => write!(
                f,
                "ERROR: Overdraft interest of {rate}% on account {number} was rejected."
            ),
            Self::Statement(statement) => fmt::Display::fmt(statement, f),
        }
    }
}

/// Receives account events.
pub trait Reporter {
    fn report(&mut self, event: &Event);
}

impl<F> Reporter for F
where
    F: FnMut(&Event),
{
    fn report(&mut self, event: &Event) {
        self(event)
    }
}

impl Reporter for Vec<Event> {
    fn report(&mut self, event: &Event) {
        self.push(event.clone());
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _event: &Event) {}
}

/// Writes events as human-readable lines.
///
/// Write failures are logged and otherwise ignored; the account operation
/// that produced the event has already happened.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, event: &Event) {
        if let Err(e) = writeln!(self.writer, "{event}") {
            tracing::warn!(error = %e, "failed to write event");
        }
    }
}
