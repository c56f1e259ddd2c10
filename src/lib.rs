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

//! # Overdraft Demo
//!
//! This library models a person owning a bank account and the everyday
//! operations on it: deposits, withdrawals, transfers, statements and
//! interest on overdrawn balances.
//!
//! ## Core Components
//!
//! - [`Person`]: Account holder identity
//! - [`Account`]: Balance with an overdraft limit and its operations
//! - [`Teller`]: Runs account operations and reports them through a [`Reporter`]
//! - [`Branch`]: Accounts indexed by number, replaying scripted [`Operation`]s
//! - [`TransactionError`]: Error types for account operations
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use overdraft_demo_rs::{Account, ConsoleReporter, Person, Teller};
//! use rust_decimal_macros::dec;
//!
//! let maria = Arc::new(Person::new("Maria", 18, 'F', "123.456.789-00"));
//! let joao = Arc::new(Person::new("Joao", 22, 'M', "234.567.890-00"));
//!
//! let mut source = Account::new("1234-5", maria)
//!     .with_balance(dec!(300))
//!     .with_overdraft_limit(dec!(200))
//!     .unwrap();
//! let mut destination = Account::new("2345-6", joao).with_balance(dec!(150));
//!
//! let mut teller = Teller::new(ConsoleReporter::new(Vec::<u8>::new()));
//! assert!(teller.transfer(&mut source, &mut destination, dec!(400)));
//! assert_eq!(source.balance(), dec!(-100));
//! assert_eq!(destination.balance(), dec!(550));
//! ```

pub mod account;
mod base;
mod branch;
pub mod error;
mod operation;
mod person;
pub mod report;
mod statement;
mod teller;

pub use account::{Account, AmountPolicy, Transfer, Withdrawal};
pub use base::{AccountNumber, NationalId};
pub use branch::Branch;
pub use error::TransactionError;
pub use operation::Operation;
pub use person::{Person, Sex};
pub use report::{ConsoleReporter, Event, NullReporter, Reporter};
pub use statement::Statement;
pub use teller::Teller;
