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

//! Teller: account operations with reporting.
//!
//! The [`Teller`] runs [`Account`] operations, turns each outcome into one or
//! more [`Event`]s for its [`Reporter`], and answers with a plain `bool`
//! success flag. Callers that need the underlying error should call the
//! [`Account`] methods directly.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rust_decimal_macros::dec;
//! use overdraft_demo_rs::{Account, Event, Person, Teller};
//!
//! let owner = Arc::new(Person::new("Joao", 22, 'M', "234.567.890-00"));
//! let mut account = Account::new("2345-6", owner).with_balance(dec!(150));
//!
//! let mut teller = Teller::new(Vec::<Event>::new());
//! assert!(!teller.withdraw(&mut account, dec!(200)));
//! assert!(teller.reporter()[0].is_rejection());
//! ```

use crate::TransactionError;
use crate::account::Account;
use crate::report::{Event, Reporter};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Runs account operations and reports what happened.
#[derive(Debug)]
pub struct Teller<R: Reporter> {
    reporter: R,
}

impl<R: Reporter> Teller<R> {
    pub fn new(reporter: R) -> Self {
        Self { reporter }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Deposits `amount` into `account`.
    ///
    /// Always succeeds under the permissive policy.
    pub fn deposit(&mut self, account: &mut Account, amount: Decimal) -> bool {
        match account.deposit(amount) {
            Ok(balance) => {
                debug!(account = %account.number(), %amount, %balance, "deposit applied");
                self.reporter.report(&Event::Deposited {
                    number: account.number().clone(),
                    amount,
                    balance,
                });
                true
            }
            Err(e) => {
                warn!(account = %account.number(), %amount, error = %e, "deposit rejected");
                self.reporter.report(&Event::DepositRejected {
                    number: account.number().clone(),
                    amount,
                });
                false
            }
        }
    }

    /// Withdraws `amount` from `account` if balance plus overdraft limit covers it.
    pub fn withdraw(&mut self, account: &mut Account, amount: Decimal) -> bool {
        match account.withdraw(amount) {
            Ok(withdrawal) => {
                debug!(
                    account = %account.number(),
                    %amount,
                    balance = %withdrawal.balance,
                    "withdrawal applied"
                );
                self.reporter.report(&Event::Withdrawn {
                    number: account.number().clone(),
                    amount,
                    balance: withdrawal.balance,
                });
                true
            }
            Err(e) => {
                warn!(account = %account.number(), %amount, error = %e, "withdrawal rejected");
                self.reporter.report(&Event::WithdrawalRejected {
                    number: account.number().clone(),
                    amount,
                    available: available_from(&e, account),
                });
                false
            }
        }
    }

    /// Moves `amount` from `source` to `destination`.
    ///
    /// Reports the withdrawal on `source` first, then the transfer itself.
    /// The destination is never touched when the withdrawal fails. When the
    /// destination refuses the amount no withdrawal is attempted, so only the
    /// transfer rejection is reported.
    pub fn transfer(
        &mut self,
        source: &mut Account,
        destination: &mut Account,
        amount: Decimal,
    ) -> bool {
        match source.transfer(amount, destination) {
            Ok(transfer) => {
                debug!(
                    source = %source.number(),
                    destination = %destination.number(),
                    %amount,
                    "transfer applied"
                );
                self.reporter.report(&Event::Withdrawn {
                    number: source.number().clone(),
                    amount,
                    balance: transfer.source_balance,
                });
                self.reporter.report(&Event::Transferred {
                    amount,
                    source: source.number().clone(),
                    destination: destination.number().clone(),
                });
                true
            }
            Err(e) => {
                warn!(
                    source = %source.number(),
                    destination = %destination.number(),
                    %amount,
                    error = %e,
                    "transfer rejected"
                );
                let available = available_from(&e, source);
                if !matches!(e, TransactionError::DestinationRejected(_)) {
                    self.reporter.report(&Event::WithdrawalRejected {
                        number: source.number().clone(),
                        amount,
                        available,
                    });
                }
                self.reporter.report(&Event::TransferRejected {
                    amount,
                    source: source.number().clone(),
                    destination: destination.number().clone(),
                    available,
                });
                false
            }
        }
    }

    /// Charges `rate_percent` interest on a negative balance.
    ///
    /// Returns `true` only when interest was actually charged.
    pub fn apply_overdraft_interest(&mut self, account: &mut Account, rate_percent: Decimal) -> bool {
        match account.apply_overdraft_interest(rate_percent) {
            Ok(true) => {
                debug!(
                    account = %account.number(),
                    rate = %rate_percent,
                    balance = %account.balance(),
                    "overdraft interest charged"
                );
                self.reporter.report(&Event::InterestCharged {
                    number: account.number().clone(),
                    rate: rate_percent,
                    balance: account.balance(),
                });
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!(account = %account.number(), rate = %rate_percent, error = %e, "interest rejected");
                self.reporter.report(&Event::InterestRejected {
                    number: account.number().clone(),
                    rate: rate_percent,
                });
                false
            }
        }
    }

    /// Reports the account statement.
    pub fn print_statement(&mut self, account: &Account) {
        self.reporter.report(&Event::Statement(account.statement()));
    }
}

fn available_from(error: &TransactionError, account: &Account) -> Decimal {
    match error {
        TransactionError::InsufficientFunds { available } => *available,
        _ => account.available(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AmountPolicy;
    use crate::person::Person;
    use crate::report::NullReporter;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn account(number: &str, balance: Decimal) -> Account {
        let owner = Arc::new(Person::new("Maria", 18, 'F', "123.456.789-00"));
        Account::new(number, owner)
            .with_balance(balance)
            .with_overdraft_limit(dec!(200))
            .unwrap()
    }

    #[test]
    fn strict_deposit_reports_rejection() {
        let mut teller = Teller::new(Vec::<Event>::new());
        let mut target = account("1234-5", dec!(0)).with_policy(AmountPolicy::Strict);

        assert!(!teller.deposit(&mut target, dec!(-5)));
        assert_eq!(
            teller.reporter().as_slice(),
            &[Event::DepositRejected {
                number: target.number().clone(),
                amount: dec!(-5),
            }]
        );
    }

    #[test]
    fn interest_on_positive_balance_reports_nothing() {
        let mut teller = Teller::new(Vec::<Event>::new());
        let mut target = account("1234-5", dec!(10));

        assert!(!teller.apply_overdraft_interest(&mut target, dec!(0.5)));
        assert!(teller.reporter().is_empty());
    }

    #[test]
    fn rejected_strict_transfer_reports_current_available() {
        let mut teller = Teller::new(Vec::<Event>::new());
        let mut source = account("1234-5", dec!(50)).with_policy(AmountPolicy::Strict);
        let mut destination = account("2345-6", dec!(0));

        assert!(!teller.transfer(&mut source, &mut destination, dec!(0)));
        let events = teller.into_reporter();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            Event::TransferRejected {
                amount: dec!(0),
                source: source.number().clone(),
                destination: destination.number().clone(),
                available: dec!(250),
            }
        );
    }

    #[test]
    fn destination_rejection_skips_withdrawal_event() {
        let mut teller = Teller::new(Vec::<Event>::new());
        let mut source = account("1234-5", dec!(50));
        let mut destination = account("2345-6", dec!(0)).with_policy(AmountPolicy::Strict);

        assert!(!teller.transfer(&mut source, &mut destination, dec!(-5)));
        assert_eq!(
            teller.reporter().as_slice(),
            &[Event::TransferRejected {
                amount: dec!(-5),
                source: source.number().clone(),
                destination: destination.number().clone(),
                available: dec!(250),
            }]
        );
        assert_eq!(source.balance(), dec!(50));
    }

    #[test]
    fn rejected_interest_is_reported() {
        let mut teller = Teller::new(Vec::<Event>::new());
        let mut target = account("1234-5", dec!(-10)).with_policy(AmountPolicy::Strict);

        assert!(!teller.apply_overdraft_interest(&mut target, dec!(-1)));
        assert_eq!(
            teller.reporter().as_slice(),
            &[Event::InterestRejected {
                number: target.number().clone(),
                rate: dec!(-1),
            }]
        );
        assert_eq!(target.balance(), dec!(-10));
    }

    #[test]
    fn statement_near_decimal_max_does_not_panic() {
        let mut teller = Teller::new(Vec::<Event>::new());
        let mut target = account("1234-5", Decimal::MAX - dec!(100));

        teller.print_statement(&target);
        assert!(!teller.withdraw(&mut target, dec!(1)));
        assert_eq!(target.balance(), Decimal::MAX - dec!(100));
        assert_eq!(
            teller.reporter()[1],
            Event::WithdrawalRejected {
                number: target.number().clone(),
                amount: dec!(1),
                available: Decimal::MAX,
            }
        );
    }

    #[test]
    fn null_reporter_still_applies_operations() {
        let mut teller = Teller::new(NullReporter);
        let mut target = account("1234-5", dec!(100));
        assert!(teller.withdraw(&mut target, dec!(250)));
        assert_eq!(target.balance(), dec!(-150));
    }
}
