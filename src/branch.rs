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

//! Branch: accounts indexed by number.
//!
//! The [`Branch`] holds every open [`Account`] and replays scripted
//! [`Operation`]s against them through a [`Teller`].
//!
//! # Execution
//!
//! | Operation | Behavior |
//! |-----------|----------|
//! | Deposit | Credits the account |
//! | Withdraw | Debits the account (fails past the overdraft limit) |
//! | Transfer | Debits the source, credits the destination |
//! | OverdraftInterest | Compounds interest on a negative balance |
//! | Statement | Reports the account statement |

use crate::TransactionError;
use crate::account::Account;
use crate::base::AccountNumber;
use crate::operation::Operation;
use crate::report::Reporter;
use crate::teller::Teller;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Collection of accounts keyed by account number.
///
/// # Invariants
///
/// - Account numbers are unique within a branch.
/// - Iteration order is the lexicographic order of account numbers.
#[derive(Debug, Default)]
pub struct Branch {
    accounts: BTreeMap<AccountNumber, Account>,
}

impl Branch {
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }

    /// Adds an account to the branch.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::DuplicateAccount`] if an account with the
    /// same number is already open.
    pub fn open(&mut self, account: Account) -> Result<(), TransactionError> {
        let number = account.number().clone();
        if self.accounts.contains_key(&number) {
            return Err(TransactionError::DuplicateAccount(number));
        }
        debug!(account = %number, owner = account.owner().name(), "account opened");
        self.accounts.insert(number, account);
        Ok(())
    }

    pub fn account(&self, number: &AccountNumber) -> Option<&Account> {
        self.accounts.get(number)
    }

    pub fn account_mut(&mut self, number: &AccountNumber) -> Option<&mut Account> {
        self.accounts.get_mut(number)
    }

    /// Returns an iterator over all accounts, ordered by number.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of all balances, or `None` if the sum overflows a [`Decimal`].
    pub fn total_balance(&self) -> Option<Decimal> {
        self.accounts
            .values()
            .try_fold(Decimal::ZERO, |total, account| total.checked_add(account.balance()))
    }

    /// Executes `operation` through `teller`.
    ///
    /// Returns the teller's success flag. A rejected withdrawal is `Ok(false)`,
    /// not an error.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::UnknownAccount`] - an account named by the operation is not open.
    /// - [`TransactionError::SameAccount`] - a transfer names the same account twice.
    pub fn execute<R: Reporter>(
        &mut self,
        operation: &Operation,
        teller: &mut Teller<R>,
    ) -> Result<bool, TransactionError> {
        match operation {
            Operation::Deposit { account, amount } => {
                let account = self.lookup_mut(account)?;
                Ok(teller.deposit(account, *amount))
            }
            Operation::Withdraw { account, amount } => {
                let account = self.lookup_mut(account)?;
                Ok(teller.withdraw(account, *amount))
            }
            Operation::OverdraftInterest { account, rate } => {
                let account = self.lookup_mut(account)?;
                Ok(teller.apply_overdraft_interest(account, *rate))
            }
            Operation::Statement { account } => {
                let account = self.lookup_mut(account)?;
                teller.print_statement(account);
                Ok(true)
            }
            Operation::Transfer {
                account,
                destination,
                amount,
            } => {
                if account == destination {
                    warn!(account = %account, "transfer into the same account");
                    return Err(TransactionError::SameAccount);
                }

                // Take the source out so source and destination can be
                // borrowed mutably at the same time.
                let mut source = self
                    .accounts
                    .remove(account)
                    .ok_or_else(|| unknown(account))?;
                let result = match self.accounts.get_mut(destination) {
                    Some(destination) => Ok(teller.transfer(&mut source, destination, *amount)),
                    None => Err(unknown(destination)),
                };
                self.accounts.insert(account.clone(), source);
                result
            }
        }
    }

    fn lookup_mut(&mut self, number: &AccountNumber) -> Result<&mut Account, TransactionError> {
        self.accounts.get_mut(number).ok_or_else(|| unknown(number))
    }
}

fn unknown(number: &AccountNumber) -> TransactionError {
    warn!(account = %number, "unknown account");
    TransactionError::UnknownAccount(number.clone())
}
