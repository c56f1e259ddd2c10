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

//! Account management.
//!
//! An [`Account`] tracks a signed balance and an overdraft limit. Withdrawals
//! may take the balance below zero as long as the overdraft limit covers it;
//! interest then compounds on the negative balance.
//!
//! Operations never print. They return what happened and leave formatting to
//! the [`report`](crate::report) layer.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rust_decimal_macros::dec;
//! use overdraft_demo_rs::{Account, Person};
//!
//! let owner = Arc::new(Person::new("Maria", 18, 'F', "123.456.789-00"));
//! let mut account = Account::new("1234-5", owner)
//!     .with_balance(dec!(300))
//!     .with_overdraft_limit(dec!(200))
//!     .unwrap();
//!
//! assert_eq!(account.available(), dec!(500));
//! account.withdraw(dec!(400)).unwrap();
//! assert_eq!(account.balance(), dec!(-100));
//! ```

use crate::TransactionError;
use crate::base::AccountNumber;
use crate::person::Person;
use crate::statement::Statement;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How an account treats non-positive amounts and negative rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountPolicy {
    /// Accept any amount and let the arithmetic follow.
    ///
    /// A negative deposit lowers the balance; a negative withdrawal raises it.
    #[default]
    Permissive,
    /// Reject zero or negative amounts and negative interest rates with
    /// [`TransactionError::InvalidAmount`].
    Strict,
}

/// Result of a successful withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    pub amount: Decimal,
    /// Balance after the withdrawal.
    pub balance: Decimal,
}

/// Result of a successful transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub amount: Decimal,
    pub source_balance: Decimal,
    pub destination_balance: Decimal,
}

/// Bank account owned by a single [`Person`].
#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    owner: Arc<Person>,
    balance: Decimal,
    overdraft_limit: Decimal,
    policy: AmountPolicy,
}

impl Account {
    /// Precision used when amounts are displayed or serialized.
    pub const DECIMAL_PRECISION: u32 = 4;

    /// Creates an account with zero balance and no overdraft.
    pub fn new(number: impl Into<AccountNumber>, owner: Arc<Person>) -> Self {
        Self {
            number: number.into(),
            owner,
            balance: Decimal::ZERO,
            overdraft_limit: Decimal::ZERO,
            policy: AmountPolicy::default(),
        }
    }

    /// Sets the opening balance. Negative opening balances are allowed.
    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    /// Sets the overdraft limit.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::NegativeOverdraftLimit`] if `limit` is negative.
    pub fn with_overdraft_limit(mut self, limit: Decimal) -> Result<Self, TransactionError> {
        if limit < Decimal::ZERO {
            return Err(TransactionError::NegativeOverdraftLimit);
        }
        self.overdraft_limit = limit;
        Ok(self)
    }

    pub fn with_policy(mut self, policy: AmountPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn owner(&self) -> &Arc<Person> {
        &self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn overdraft_limit(&self) -> Decimal {
        self.overdraft_limit
    }

    pub fn policy(&self) -> AmountPolicy {
        self.policy
    }

    /// Returns `balance + overdraft_limit`, the most that can be withdrawn.
    ///
    /// Saturates at [`Decimal::MAX`] for balances at the top of the range.
    pub fn available(&self) -> Decimal {
        self.balance.saturating_add(self.overdraft_limit)
    }

    fn checked_available(&self) -> Result<Decimal, TransactionError> {
        self.balance
            .checked_add(self.overdraft_limit)
            .ok_or(TransactionError::Overflow)
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= -self.overdraft_limit,
            "Invariant violated: balance {} below overdraft limit {}",
            self.balance,
            self.overdraft_limit
        );
    }

    fn check_amount(&self, amount: Decimal) -> Result<(), TransactionError> {
        if self.policy == AmountPolicy::Strict && amount <= Decimal::ZERO {
            return Err(TransactionError::InvalidAmount);
        }
        Ok(())
    }

    /// Adds `amount` to the balance and returns the new balance.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::InvalidAmount`] - non-positive amount under [`AmountPolicy::Strict`].
    /// - [`TransactionError::Overflow`] - the new balance does not fit a [`Decimal`].
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, TransactionError> {
        self.check_amount(amount)?;
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(TransactionError::Overflow)?;
        Ok(self.balance)
    }

    /// Removes `amount` from the balance if the overdraft limit covers it.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::InsufficientFunds`] - `amount` exceeds [`available`](Self::available).
    /// - [`TransactionError::InvalidAmount`] - non-positive amount under [`AmountPolicy::Strict`].
    /// - [`TransactionError::Overflow`] - balance plus limit, or the new balance, does not fit a [`Decimal`].
    ///
    /// The balance is unchanged on error.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Withdrawal, TransactionError> {
        self.check_amount(amount)?;
        let available = self.checked_available()?;
        if amount > available {
            return Err(TransactionError::InsufficientFunds { available });
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(TransactionError::Overflow)?;
        self.assert_invariants();
        Ok(Withdrawal {
            amount,
            balance: self.balance,
        })
    }

    /// Withdraws `amount` from this account and deposits it into `destination`.
    ///
    /// Both accounts are checked before anything moves, so a failed transfer
    /// leaves both balances untouched.
    ///
    /// # Errors
    ///
    /// - Same as [`withdraw`](Self::withdraw) for failures on this account.
    /// - [`TransactionError::DestinationRejected`] - the destination refused the
    ///   amount (its strict policy, or its balance would overflow). Nothing was
    ///   withdrawn.
    pub fn transfer(
        &mut self,
        amount: Decimal,
        destination: &mut Account,
    ) -> Result<Transfer, TransactionError> {
        self.check_amount(amount)?;
        let destination_balance = destination
            .check_amount(amount)
            .and_then(|()| {
                destination
                    .balance
                    .checked_add(amount)
                    .ok_or(TransactionError::Overflow)
            })
            .map_err(|e| TransactionError::DestinationRejected(Box::new(e)))?;

        let withdrawal = self.withdraw(amount)?;
        destination.balance = destination_balance;

        Ok(Transfer {
            amount,
            source_balance: withdrawal.balance,
            destination_balance,
        })
    }

    /// Compounds `rate_percent` onto a negative balance.
    ///
    /// Returns `true` if interest was charged and `false` when the balance is
    /// zero or positive. Repeated calls keep compounding with no floor.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::InvalidAmount`] - negative rate under [`AmountPolicy::Strict`].
    /// - [`TransactionError::Overflow`] - the new balance does not fit a [`Decimal`].
    pub fn apply_overdraft_interest(&mut self, rate_percent: Decimal) -> Result<bool, TransactionError> {
        if self.policy == AmountPolicy::Strict && rate_percent < Decimal::ZERO {
            return Err(TransactionError::InvalidAmount);
        }
        if self.balance >= Decimal::ZERO {
            return Ok(false);
        }

        let factor = rate_percent
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|rate| Decimal::ONE.checked_add(rate))
            .ok_or(TransactionError::Overflow)?;
        self.balance = self
            .balance
            .checked_mul(factor)
            .ok_or(TransactionError::Overflow)?;
        Ok(true)
    }

    /// Snapshot of the account for printing.
    pub fn statement(&self) -> Statement {
        Statement {
            number: self.number.clone(),
            owner_national_id: self.owner.national_id().clone(),
            available: self.available(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn owner() -> Arc<Person> {
        Arc::new(Person::new("Maria", 18, 'F', "123.456.789-00"))
    }

    #[test]
    fn new_account_is_empty_and_permissive() {
        let account = Account::new("1234-5", owner());
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.overdraft_limit(), Decimal::ZERO);
        assert_eq!(account.policy(), AmountPolicy::Permissive);
    }

    #[test]
    fn negative_overdraft_limit_is_rejected() {
        let result = Account::new("1234-5", owner()).with_overdraft_limit(dec!(-1));
        assert_eq!(result.unwrap_err(), TransactionError::NegativeOverdraftLimit);
    }

    #[test]
    fn strict_policy_rejects_zero_deposit() {
        let mut account = Account::new("1234-5", owner()).with_policy(AmountPolicy::Strict);
        assert_eq!(account.deposit(Decimal::ZERO), Err(TransactionError::InvalidAmount));
        assert_eq!(account.balance(), Decimal::ZERO);
    }

    #[test]
    fn strict_destination_blocks_transfer_before_withdrawal() {
        let mut source = Account::new("1234-5", owner()).with_balance(dec!(100));
        let mut destination = Account::new("2345-6", owner()).with_policy(AmountPolicy::Strict);

        let result = source.transfer(dec!(-10), &mut destination);
        assert_eq!(
            result,
            Err(TransactionError::DestinationRejected(Box::new(
                TransactionError::InvalidAmount
            )))
        );
        assert_eq!(source.balance(), dec!(100));
        assert_eq!(destination.balance(), Decimal::ZERO);
    }

    #[test]
    fn deposit_overflow_leaves_balance_unchanged() {
        let mut account = Account::new("1234-5", owner()).with_balance(Decimal::MAX);
        assert_eq!(account.deposit(dec!(1)), Err(TransactionError::Overflow));
        assert_eq!(account.balance(), Decimal::MAX);
    }

    #[test]
    fn transfer_overflow_on_destination_leaves_source_unchanged() {
        let mut source = Account::new("1234-5", owner()).with_balance(dec!(10));
        let mut destination = Account::new("2345-6", owner()).with_balance(Decimal::MAX);

        assert_eq!(
            source.transfer(dec!(1), &mut destination),
            Err(TransactionError::DestinationRejected(Box::new(
                TransactionError::Overflow
            )))
        );
        assert_eq!(source.balance(), dec!(10));
    }

    #[test]
    fn strict_source_is_checked_before_destination() {
        let mut source = Account::new("1234-5", owner())
            .with_balance(dec!(100))
            .with_policy(AmountPolicy::Strict);
        let mut destination = Account::new("2345-6", owner()).with_policy(AmountPolicy::Strict);

        let result = source.transfer(Decimal::ZERO, &mut destination);
        assert_eq!(result, Err(TransactionError::InvalidAmount));
    }

    #[test]
    fn available_saturates_at_top_of_range() {
        let account = Account::new("1234-5", owner())
            .with_balance(Decimal::MAX - dec!(100))
            .with_overdraft_limit(dec!(200))
            .unwrap();
        assert_eq!(account.available(), Decimal::MAX);
        assert_eq!(account.checked_available(), Err(TransactionError::Overflow));
    }

    #[test]
    fn negative_withdrawal_under_overdraft_keeps_invariant() {
        // Starts past the limit, as compounding interest can leave it.
        let mut account = Account::new("1234-5", owner())
            .with_balance(dec!(-300))
            .with_overdraft_limit(dec!(200))
            .unwrap();
        let withdrawal = account.withdraw(dec!(-150)).unwrap();
        assert_eq!(withdrawal.balance, dec!(-150));
    }

    #[test]
    fn statement_uses_owner_national_id() {
        let account = Account::new("1234-5", owner())
            .with_balance(dec!(300))
            .with_overdraft_limit(dec!(200))
            .unwrap();
        let statement = account.statement();
        assert_eq!(statement.number.as_str(), "1234-5");
        assert_eq!(statement.owner_national_id.as_str(), "123.456.789-00");
        assert_eq!(statement.available, dec!(500));
    }

    #[test]
    fn precision_constant_is_four() {
        assert_eq!(Account::DECIMAL_PRECISION, 4);
    }
}
