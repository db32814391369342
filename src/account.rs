use std::fmt;
use std::fmt::Display;

use rust_decimal::Decimal;
use tracing::info;

use crate::error::BankError;

/// A single ledger account. Only a [`crate::bank::Bank`] creates accounts,
/// and the balance only moves through [`Account::deposit`] and
/// [`Account::withdraw`], so it never drops below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    token: String,
    name: String,
    balance: Decimal,
}

impl Account {
    pub(crate) fn new(token: impl Into<String>, name: impl Into<String>) -> Self {
        Account {
            token: token.into(),
            name: name.into(),
            balance: Decimal::ZERO,
        }
    }

    #[inline]
    fn check_amount(amount: Decimal) -> Result<(), BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount(amount));
        }
        Ok(())
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), BankError> {
        Self::check_amount(amount)?;

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::InvalidAmount(amount))?;
        info!(
            token = %self.token,
            %amount,
            balance = %self.balance,
            "Deposited into {}'s account",
            self.name
        );
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), BankError> {
        Self::check_amount(amount)?;

        if amount > self.balance {
            return Err(BankError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }

        self.balance -= amount;
        info!(
            token = %self.token,
            %amount,
            balance = %self.balance,
            "Withdrawn from {}'s account",
            self.name
        );
        Ok(())
    }

    #[inline]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    #[inline]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn details(&self) -> String {
        self.to_string()
    }
}

impl Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Account Name: {}, Balance: {}", self.name, self.balance)
    }
}
