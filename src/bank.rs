use std::collections::HashMap;
use std::fmt;
use std::fmt::Display;

use tracing::{info, warn};

use crate::account::Account;
use crate::error::BankError;

pub type Accounts = HashMap<String, Account>;

/// Registry of accounts keyed by token.
///
/// Iteration follows insertion order, which makes
/// [`Bank::account_with_highest_balance`] reproducible.
#[derive(Debug, Default)]
pub struct Bank {
    accounts: Accounts,
    order: Vec<String>,
}

impl Bank {
    pub fn new() -> Self {
        Bank {
            accounts: Accounts::new(),
            order: Vec::new(),
        }
    }

    /// A token is one or more ASCII letters or digits.
    #[inline]
    pub fn is_valid_token(token: &str) -> bool {
        !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    /// Re-creating an existing token replaces that account with a fresh one
    /// and keeps its original position.
    pub fn create_account(&mut self, token: &str, name: &str) -> Result<(), BankError> {
        if !Self::is_valid_token(token) {
            return Err(BankError::InvalidToken(token.to_string()));
        }

        let account = Account::new(token, name);
        if self.accounts.insert(token.to_string(), account).is_some() {
            warn!(token, "Replaced existing account");
        } else {
            self.order.push(token.to_string());
        }

        info!(token, name, "Account created for {} with token {}", name, token);
        Ok(())
    }

    pub fn remove_account(&mut self, token: &str) -> Result<Account, BankError> {
        let account = self
            .accounts
            .remove(token)
            .ok_or_else(|| BankError::AccountNotFound(token.to_string()))?;
        self.order.retain(|t| t != token);

        info!(token, "Account with token {} removed", token);
        Ok(account)
    }

    pub fn get_account(&self, token: &str) -> Result<&Account, BankError> {
        self.accounts
            .get(token)
            .ok_or_else(|| BankError::AccountNotFound(token.to_string()))
    }

    pub fn get_account_mut(&mut self, token: &str) -> Result<&mut Account, BankError> {
        self.accounts
            .get_mut(token)
            .ok_or_else(|| BankError::AccountNotFound(token.to_string()))
    }

    /// Accounts in insertion order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.order.iter().filter_map(|token| self.accounts.get(token))
    }

    /// Returns the first inserted account among those sharing the greatest
    /// balance, or `None` for an empty registry.
    pub fn account_with_highest_balance(&self) -> Option<&Account> {
        let mut highest: Option<&Account> = None;
        for account in self.accounts() {
            match highest {
                Some(current) if account.balance() <= current.balance() => {}
                _ => highest = Some(account),
            }
        }
        highest
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "token, name, balance")?;

        for account in self.accounts() {
            writeln!(
                f,
                "{}, {}, {}",
                account.token(),
                account.name(),
                account.balance()
            )?;
        }
        Ok(())
    }
}
