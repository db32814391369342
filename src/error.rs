use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BankError {
    #[error("Amount should be greater than zero: {0}")]
    InvalidAmount(Decimal),
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Invalid token, must be alphanumeric: {0:?}")]
    InvalidToken(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
}
