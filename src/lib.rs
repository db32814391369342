pub mod account;
pub mod bank;
pub mod driver;
pub mod error;
