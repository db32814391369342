use std::io;
use std::io::Write;
use std::num::NonZeroU32;

use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use crate::account::Account;
use crate::bank::Bank;
use crate::error::BankError;

/// Shape of a randomized run.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub accounts: u32,
    pub rounds: u32,
    pub max_deposit: NonZeroU32,
    pub max_withdrawal: NonZeroU32,
}

const DEFAULT_MAX_DEPOSIT: NonZeroU32 = NonZeroU32::new(100).unwrap();
const DEFAULT_MAX_WITHDRAWAL: NonZeroU32 = NonZeroU32::new(50).unwrap();

impl Default for Simulation {
    fn default() -> Self {
        Simulation {
            accounts: 20,
            rounds: 15,
            max_deposit: DEFAULT_MAX_DEPOSIT,
            max_withdrawal: DEFAULT_MAX_WITHDRAWAL,
        }
    }
}

#[inline]
pub fn token_for(index: u32) -> String {
    format!("token{}", index)
}

/// Creates `token1..=tokenN` owned by `User1..=UserN`.
pub fn populate(bank: &mut Bank, count: u32) -> Result<(), BankError> {
    for i in 1..=count {
        bank.create_account(&token_for(i), &format!("User{}", i))?;
    }
    Ok(())
}

/// Each round picks a random account, deposits into it, then withdraws from
/// it. The first failure stops the run.
pub fn run_rounds(
    bank: &mut Bank,
    simulation: &Simulation,
    rng: &mut impl Rng,
) -> Result<(), BankError> {
    if simulation.accounts == 0 {
        return Ok(());
    }

    for round in 1..=simulation.rounds {
        let token = token_for(rng.gen_range(1..=simulation.accounts));
        let deposit = Decimal::from(rng.gen_range(1..=simulation.max_deposit.get()));
        let withdrawal = Decimal::from(rng.gen_range(1..=simulation.max_withdrawal.get()));
        debug!(round, %token, %deposit, %withdrawal, "Running round");

        let account = bank.get_account_mut(&token)?;
        account.deposit(deposit)?;
        account.withdraw(withdrawal)?;
    }
    Ok(())
}

pub fn run<'a>(
    bank: &'a mut Bank,
    simulation: &Simulation,
    rng: &mut impl Rng,
) -> Result<Option<&'a Account>, BankError> {
    populate(bank, simulation.accounts)?;
    run_rounds(bank, simulation, rng)?;
    Ok(bank.account_with_highest_balance())
}

pub fn report(highest: Option<&Account>, out: &mut impl Write) -> io::Result<()> {
    match highest {
        Some(account) => {
            writeln!(out, "Account with highest balance:")?;
            writeln!(out, "{}", account.details())
        }
        None => writeln!(out, "No accounts found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal::dec;

    fn bound(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_populate() {
        let mut bank = Bank::new();
        populate(&mut bank, 20).unwrap();

        assert_eq!(bank.len(), 20);
        assert_eq!(bank.get_account("token1").unwrap().name(), "User1");
        assert_eq!(bank.get_account("token20").unwrap().name(), "User20");
        assert!(bank.get_account("token21").is_err());
        assert!(bank.accounts().all(|a| a.balance() == Decimal::ZERO));
    }

    #[test]
    fn test_run_without_accounts() {
        let mut bank = Bank::new();
        let simulation = Simulation {
            accounts: 0,
            ..Simulation::default()
        };
        let mut rng = StdRng::seed_from_u64(7);

        let highest = run(&mut bank, &simulation, &mut rng).unwrap();
        assert!(highest.is_none());
    }

    #[test]
    fn test_run_never_overdraws() {
        // Deposits always cover the withdrawal, so every round succeeds.
        let simulation = Simulation {
            accounts: 5,
            rounds: 50,
            max_deposit: bound(10),
            max_withdrawal: bound(1),
        };

        for seed in 0..10 {
            let mut bank = Bank::new();
            let mut rng = StdRng::seed_from_u64(seed);

            let highest = run(&mut bank, &simulation, &mut rng)
                .expect("Run should succeed")
                .expect("Accounts should exist")
                .clone();

            assert_eq!(bank.len(), 5);
            assert!(bank.accounts().all(|a| a.balance() >= Decimal::ZERO));
            assert!(bank.accounts().all(|a| a.balance() <= highest.balance()));

            let total: Decimal = bank.accounts().map(Account::balance).sum();
            assert!(total >= dec!(0) && total <= dec!(450));
        }
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let simulation = Simulation {
            accounts: 3,
            rounds: 20,
            max_deposit: bound(100),
            max_withdrawal: bound(1),
        };

        let mut first = Bank::new();
        let mut second = Bank::new();
        run(&mut first, &simulation, &mut StdRng::seed_from_u64(42)).unwrap();
        run(&mut second, &simulation, &mut StdRng::seed_from_u64(42)).unwrap();

        let balances = |bank: &Bank| -> Vec<(String, Decimal)> {
            bank.accounts()
                .map(|a| (a.token().to_string(), a.balance()))
                .collect()
        };
        assert_eq!(balances(&first), balances(&second));
        assert_eq!(format!("{}", first), format!("{}", second));
    }

    #[test]
    fn test_default_simulation() {
        let simulation = Simulation::default();

        assert_eq!(simulation.accounts, 20);
        assert_eq!(simulation.rounds, 15);
        assert_eq!(simulation.max_deposit.get(), 100);
        assert_eq!(simulation.max_withdrawal.get(), 50);
    }

    #[test]
    fn test_report_highest_account() {
        let mut bank = Bank::new();
        populate(&mut bank, 2).unwrap();
        bank.get_account_mut("token2").unwrap().deposit(dec!(64)).unwrap();

        let mut out = Vec::new();
        report(bank.account_with_highest_balance(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Account with highest balance:\nAccount Name: User2, Balance: 64\n"
        );
    }

    #[test]
    fn test_report_no_accounts() {
        let bank = Bank::new();

        let mut out = Vec::new();
        report(bank.account_with_highest_balance(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "No accounts found\n");
    }

    #[test]
    fn test_overdraw_stops_run() {
        let simulation = Simulation {
            accounts: 1,
            rounds: 10,
            max_deposit: bound(1),
            max_withdrawal: bound(1),
        };
        let mut bank = Bank::new();
        populate(&mut bank, 1).unwrap();
        bank.get_account_mut("token1").unwrap().deposit(dec!(3)).unwrap();

        run_rounds(&mut bank, &simulation, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(bank.get_account("token1").unwrap().balance(), dec!(3));

        let simulation = Simulation {
            max_withdrawal: bound(1000),
            rounds: 1000,
            ..simulation
        };
        let result = run_rounds(&mut bank, &simulation, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(BankError::InsufficientFunds { .. })));
        assert!(bank.get_account("token1").unwrap().balance() >= Decimal::ZERO);
    }
}
