use std::io;
use std::num::NonZeroU32;
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use toy_bank::bank::Bank;
use toy_bank::driver::{Simulation, report, run};

/// Runs randomized deposits and withdrawals against an in-memory bank and
/// reports the richest account.
#[derive(Parser, Debug)]
#[command(name = "toy-bank", version)]
struct Args {
    /// Number of accounts to create
    #[arg(long, default_value_t = 20)]
    accounts: u32,

    /// Number of deposit/withdrawal rounds
    #[arg(long, default_value_t = 15)]
    rounds: u32,

    /// Upper bound of a single deposit
    #[arg(long, default_value = "100")]
    max_deposit: NonZeroU32,

    /// Upper bound of a single withdrawal
    #[arg(long, default_value = "50")]
    max_withdrawal: NonZeroU32,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Print every account after the run
    #[arg(long)]
    dump: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let simulation = Simulation {
        accounts: args.accounts,
        rounds: args.rounds,
        max_deposit: args.max_deposit,
        max_withdrawal: args.max_withdrawal,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut bank = Bank::new();
    let highest = match run(&mut bank, &simulation, &mut rng) {
        Ok(highest) => highest.cloned(),
        Err(e) => {
            eprintln!("Simulation aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.dump {
        print!("{}", bank);
    }

    if let Err(e) = report(highest.as_ref(), &mut io::stdout().lock()) {
        eprintln!("Failed to write report: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
