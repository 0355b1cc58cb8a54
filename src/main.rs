use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::io;
use teller::application::engine::TellerEngine;
use teller::domain::account::DEFAULT_BRANCH;
use teller::domain::ledger::{MAX_WITHDRAWALS, WITHDRAWAL_LIMIT, WithdrawalPolicy};
use teller::domain::ports::{AccountStoreBox, CustomerStoreBox};
use teller::infrastructure::in_memory::{InMemoryAccountStore, InMemoryCustomerStore};
use teller::interfaces::repl::Repl;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Branch code stamped on every account
    #[arg(long, default_value = DEFAULT_BRANCH)]
    branch: String,

    /// Number of withdrawals allowed over the session
    #[arg(long, default_value_t = MAX_WITHDRAWALS)]
    max_withdrawals: u32,

    /// Largest amount a single withdrawal may move
    #[arg(long, default_value_t = WITHDRAWAL_LIMIT)]
    withdrawal_limit: Decimal,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the menu prompt.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let customers: CustomerStoreBox = Box::new(InMemoryCustomerStore::new());
    let accounts: AccountStoreBox = Box::new(InMemoryAccountStore::new());
    let engine = TellerEngine::new(
        customers,
        accounts,
        cli.branch,
        WithdrawalPolicy {
            max_withdrawals: cli.max_withdrawals,
            per_withdrawal_limit: cli.withdrawal_limit,
        },
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut repl = Repl::new(&engine, stdin.lock(), stdout.lock());
    repl.run().await.into_diagnostic()?;

    Ok(())
}
