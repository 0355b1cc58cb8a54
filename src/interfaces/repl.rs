use crate::application::engine::TellerEngine;
use crate::domain::customer::NewCustomer;
use crate::error::{Result, TellerError};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

const MENU: &str = "\
[d]  Deposit
[s]  Withdraw
[e]  Statement
[nu] New customer
[nc] New account
[lc] List accounts
[q]  Quit
=> ";

/// One operator command, as typed at the menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Deposit,
    Withdraw,
    Statement,
    NewCustomer,
    NewAccount,
    ListAccounts,
    Quit,
    Unknown,
}

impl Command {
    /// Parses a menu code; input is trimmed and lowercased first.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "d" => Command::Deposit,
            "s" => Command::Withdraw,
            "e" => Command::Statement,
            "nu" => Command::NewCustomer,
            "nc" => Command::NewAccount,
            "lc" => Command::ListAccounts,
            "q" => Command::Quit,
            _ => Command::Unknown,
        }
    }
}

/// The interactive menu loop.
///
/// Generic over its input and output so a whole session can be driven from a
/// scripted buffer in tests. One command is read and dispatched per
/// iteration; every failure is reported and control returns to the prompt.
pub struct Repl<'a, R, W> {
    engine: &'a TellerEngine,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    pub fn new(engine: &'a TellerEngine, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    /// Runs the loop until the quit command or end of input.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{MENU}")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            match Command::parse(&line) {
                Command::Deposit => self.deposit().await?,
                Command::Withdraw => self.withdraw().await?,
                Command::Statement => self.statement().await?,
                Command::NewCustomer => self.new_customer().await?,
                Command::NewAccount => self.new_account().await?,
                Command::ListAccounts => self.list_accounts().await?,
                Command::Quit => {
                    writeln!(self.output, "Thank you for using the teller. Goodbye!")?;
                    break;
                }
                Command::Unknown => {
                    writeln!(self.output, "Invalid operation, please select again.")?;
                }
            }
        }

        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Prints a prompt and reads one trimmed line; `None` on end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(self.read_line()?.map(|line| line.trim().to_string()))
    }

    /// Prompts for a decimal amount. Unparsable input reports an invalid
    /// value and aborts the command; there is no retry loop.
    fn prompt_amount(&mut self, text: &str) -> Result<Option<Decimal>> {
        let Some(line) = self.prompt(text)? else {
            return Ok(None);
        };
        match Decimal::from_str(&line) {
            Ok(amount) => Ok(Some(amount)),
            Err(_) => {
                writeln!(self.output, "Invalid value.")?;
                Ok(None)
            }
        }
    }

    async fn deposit(&mut self) -> Result<()> {
        let Some(amount) = self.prompt_amount("Amount to deposit: $ ")? else {
            return Ok(());
        };

        match self.engine.deposit(amount).await {
            Ok(()) => writeln!(self.output, "Deposit completed successfully.")?,
            Err(err) => writeln!(self.output, "Operation failed! {err}.")?,
        }
        Ok(())
    }

    async fn withdraw(&mut self) -> Result<()> {
        let Some(amount) = self.prompt_amount("Amount to withdraw: $ ")? else {
            return Ok(());
        };

        match self.engine.withdraw(amount).await {
            Ok(()) => writeln!(self.output, "Withdrawal completed successfully.")?,
            Err(err) => writeln!(self.output, "Operation failed! {err}.")?,
        }
        Ok(())
    }

    async fn statement(&mut self) -> Result<()> {
        let view = self.engine.statement().await;

        writeln!(self.output, "\n================ STATEMENT ================")?;
        if view.entries.is_empty() {
            writeln!(self.output, "No movements recorded.")?;
        } else {
            for entry in &view.entries {
                writeln!(self.output, "{entry}")?;
            }
        }
        writeln!(self.output, "\nBalance:\t$ {:.2}", view.balance)?;
        writeln!(self.output, "===========================================\n")?;
        Ok(())
    }

    /// The tax id is asked first and checked before the remaining prompts,
    /// so a duplicate aborts the flow early.
    async fn new_customer(&mut self) -> Result<()> {
        let Some(tax_id) = self.prompt("Enter the tax id (digits only): ")? else {
            return Ok(());
        };

        if self.engine.find_customer(&tax_id).await?.is_some() {
            writeln!(
                self.output,
                "A customer with this tax id is already registered."
            )?;
            return Ok(());
        }

        let Some(full_name) = self.prompt("Enter the full name: ")? else {
            return Ok(());
        };
        let Some(birth_date) = self.prompt("Enter the birth date (dd-mm-yyyy): ")? else {
            return Ok(());
        };
        let Some(address) = self.prompt("Enter the address (street, number - district - city/ST): ")?
        else {
            return Ok(());
        };

        let new = NewCustomer {
            full_name,
            birth_date,
            tax_id,
            address,
        };
        match self.engine.register_customer(new).await {
            Ok(_) => writeln!(self.output, "Customer registered successfully.")?,
            Err(err) => writeln!(self.output, "Operation failed! {err}.")?,
        }
        Ok(())
    }

    async fn new_account(&mut self) -> Result<()> {
        let Some(tax_id) = self.prompt("Enter the customer's tax id: ")? else {
            return Ok(());
        };

        match self.engine.open_account(&tax_id).await {
            Ok(_) => writeln!(self.output, "Account opened successfully.")?,
            Err(TellerError::CustomerNotFound(_)) => {
                writeln!(self.output, "Customer not found, account opening aborted.")?;
            }
            Err(err) => writeln!(self.output, "Operation failed! {err}.")?,
        }
        Ok(())
    }

    async fn list_accounts(&mut self) -> Result<()> {
        let accounts = self.engine.accounts().await?;

        if accounts.is_empty() {
            writeln!(self.output, "No accounts on record.")?;
            return Ok(());
        }

        for account in &accounts {
            writeln!(self.output, "{}", "=".repeat(40))?;
            writeln!(self.output, "Branch:\t\t{}", account.branch)?;
            writeln!(self.output, "Account:\t{}", account.number)?;
            writeln!(self.output, "Holder:\t\t{}", account.holder.full_name)?;
            writeln!(self.output, "Tax id:\t\t{}", account.holder.tax_id)?;
        }
        writeln!(self.output, "{}", "=".repeat(40))?;
        Ok(())
    }
}
