use crate::error::{Result, TellerError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Withdrawals allowed over the lifetime of the session.
pub const MAX_WITHDRAWALS: u32 = 3;

/// Largest amount a single withdrawal may move.
pub const WITHDRAWAL_LIMIT: Decimal = dec!(500.00);

/// Caps applied to withdrawals.
///
/// The count cap never resets; there is no day-boundary concept even though
/// the operator-facing message calls it a daily limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithdrawalPolicy {
    pub max_withdrawals: u32,
    pub per_withdrawal_limit: Decimal,
}

impl Default for WithdrawalPolicy {
    fn default() -> Self {
        Self {
            max_withdrawals: MAX_WITHDRAWALS,
            per_withdrawal_limit: WITHDRAWAL_LIMIT,
        }
    }
}

/// One movement on the statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementEntry {
    Deposit(Decimal),
    Withdrawal(Decimal),
}

impl fmt::Display for StatementEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementEntry::Deposit(amount) => write!(f, "Deposit:\t$ {amount:.2}"),
            StatementEntry::Withdrawal(amount) => write!(f, "Withdrawal:\t$ {amount:.2}"),
        }
    }
}

/// Read-only snapshot of the ledger for display.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementView {
    pub balance: Decimal,
    pub entries: Vec<StatementEntry>,
}

/// The single shared balance and its movement log.
///
/// One instance serves the whole process regardless of how many accounts
/// exist; accounts do not carry balances of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    balance: Decimal,
    withdrawal_count: u32,
    statement: Vec<StatementEntry>,
    policy: WithdrawalPolicy,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(WithdrawalPolicy::default())
    }
}

impl Ledger {
    pub fn new(policy: WithdrawalPolicy) -> Self {
        Self {
            balance: Decimal::ZERO,
            withdrawal_count: 0,
            statement: Vec::new(),
            policy,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn withdrawal_count(&self) -> u32 {
        self.withdrawal_count
    }

    pub fn policy(&self) -> WithdrawalPolicy {
        self.policy
    }

    pub fn statement(&self) -> &[StatementEntry] {
        &self.statement
    }

    /// Adds funds to the balance and logs the movement.
    ///
    /// Rejects non-positive amounts without touching any state.
    pub fn deposit(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(TellerError::InvalidAmount);
        }

        self.balance += amount;
        self.statement.push(StatementEntry::Deposit(amount));
        Ok(())
    }

    /// Removes funds from the balance and logs the movement.
    ///
    /// Validation is an exclusive priority chain; the first failing check
    /// decides the reported reason even when several hold at once:
    /// non-positive amount, then insufficient balance, then the
    /// per-withdrawal limit, then the withdrawal count cap. State changes
    /// only when every check passes.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(TellerError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(TellerError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }
        if amount > self.policy.per_withdrawal_limit {
            return Err(TellerError::WithdrawalAboveLimit {
                requested: amount,
                limit: self.policy.per_withdrawal_limit,
            });
        }
        if self.withdrawal_count >= self.policy.max_withdrawals {
            return Err(TellerError::WithdrawalQuotaReached {
                max: self.policy.max_withdrawals,
            });
        }

        self.balance -= amount;
        self.withdrawal_count += 1;
        self.statement.push(StatementEntry::Withdrawal(amount));
        Ok(())
    }

    /// Snapshot of the balance and all movements, in operation order.
    pub fn snapshot(&self) -> StatementView {
        StatementView {
            balance: self.balance,
            entries: self.statement.clone(),
        }
    }
}
