use rust_decimal::Decimal;
use thiserror::Error;

/// Every way a teller operation can fail.
///
/// Failures are values handed back to the caller; none of them ends the
/// interactive session.
#[derive(Error, Debug)]
pub enum TellerError {
    #[error("the amount must be positive")]
    InvalidAmount,

    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },

    #[error("the withdrawal amount exceeds the limit of $ {limit:.2}")]
    WithdrawalAboveLimit { requested: Decimal, limit: Decimal },

    #[error("maximum number of daily withdrawals reached ({max})")]
    WithdrawalQuotaReached { max: u32 },

    #[error("a customer with tax id {0} is already registered")]
    CustomerAlreadyExists(String),

    #[error("no customer registered with tax id {0}")]
    CustomerNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TellerError>;
