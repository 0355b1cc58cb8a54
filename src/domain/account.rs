use super::customer::Customer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Branch code of the single supported branch.
pub const DEFAULT_BRANCH: &str = "0001";

/// A checking account tied to a registered customer.
///
/// Accounts are append-only: once opened they are never modified or removed.
/// The holder is a shared read-only link to the customer record; customer
/// records are immutable after registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub branch: String,
    /// Sequential, starting at 1, assigned on open and never reused.
    pub number: u32,
    pub holder: Arc<Customer>,
}

impl Account {
    pub fn new(branch: impl Into<String>, number: u32, holder: Arc<Customer>) -> Self {
        Self {
            branch: branch.into(),
            number,
            holder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::NewCustomer;

    fn customer(tax_id: &str) -> Arc<Customer> {
        Arc::new(
            NewCustomer {
                full_name: "Jane Roe".to_string(),
                birth_date: "01-02-1990".to_string(),
                tax_id: tax_id.to_string(),
                address: "1 Main St".to_string(),
            }
            .into_customer(),
        )
    }

    #[test]
    fn test_account_links_to_holder() {
        let holder = customer("12345678900");
        let account = Account::new(DEFAULT_BRANCH, 1, Arc::clone(&holder));

        assert_eq!(account.branch, "0001");
        assert_eq!(account.number, 1);
        assert_eq!(account.holder.tax_id, "12345678900");
        // Shared link, not a copy of the record.
        assert!(Arc::ptr_eq(&account.holder, &holder));
    }
}
