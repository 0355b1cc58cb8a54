use crate::domain::account::Account;
use crate::domain::customer::Customer;
use crate::domain::ports::{AccountStore, CustomerStore};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory customer registry.
///
/// Uses `Arc<RwLock<Vec<Arc<Customer>>>>` to allow shared access. Lookup is a
/// linear scan returning the first match; the engine enforces tax id
/// uniqueness before storing, so at most one record can match.
#[derive(Default, Clone)]
pub struct InMemoryCustomerStore {
    customers: Arc<RwLock<Vec<Arc<Customer>>>>,
}

impl InMemoryCustomerStore {
    /// Creates a new, empty in-memory customer store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn store(&self, customer: Customer) -> Result<Arc<Customer>> {
        let customer = Arc::new(customer);
        let mut customers = self.customers.write().await;
        customers.push(Arc::clone(&customer));
        Ok(customer)
    }

    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Arc<Customer>>> {
        let customers = self.customers.read().await;
        Ok(customers
            .iter()
            .find(|customer| customer.tax_id == tax_id)
            .cloned())
    }
}

/// In-memory account registry.
///
/// Append-only `Vec` behind `Arc<RwLock<…>>`; listing returns the accounts in
/// creation order.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn store(&self, account: Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        accounts.push(account);
        Ok(())
    }

    async fn all_accounts(&self) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::DEFAULT_BRANCH;
    use crate::domain::customer::NewCustomer;

    fn customer(tax_id: &str, name: &str) -> Customer {
        NewCustomer {
            full_name: name.to_string(),
            birth_date: "01-02-1990".to_string(),
            tax_id: tax_id.to_string(),
            address: "1 Main St".to_string(),
        }
        .into_customer()
    }

    #[tokio::test]
    async fn test_customer_store_and_lookup() {
        let store = InMemoryCustomerStore::new();
        store.store(customer("111", "Jane Roe")).await.unwrap();

        let found = store.find_by_tax_id("111").await.unwrap().unwrap();
        assert_eq!(found.full_name, "Jane Roe");

        assert!(store.find_by_tax_id("222").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_customer_lookup_returns_first_match() {
        let store = InMemoryCustomerStore::new();
        store.store(customer("111", "First")).await.unwrap();
        store.store(customer("111", "Second")).await.unwrap();

        let found = store.find_by_tax_id("111").await.unwrap().unwrap();
        assert_eq!(found.full_name, "First");
    }

    #[tokio::test]
    async fn test_account_store_keeps_creation_order() {
        let store = InMemoryAccountStore::new();
        let holder = Arc::new(customer("111", "Jane Roe"));

        for number in 1..=3 {
            store
                .store(Account::new(DEFAULT_BRANCH, number, Arc::clone(&holder)))
                .await
                .unwrap();
        }

        let accounts = store.all_accounts().await.unwrap();
        let numbers: Vec<u32> = accounts.iter().map(|a| a.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_empty_account_store_lists_nothing() {
        let store = InMemoryAccountStore::new();
        assert!(store.all_accounts().await.unwrap().is_empty());
    }
}
