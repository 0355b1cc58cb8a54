use super::account::Account;
use super::customer::Customer;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn store(&self, customer: Customer) -> Result<Arc<Customer>>;
    /// First record matching the tax id; at most one exists.
    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Arc<Customer>>>;
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn store(&self, account: Account) -> Result<()>;
    /// All accounts in creation order.
    async fn all_accounts(&self) -> Result<Vec<Account>>;
}

pub type CustomerStoreBox = Box<dyn CustomerStore>;
pub type AccountStoreBox = Box<dyn AccountStore>;
