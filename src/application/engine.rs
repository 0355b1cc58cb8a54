use crate::domain::account::Account;
use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::ledger::{Ledger, StatementView, WithdrawalPolicy};
use crate::domain::ports::{AccountStoreBox, CustomerStoreBox};
use crate::error::{Result, TellerError};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// The main entry point for the teller session.
///
/// `TellerEngine` owns the registries and the shared ledger and processes one
/// operator command at a time. All accounts opened during the session draw on
/// the same ledger balance.
pub struct TellerEngine {
    customer_store: CustomerStoreBox,
    account_store: AccountStoreBox,
    ledger: RwLock<Ledger>,
    branch: String,
    // Next account number to hand out; taken only after the owner lookup
    // succeeds, so failed opens leave no gap.
    account_seq: AtomicU32,
}

impl TellerEngine {
    /// Creates a new `TellerEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `customer_store` - The registry of customer records.
    /// * `account_store` - The registry of opened accounts.
    /// * `branch` - Branch code stamped on every account.
    /// * `policy` - Withdrawal caps applied by the ledger.
    pub fn new(
        customer_store: CustomerStoreBox,
        account_store: AccountStoreBox,
        branch: impl Into<String>,
        policy: WithdrawalPolicy,
    ) -> Self {
        Self {
            customer_store,
            account_store,
            ledger: RwLock::new(Ledger::new(policy)),
            branch: branch.into(),
            account_seq: AtomicU32::new(1),
        }
    }

    /// Registers a new customer.
    ///
    /// Fields are trimmed of surrounding whitespace; the tax id must not be
    /// registered yet.
    pub async fn register_customer(&self, new: NewCustomer) -> Result<Arc<Customer>> {
        let customer = new.into_customer();

        if let Some(existing) = self.customer_store.find_by_tax_id(&customer.tax_id).await? {
            return Err(TellerError::CustomerAlreadyExists(existing.tax_id.clone()));
        }

        let customer = self.customer_store.store(customer).await?;
        info!(tax_id = %customer.tax_id, "customer registered");
        Ok(customer)
    }

    /// Looks a customer up by tax id.
    pub async fn find_customer(&self, tax_id: &str) -> Result<Option<Arc<Customer>>> {
        self.customer_store.find_by_tax_id(tax_id.trim()).await
    }

    /// Opens an account for a registered customer.
    ///
    /// Account numbers are sequential from 1 and assigned only on success;
    /// an unknown tax id creates nothing.
    pub async fn open_account(&self, tax_id: &str) -> Result<Account> {
        let tax_id = tax_id.trim();
        let holder = self
            .customer_store
            .find_by_tax_id(tax_id)
            .await?
            .ok_or_else(|| TellerError::CustomerNotFound(tax_id.to_string()))?;

        let number = self.account_seq.fetch_add(1, Ordering::SeqCst);
        let account = Account::new(self.branch.clone(), number, holder);
        self.account_store.store(account.clone()).await?;

        info!(number, tax_id = %account.holder.tax_id, "account opened");
        Ok(account)
    }

    /// All accounts in creation order.
    pub async fn accounts(&self) -> Result<Vec<Account>> {
        self.account_store.all_accounts().await
    }

    pub async fn deposit(&self, amount: Decimal) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        ledger.deposit(amount)?;
        debug!(%amount, balance = %ledger.balance(), "deposit applied");
        Ok(())
    }

    pub async fn withdraw(&self, amount: Decimal) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        ledger.withdraw(amount)?;
        debug!(%amount, balance = %ledger.balance(), "withdrawal applied");
        Ok(())
    }

    /// Read-only snapshot of the shared balance and statement.
    pub async fn statement(&self) -> StatementView {
        self.ledger.read().await.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::{InMemoryAccountStore, InMemoryCustomerStore};
    use rust_decimal_macros::dec;

    fn engine() -> TellerEngine {
        TellerEngine::new(
            Box::new(InMemoryCustomerStore::new()),
            Box::new(InMemoryAccountStore::new()),
            "0001",
            WithdrawalPolicy::default(),
        )
    }

    fn new_customer(tax_id: &str, name: &str) -> NewCustomer {
        NewCustomer {
            full_name: name.to_string(),
            birth_date: "01-02-1990".to_string(),
            tax_id: tax_id.to_string(),
            address: "1 Main St".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_tax_id() {
        let engine = engine();
        engine
            .register_customer(new_customer("111", "Jane Roe"))
            .await
            .unwrap();

        let result = engine
            .register_customer(new_customer("111", "John Doe"))
            .await;
        assert!(matches!(
            result,
            Err(TellerError::CustomerAlreadyExists(id)) if id == "111"
        ));

        // The first record is untouched.
        let found = engine.find_customer("111").await.unwrap().unwrap();
        assert_eq!(found.full_name, "Jane Roe");
    }

    #[tokio::test]
    async fn test_duplicate_check_uses_trimmed_tax_id() {
        let engine = engine();
        engine
            .register_customer(new_customer("111", "Jane Roe"))
            .await
            .unwrap();

        let result = engine
            .register_customer(new_customer(" 111 ", "John Doe"))
            .await;
        assert!(matches!(
            result,
            Err(TellerError::CustomerAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_open_account_requires_registered_owner() {
        let engine = engine();

        let result = engine.open_account("999").await;
        assert!(matches!(
            result,
            Err(TellerError::CustomerNotFound(id)) if id == "999"
        ));
        assert!(engine.accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_account_numbers_are_sequential_from_one() {
        let engine = engine();
        for (tax_id, name) in [("111", "Jane"), ("222", "John"), ("333", "Mary")] {
            engine
                .register_customer(new_customer(tax_id, name))
                .await
                .unwrap();
            engine.open_account(tax_id).await.unwrap();
        }

        let accounts = engine.accounts().await.unwrap();
        let numbers: Vec<u32> = accounts.iter().map(|a| a.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failed_open_leaves_no_gap_in_numbering() {
        let engine = engine();
        engine
            .register_customer(new_customer("111", "Jane Roe"))
            .await
            .unwrap();

        assert!(engine.open_account("999").await.is_err());
        let account = engine.open_account("111").await.unwrap();
        assert_eq!(account.number, 1);
    }

    #[tokio::test]
    async fn test_accounts_share_one_ledger() {
        let engine = engine();
        for tax_id in ["111", "222"] {
            engine
                .register_customer(new_customer(tax_id, "Someone"))
                .await
                .unwrap();
            engine.open_account(tax_id).await.unwrap();
        }

        engine.deposit(dec!(100.0)).await.unwrap();
        engine.withdraw(dec!(50.0)).await.unwrap();

        let view = engine.statement().await;
        assert_eq!(view.balance, dec!(50.0));
        assert_eq!(view.entries.len(), 2);
    }

    #[tokio::test]
    async fn test_statement_is_a_snapshot() {
        let engine = engine();
        engine.deposit(dec!(10)).await.unwrap();

        let before = engine.statement().await;
        engine.deposit(dec!(5)).await.unwrap();

        assert_eq!(before.entries.len(), 1);
        assert_eq!(engine.statement().await.entries.len(), 2);
    }
}
