use crate::core::errors::FinanceError;
use crate::core::models::{
    bank::{BankAccount, BankConnection, BankTransaction},
    budget::Budget,
    category::Category,
    payment_method::PaymentMethod,
    refresh_token::RefreshToken,
    transaction::Transaction,
    user::User,
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<String, User>>>,
    users_by_email: Arc<RwLock<HashMap<String, String>>>,
    refresh_tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
    transactions: Arc<RwLock<HashMap<String, Transaction>>>,
    categories: Arc<RwLock<HashMap<String, Category>>>,
    payment_methods: Arc<RwLock<HashMap<String, PaymentMethod>>>,
    budgets: Arc<RwLock<HashMap<String, Budget>>>,
    bank_connections: Arc<RwLock<HashMap<String, BankConnection>>>,
    bank_accounts: Arc<RwLock<HashMap<String, BankAccount>>>,
    bank_transactions: Arc<RwLock<HashMap<String, BankTransaction>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: User) -> Result<(), FinanceError> {
        let mut users_by_email = self.users_by_email.write().await;
        if users_by_email.contains_key(&user.email) {
            return Err(FinanceError::EmailAlreadyRegistered(user.email));
        }
        users_by_email.insert(user.email.clone(), user.id.clone());
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn update_user(&self, user: User) -> Result<(), FinanceError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(FinanceError::NotFound("User not found".to_string()));
        }
        users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, FinanceError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, FinanceError> {
        let user_id = {
            let users_by_email = self.users_by_email.read().await;
            users_by_email.get(email).cloned()
        };
        match user_id {
            Some(id) => self.get_user(&id).await,
            None => Ok(None),
        }
    }

    async fn get_user_by_google_id(&self, google_id: &str) -> Result<Option<User>, FinanceError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.google_id.as_deref() == Some(google_id))
            .cloned())
    }

    async fn save_refresh_token(&self, token: RefreshToken) -> Result<(), FinanceError> {
        let mut tokens = self.refresh_tokens.write().await;
        tokens.insert(token.token.clone(), token);
        Ok(())
    }

    async fn get_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, FinanceError> {
        let tokens = self.refresh_tokens.read().await;
        Ok(tokens.get(token).cloned())
    }

    async fn delete_refresh_token(&self, token: &str) -> Result<bool, FinanceError> {
        let mut tokens = self.refresh_tokens.write().await;
        Ok(tokens.remove(token).is_some())
    }

    async fn delete_user_refresh_tokens(&self, user_id: &str) -> Result<usize, FinanceError> {
        let mut tokens = self.refresh_tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| t.user_id != user_id);
        Ok(before - tokens.len())
    }

    async fn save_transaction(&self, transaction: Transaction) -> Result<(), FinanceError> {
        let mut transactions = self.transactions.write().await;
        transactions.insert(transaction.id.clone(), transaction);
        Ok(())
    }

    async fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>, FinanceError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(transaction_id).cloned())
    }

    async fn get_user_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, FinanceError> {
        let transactions = self.transactions.read().await;
        let mut result: Vec<Transaction> = transactions.values().filter(|t| t.user_id == user_id).cloned().collect();
        result.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(result)
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<bool, FinanceError> {
        let mut transactions = self.transactions.write().await;
        Ok(transactions.remove(transaction_id).is_some())
    }

    async fn reassign_category(&self, user_id: &str, from: &str, to: &str) -> Result<usize, FinanceError> {
        let mut transactions = self.transactions.write().await;
        let mut count = 0;
        for t in transactions
            .values_mut()
            .filter(|t| t.user_id == user_id && t.category.as_deref() == Some(from))
        {
            t.category = Some(to.to_string());
            count += 1;
        }
        Ok(count)
    }

    async fn reassign_payment_method(&self, user_id: &str, from: &str, to: &str) -> Result<usize, FinanceError> {
        let mut transactions = self.transactions.write().await;
        let mut count = 0;
        for t in transactions
            .values_mut()
            .filter(|t| t.user_id == user_id && t.payment_method.as_deref() == Some(from))
        {
            t.payment_method = Some(to.to_string());
            count += 1;
        }
        Ok(count)
    }

    async fn save_category(&self, category: Category) -> Result<(), FinanceError> {
        let mut categories = self.categories.write().await;
        categories.insert(category.id.clone(), category);
        Ok(())
    }

    async fn get_category(&self, category_id: &str) -> Result<Option<Category>, FinanceError> {
        let categories = self.categories.read().await;
        Ok(categories.get(category_id).cloned())
    }

    async fn get_categories_for_user(&self, user_id: &str) -> Result<Vec<Category>, FinanceError> {
        let categories = self.categories.read().await;
        let mut result: Vec<Category> = categories
            .values()
            .filter(|c| c.user_id.is_none() || c.is_owned_by(user_id))
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            a.user_id
                .is_some()
                .cmp(&b.user_id.is_some())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(result)
    }

    async fn find_user_category(&self, user_id: &str, name: &str) -> Result<Option<Category>, FinanceError> {
        let categories = self.categories.read().await;
        Ok(categories
            .values()
            .find(|c| c.is_owned_by(user_id) && same_name(&c.name, name))
            .cloned())
    }

    async fn find_default_category(&self, name: &str) -> Result<Option<Category>, FinanceError> {
        let categories = self.categories.read().await;
        Ok(categories
            .values()
            .find(|c| c.user_id.is_none() && c.name == name)
            .cloned())
    }

    async fn delete_category(&self, category_id: &str) -> Result<bool, FinanceError> {
        let mut categories = self.categories.write().await;
        Ok(categories.remove(category_id).is_some())
    }

    async fn save_payment_method(&self, method: PaymentMethod) -> Result<(), FinanceError> {
        let mut methods = self.payment_methods.write().await;
        methods.insert(method.id.clone(), method);
        Ok(())
    }

    async fn get_payment_method(&self, method_id: &str) -> Result<Option<PaymentMethod>, FinanceError> {
        let methods = self.payment_methods.read().await;
        Ok(methods.get(method_id).cloned())
    }

    async fn get_user_payment_methods(&self, user_id: &str) -> Result<Vec<PaymentMethod>, FinanceError> {
        let methods = self.payment_methods.read().await;
        let mut result: Vec<PaymentMethod> = methods.values().filter(|m| m.user_id == user_id).cloned().collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn find_payment_method(&self, user_id: &str, name: &str) -> Result<Option<PaymentMethod>, FinanceError> {
        let methods = self.payment_methods.read().await;
        Ok(methods
            .values()
            .find(|m| m.user_id == user_id && same_name(&m.name, name))
            .cloned())
    }

    async fn delete_payment_method(&self, method_id: &str) -> Result<bool, FinanceError> {
        let mut methods = self.payment_methods.write().await;
        Ok(methods.remove(method_id).is_some())
    }

    async fn save_budget(&self, budget: Budget) -> Result<(), FinanceError> {
        let mut budgets = self.budgets.write().await;
        budgets.insert(budget.id.clone(), budget);
        Ok(())
    }

    async fn get_budget(&self, user_id: &str, category: &str) -> Result<Option<Budget>, FinanceError> {
        let budgets = self.budgets.read().await;
        Ok(budgets
            .values()
            .find(|b| b.user_id == user_id && b.category == category)
            .cloned())
    }

    async fn get_user_budgets(&self, user_id: &str) -> Result<Vec<Budget>, FinanceError> {
        let budgets = self.budgets.read().await;
        let mut result: Vec<Budget> = budgets.values().filter(|b| b.user_id == user_id).cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.category.cmp(&b.category)));
        Ok(result)
    }

    async fn delete_budget(&self, user_id: &str, category: &str) -> Result<bool, FinanceError> {
        let mut budgets = self.budgets.write().await;
        let before = budgets.len();
        budgets.retain(|_, b| !(b.user_id == user_id && b.category == category));
        Ok(budgets.len() < before)
    }

    async fn save_bank_connection(&self, connection: BankConnection) -> Result<(), FinanceError> {
        let mut connections = self.bank_connections.write().await;
        connections.insert(connection.id.clone(), connection);
        Ok(())
    }

    async fn get_bank_connection(&self, connection_id: &str) -> Result<Option<BankConnection>, FinanceError> {
        let connections = self.bank_connections.read().await;
        Ok(connections.get(connection_id).cloned())
    }

    async fn get_user_bank_connections(&self, user_id: &str) -> Result<Vec<BankConnection>, FinanceError> {
        let connections = self.bank_connections.read().await;
        let mut result: Vec<BankConnection> = connections.values().filter(|c| c.user_id == user_id).cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn delete_bank_connection(&self, connection_id: &str) -> Result<bool, FinanceError> {
        let mut connections = self.bank_connections.write().await;
        Ok(connections.remove(connection_id).is_some())
    }

    async fn save_bank_account(&self, account: BankAccount) -> Result<(), FinanceError> {
        let mut accounts = self.bank_accounts.write().await;
        if accounts
            .values()
            .any(|a| a.account_id == account.account_id && a.id != account.id)
        {
            return Err(FinanceError::Conflict(format!(
                "Bank account {} already stored",
                account.account_id
            )));
        }
        accounts.insert(account.id.clone(), account);
        Ok(())
    }

    async fn get_bank_account_by_account_id(&self, account_id: &str) -> Result<Option<BankAccount>, FinanceError> {
        let accounts = self.bank_accounts.read().await;
        Ok(accounts.values().find(|a| a.account_id == account_id).cloned())
    }

    async fn get_user_bank_accounts(&self, user_id: &str) -> Result<Vec<BankAccount>, FinanceError> {
        let accounts = self.bank_accounts.read().await;
        let mut result: Vec<BankAccount> = accounts.values().filter(|a| a.user_id == user_id).cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn delete_connection_accounts(&self, connection_id: &str) -> Result<usize, FinanceError> {
        let removed: HashSet<String> = {
            let mut accounts = self.bank_accounts.write().await;
            let ids: HashSet<String> = accounts
                .values()
                .filter(|a| a.bank_connection_id == connection_id)
                .map(|a| a.id.clone())
                .collect();
            accounts.retain(|id, _| !ids.contains(id));
            ids
        };
        let mut transactions = self.bank_transactions.write().await;
        transactions.retain(|_, t| !removed.contains(&t.bank_account_id));
        Ok(removed.len())
    }

    async fn save_bank_transaction(&self, transaction: BankTransaction) -> Result<(), FinanceError> {
        let mut transactions = self.bank_transactions.write().await;
        if transactions
            .values()
            .any(|t| t.transaction_id == transaction.transaction_id && t.id != transaction.id)
        {
            return Err(FinanceError::Conflict(format!(
                "Bank transaction {} already stored",
                transaction.transaction_id
            )));
        }
        transactions.insert(transaction.id.clone(), transaction);
        Ok(())
    }

    async fn bank_transaction_exists(&self, transaction_id: &str) -> Result<bool, FinanceError> {
        let transactions = self.bank_transactions.read().await;
        Ok(transactions.values().any(|t| t.transaction_id == transaction_id))
    }

    async fn get_user_bank_transactions(&self, user_id: &str) -> Result<Vec<BankTransaction>, FinanceError> {
        let transactions = self.bank_transactions.read().await;
        let mut result: Vec<BankTransaction> =
            transactions.values().filter(|t| t.user_id == user_id).cloned().collect();
        result.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(result)
    }

    async fn purge_user(&self, user_id: &str) -> Result<(), FinanceError> {
        let removed = self.users.write().await.remove(user_id);
        if let Some(user) = removed {
            self.users_by_email.write().await.remove(&user.email);
        }
        self.refresh_tokens.write().await.retain(|_, t| t.user_id != user_id);
        self.transactions.write().await.retain(|_, t| t.user_id != user_id);
        self.categories
            .write()
            .await
            .retain(|_, c| !c.is_owned_by(user_id));
        self.payment_methods.write().await.retain(|_, m| m.user_id != user_id);
        self.budgets.write().await.retain(|_, b| b.user_id != user_id);
        self.bank_connections.write().await.retain(|_, c| c.user_id != user_id);
        self.bank_accounts.write().await.retain(|_, a| a.user_id != user_id);
        self.bank_transactions.write().await.retain(|_, t| t.user_id != user_id);
        Ok(())
    }
}
