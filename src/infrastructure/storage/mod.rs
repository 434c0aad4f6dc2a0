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
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    // Users
    async fn create_user(&self, user: User) -> Result<(), FinanceError>;
    async fn update_user(&self, user: User) -> Result<(), FinanceError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, FinanceError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, FinanceError>;
    async fn get_user_by_google_id(&self, google_id: &str) -> Result<Option<User>, FinanceError>;

    // Refresh tokens
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<(), FinanceError>;
    async fn get_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, FinanceError>;
    async fn delete_refresh_token(&self, token: &str) -> Result<bool, FinanceError>;
    async fn delete_user_refresh_tokens(&self, user_id: &str) -> Result<usize, FinanceError>;

    // Manual transactions
    async fn save_transaction(&self, transaction: Transaction) -> Result<(), FinanceError>;
    async fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>, FinanceError>;
    async fn get_user_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, FinanceError>;
    async fn delete_transaction(&self, transaction_id: &str) -> Result<bool, FinanceError>;
    /// Renames the category on every transaction of `user_id`, returning the count.
    async fn reassign_category(&self, user_id: &str, from: &str, to: &str) -> Result<usize, FinanceError>;
    async fn reassign_payment_method(&self, user_id: &str, from: &str, to: &str) -> Result<usize, FinanceError>;

    // Categories
    async fn save_category(&self, category: Category) -> Result<(), FinanceError>;
    async fn get_category(&self, category_id: &str) -> Result<Option<Category>, FinanceError>;
    /// Global defaults followed by the user's own categories.
    async fn get_categories_for_user(&self, user_id: &str) -> Result<Vec<Category>, FinanceError>;
    /// Case-insensitive lookup among the user's own categories.
    async fn find_user_category(&self, user_id: &str, name: &str) -> Result<Option<Category>, FinanceError>;
    async fn find_default_category(&self, name: &str) -> Result<Option<Category>, FinanceError>;
    async fn delete_category(&self, category_id: &str) -> Result<bool, FinanceError>;

    // Payment methods
    async fn save_payment_method(&self, method: PaymentMethod) -> Result<(), FinanceError>;
    async fn get_payment_method(&self, method_id: &str) -> Result<Option<PaymentMethod>, FinanceError>;
    async fn get_user_payment_methods(&self, user_id: &str) -> Result<Vec<PaymentMethod>, FinanceError>;
    /// Case-insensitive lookup among the user's payment methods.
    async fn find_payment_method(&self, user_id: &str, name: &str) -> Result<Option<PaymentMethod>, FinanceError>;
    async fn delete_payment_method(&self, method_id: &str) -> Result<bool, FinanceError>;

    // Budgets
    async fn save_budget(&self, budget: Budget) -> Result<(), FinanceError>;
    async fn get_budget(&self, user_id: &str, category: &str) -> Result<Option<Budget>, FinanceError>;
    async fn get_user_budgets(&self, user_id: &str) -> Result<Vec<Budget>, FinanceError>;
    async fn delete_budget(&self, user_id: &str, category: &str) -> Result<bool, FinanceError>;

    // Bank data
    async fn save_bank_connection(&self, connection: BankConnection) -> Result<(), FinanceError>;
    async fn get_bank_connection(&self, connection_id: &str) -> Result<Option<BankConnection>, FinanceError>;
    async fn get_user_bank_connections(&self, user_id: &str) -> Result<Vec<BankConnection>, FinanceError>;
    async fn delete_bank_connection(&self, connection_id: &str) -> Result<bool, FinanceError>;
    async fn save_bank_account(&self, account: BankAccount) -> Result<(), FinanceError>;
    async fn get_bank_account_by_account_id(&self, account_id: &str) -> Result<Option<BankAccount>, FinanceError>;
    async fn get_user_bank_accounts(&self, user_id: &str) -> Result<Vec<BankAccount>, FinanceError>;
    /// Removes the accounts of a connection and their transactions, returning
    /// the number of accounts removed.
    async fn delete_connection_accounts(&self, connection_id: &str) -> Result<usize, FinanceError>;
    async fn save_bank_transaction(&self, transaction: BankTransaction) -> Result<(), FinanceError>;
    async fn bank_transaction_exists(&self, transaction_id: &str) -> Result<bool, FinanceError>;
    async fn get_user_bank_transactions(&self, user_id: &str) -> Result<Vec<BankTransaction>, FinanceError>;

    /// Deletes the user and every document they own.
    async fn purge_user(&self, user_id: &str) -> Result<(), FinanceError>;
}

pub mod in_memory;
