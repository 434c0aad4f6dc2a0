use super::FinanceService;
use crate::core::analytics;
use crate::core::errors::FinanceError;
use crate::core::models::analytics::{
    BudgetOverview, ComparisonWindow, IncomeExpenseComparison, LineChartResponse, MonthComparison, PieChartResponse,
    SummaryResponse, Timeframe,
};
use crate::core::models::transaction::{Transaction, TransactionType};
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, Utc};

/// Read-only reports over the unified ledger. Each takes `now` so callers
/// (and tests) control the reporting date.
impl<S: Storage> FinanceService<S> {
    async fn unified_ledger(&self, user_id: &str) -> Result<Vec<Transaction>, FinanceError> {
        let (manual, bank) = self.load_ledger(user_id).await?;
        analytics::merge_ledger(manual, &bank, None, None)
    }

    pub async fn summary(
        &self,
        user_id: &str,
        kind: Option<TransactionType>,
        now: DateTime<Utc>,
    ) -> Result<SummaryResponse, FinanceError> {
        let ledger = self.unified_ledger(user_id).await?;
        tracing::debug!("Summary over {} transactions for user {}", ledger.len(), user_id);
        analytics::summary(&ledger, kind, now)
    }

    pub async fn pie_chart(
        &self,
        user_id: &str,
        kind: Option<TransactionType>,
        now: DateTime<Utc>,
    ) -> Result<PieChartResponse, FinanceError> {
        let ledger = self.unified_ledger(user_id).await?;
        analytics::pie(&ledger, kind, now)
    }

    pub async fn line_chart(
        &self,
        user_id: &str,
        kind: Option<TransactionType>,
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> Result<LineChartResponse, FinanceError> {
        let ledger = self.unified_ledger(user_id).await?;
        analytics::line(&ledger, kind, timeframe, now)
    }

    pub async fn compare_months(
        &self,
        user_id: &str,
        kind: Option<TransactionType>,
        now: DateTime<Utc>,
    ) -> Result<MonthComparison, FinanceError> {
        let ledger = self.unified_ledger(user_id).await?;
        analytics::compare_months(&ledger, kind, now)
    }

    pub async fn budget_analysis(&self, user_id: &str, now: DateTime<Utc>) -> Result<BudgetOverview, FinanceError> {
        let (ledger, budgets) = futures::try_join!(self.unified_ledger(user_id), self.storage.get_user_budgets(user_id))?;
        analytics::budget_overview(&ledger, &budgets, now)
    }

    pub async fn compare_types(
        &self,
        user_id: &str,
        window: ComparisonWindow,
        now: DateTime<Utc>,
    ) -> Result<IncomeExpenseComparison, FinanceError> {
        let ledger = self.unified_ledger(user_id).await?;
        analytics::compare_types(&ledger, window, now)
    }
}
