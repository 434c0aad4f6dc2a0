use super::FinanceService;
use crate::core::analytics::start_of_month;
use crate::core::errors::FinanceError;
use crate::core::models::transaction::TransactionType;
use crate::core::money::{overflow, round_money};
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

const SYSTEM_PROMPT: &str = "You are a bold and smart financial coach. Write strictly to the point, concisely. \
Tips should be useful and specific. No fluff or repetition. Answer in English.";

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TipsResponse {
    pub model: String,
    pub tips: Vec<String>,
}

/// Builds the user prompt from per-category monthly spending.
fn spending_prompt(by_category: &BTreeMap<String, Decimal>, total: Decimal) -> String {
    let lines: Vec<String> = by_category
        .iter()
        .map(|(category, amount)| format!("- {}: {} CAD", category, round_money(*amount)))
        .collect();
    format!(
        "Monthly expenses: {} CAD.\nCategories:\n{}\n\nGive me 3 tips on how to improve my spending.",
        round_money(total),
        lines.join("\n")
    )
}

fn split_tips(answer: Option<String>) -> Vec<String> {
    let tips: Vec<String> = answer
        .as_deref()
        .unwrap_or_default()
        .trim()
        .lines()
        .map(str::to_string)
        .collect();
    if tips.iter().all(|t| t.trim().is_empty()) {
        return vec!["No tips".to_string()];
    }
    tips
}

impl<S: Storage> FinanceService<S> {
    /// Spending advice for the current month's manual expenses.
    pub async fn spending_tips(&self, user_id: &str, now: DateTime<Utc>) -> Result<TipsResponse, FinanceError> {
        let month_start = start_of_month(now);
        let expenses: Vec<_> = self
            .storage
            .get_user_transactions(user_id)
            .await?
            .into_iter()
            .filter(|t| t.kind == TransactionType::Expense && t.date >= month_start)
            .collect();
        if expenses.is_empty() {
            return Err(FinanceError::NotFound("No expenses found to analyze".to_string()));
        }

        let advice = self
            .integrations
            .advice
            .as_ref()
            .ok_or_else(|| FinanceError::ServiceUnavailable("AI tips are not configured".to_string()))?;

        let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut total = Decimal::ZERO;
        for expense in &expenses {
            if let Some(category) = &expense.category {
                let sum = by_category.entry(category.clone()).or_default();
                *sum = sum.checked_add(expense.amount).ok_or_else(overflow)?;
                total = total.checked_add(expense.amount).ok_or_else(overflow)?;
            }
        }

        let answer = advice
            .complete(SYSTEM_PROMPT, &spending_prompt(&by_category, total))
            .await
            .inspect_err(|e| tracing::error!("Tips request failed for user {}: {}", user_id, e))?;
        tracing::info!("Generated spending tips for user {}", user_id);

        Ok(TipsResponse {
            model: advice.model().to_string(),
            tips: split_tips(answer),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_categories() {
        let mut by_category = BTreeMap::new();
        by_category.insert("Food".to_string(), Decimal::new(12345, 3));
        by_category.insert("Rent".to_string(), Decimal::from(900));
        let prompt = spending_prompt(&by_category, Decimal::new(912345, 3));
        assert!(prompt.starts_with("Monthly expenses: 912.35 CAD."));
        assert!(prompt.contains("- Food: 12.35 CAD\n- Rent: 900 CAD"));
    }

    #[test]
    fn empty_answer_yields_placeholder() {
        assert_eq!(split_tips(None), vec!["No tips"]);
        assert_eq!(split_tips(Some("  \n ".to_string())), vec!["No tips"]);
        assert_eq!(split_tips(Some("1. Cook\n2. Walk".to_string())).len(), 2);
    }
}
