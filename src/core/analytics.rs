//! Aggregations over the unified ledger (manual and bank-imported
//! transactions). Every function takes `now` so results are deterministic.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::core::errors::FinanceError;
use crate::core::models::analytics::{
    BudgetCategoryStat, BudgetOverview, CategoryStat, ComparisonWindow, IncomeExpenseComparison, LineChartResponse,
    LinePoint, MonthComparison, PaymentStat, PieChartResponse, SummaryResponse, Timeframe, TotalSpent,
};
use crate::core::models::bank::BankTransaction;
use crate::core::models::budget::Budget;
use crate::core::models::transaction::{PaginatedTransactions, Transaction, TransactionSource, TransactionType};
use crate::core::money::{checked_sum, overflow, percent, round_money};

const TOP_CATEGORIES: usize = 5;

/// Builds the unified ledger, newest first.
pub fn merge_ledger(
    manual: Vec<Transaction>,
    bank: &[BankTransaction],
    source: Option<TransactionSource>,
    kind: Option<TransactionType>,
) -> Result<Vec<Transaction>, FinanceError> {
    let mut entries: Vec<Transaction> = Vec::with_capacity(manual.len() + bank.len());
    if source != Some(TransactionSource::Plaid) {
        entries.extend(manual);
    }
    if source != Some(TransactionSource::Manual) {
        for transaction in bank {
            entries.push(transaction.to_ledger_entry()?);
        }
    }
    if let Some(kind) = kind {
        entries.retain(|t| t.kind == kind);
    }
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(entries)
}

pub fn paginate(entries: Vec<Transaction>, limit: usize, offset: usize) -> PaginatedTransactions {
    let total = entries.len();
    let items: Vec<Transaction> = entries.into_iter().skip(offset).take(limit).collect();
    let has_next = offset + items.len() < total;
    PaginatedTransactions {
        items,
        total,
        limit,
        offset,
        has_next,
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Monday 00:00 UTC of the current week.
pub fn start_of_week(now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    midnight(today - Days::new(today.weekday().num_days_from_monday() as u64))
}

pub fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    midnight(today - Days::new(today.day0() as u64))
}

pub fn start_of_year(now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    midnight(today - Days::new(today.ordinal0() as u64))
}

pub fn start_of_previous_month(now: DateTime<Utc>) -> DateTime<Utc> {
    let last_day = start_of_month(now).date_naive() - Days::new(1);
    midnight(last_day - Days::new(last_day.day0() as u64))
}

fn filter_kind(ledger: &[Transaction], kind: Option<TransactionType>) -> Vec<&Transaction> {
    ledger.iter().filter(|t| kind.is_none_or(|k| t.kind == k)).collect()
}

fn total<'a>(entries: impl IntoIterator<Item = &'a Transaction>) -> Result<Decimal, FinanceError> {
    checked_sum(entries.into_iter().map(|t| t.amount))
}

/// Sums amounts per category, skipping uncategorized entries. Sorted by
/// amount descending, then name.
fn by_category<'a>(entries: impl IntoIterator<Item = &'a Transaction>) -> Result<Vec<(String, Decimal)>, FinanceError> {
    let mut sums: HashMap<&str, Decimal> = HashMap::new();
    for t in entries {
        if let Some(category) = t.category.as_deref().filter(|c| !c.is_empty()) {
            add_to(sums.entry(category).or_default(), t.amount)?;
        }
    }
    Ok(sorted_sums(sums))
}

fn add_to(sum: &mut Decimal, amount: Decimal) -> Result<(), FinanceError> {
    *sum = sum.checked_add(amount).ok_or_else(overflow)?;
    Ok(())
}

fn sorted_sums(sums: HashMap<&str, Decimal>) -> Vec<(String, Decimal)> {
    let mut sums: Vec<(String, Decimal)> = sums.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    sums.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sums
}

fn category_stats(sums: Vec<(String, Decimal)>, total: Decimal) -> Result<Vec<CategoryStat>, FinanceError> {
    sums.into_iter()
        .map(|(category, amount)| {
            Ok(CategoryStat {
                category,
                amount: round_money(amount),
                percent: percent(amount, total)?,
            })
        })
        .collect()
}

pub fn summary(
    ledger: &[Transaction],
    kind: Option<TransactionType>,
    now: DateTime<Utc>,
) -> Result<SummaryResponse, FinanceError> {
    let entries = filter_kind(ledger, kind);
    let since = |start: DateTime<Utc>| total(entries.iter().copied().filter(|t| t.date >= start)).map(round_money);

    let categories = by_category(entries.iter().copied())?;
    let categorized_total = checked_sum(categories.iter().map(|(_, amount)| *amount))?;
    let mut top_categories = category_stats(categories, categorized_total)?;
    top_categories.truncate(TOP_CATEGORIES);

    let mut methods: HashMap<&str, Decimal> = HashMap::new();
    for t in entries.iter().filter(|t| t.source == TransactionSource::Manual) {
        if let Some(method) = t.payment_method.as_deref().filter(|m| !m.is_empty()) {
            add_to(methods.entry(method).or_default(), t.amount)?;
        }
    }
    let methods = sorted_sums(methods);
    let methods_total = checked_sum(methods.iter().map(|(_, amount)| *amount))?;
    let payment_methods = methods
        .into_iter()
        .map(|(method, amount)| {
            Ok(PaymentStat {
                method,
                amount: round_money(amount),
                percent: percent(amount, methods_total)?,
            })
        })
        .collect::<Result<Vec<_>, FinanceError>>()?;

    Ok(SummaryResponse {
        total_spent: TotalSpent {
            week: since(start_of_week(now))?,
            month: since(start_of_month(now))?,
            year: since(start_of_year(now))?,
        },
        top_categories,
        payment_methods,
    })
}

/// Current month grouped by category. Percentages are relative to the month
/// total, uncategorized entries included.
pub fn pie(
    ledger: &[Transaction],
    kind: Option<TransactionType>,
    now: DateTime<Utc>,
) -> Result<PieChartResponse, FinanceError> {
    let month_start = start_of_month(now);
    let entries: Vec<&Transaction> = filter_kind(ledger, kind)
        .into_iter()
        .filter(|t| t.date >= month_start)
        .collect();
    if entries.is_empty() {
        return Err(FinanceError::NotFound("No transactions found for this month".to_string()));
    }
    let month_total = total(entries.iter().copied())?;
    Ok(PieChartResponse {
        data: category_stats(by_category(entries)?, month_total)?,
    })
}

/// One point per day from `now - timeframe` through today, zero-filled.
pub fn line(
    ledger: &[Transaction],
    kind: Option<TransactionType>,
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Result<LineChartResponse, FinanceError> {
    let days = timeframe.days();
    let window_start = now - TimeDelta::days(days);
    let entries: Vec<&Transaction> = filter_kind(ledger, kind)
        .into_iter()
        .filter(|t| t.date >= window_start)
        .collect();
    if entries.is_empty() {
        return Err(FinanceError::NotFound(format!(
            "No transactions found for the last {} days",
            days
        )));
    }

    let mut by_day: HashMap<NaiveDate, Decimal> = HashMap::new();
    for t in entries {
        add_to(by_day.entry(t.date.date_naive()).or_default(), t.amount)?;
    }

    let today = now.date_naive();
    let data = window_start
        .date_naive()
        .iter_days()
        .take_while(|day| *day <= today)
        .map(|day| LinePoint {
            date: day.format("%Y-%m-%d").to_string(),
            amount: round_money(by_day.get(&day).copied().unwrap_or_default()),
        })
        .collect();

    Ok(LineChartResponse { timeframe, data })
}

pub fn compare_months(
    ledger: &[Transaction],
    kind: Option<TransactionType>,
    now: DateTime<Utc>,
) -> Result<MonthComparison, FinanceError> {
    let entries = filter_kind(ledger, kind);
    let month_start = start_of_month(now);
    let previous_start = start_of_previous_month(now);

    let current = total(entries.iter().copied().filter(|t| t.date >= month_start))?;
    let previous = total(
        entries
            .iter()
            .copied()
            .filter(|t| t.date >= previous_start && t.date < month_start),
    )?;

    let change_percent = if previous > Decimal::ZERO {
        percent(current.checked_sub(previous).ok_or_else(overflow)?, previous)?
    } else {
        Decimal::ZERO
    };
    Ok(MonthComparison {
        previous_month_total: round_money(previous),
        current_month_total: round_money(current),
        change_percent,
    })
}

/// Current-month expenses against each budget, in budget order.
pub fn budget_overview(
    ledger: &[Transaction],
    budgets: &[Budget],
    now: DateTime<Utc>,
) -> Result<BudgetOverview, FinanceError> {
    if budgets.is_empty() {
        return Err(FinanceError::NotFound("No budgets found".to_string()));
    }
    let month_start = start_of_month(now);
    let spent: HashMap<String, Decimal> = by_category(
        ledger
            .iter()
            .filter(|t| t.kind == TransactionType::Expense && t.date >= month_start),
    )?
    .into_iter()
    .collect();

    let categories = budgets
        .iter()
        .map(|budget| {
            let spent = spent.get(&budget.category).copied().unwrap_or_default();
            Ok(BudgetCategoryStat {
                category: budget.category.clone(),
                budget: round_money(budget.limit),
                spent: round_money(spent),
                percent: percent(spent, budget.limit)?,
            })
        })
        .collect::<Result<Vec<_>, FinanceError>>()?;
    Ok(BudgetOverview { categories })
}

pub fn compare_types(
    ledger: &[Transaction],
    window: ComparisonWindow,
    now: DateTime<Utc>,
) -> Result<IncomeExpenseComparison, FinanceError> {
    let timeframe = Timeframe::from(window);
    let days = timeframe.days();
    let window_start = now - TimeDelta::days(days);
    let entries: Vec<&Transaction> = ledger.iter().filter(|t| t.date >= window_start).collect();
    if entries.is_empty() {
        return Err(FinanceError::NotFound(format!(
            "No transactions found for the last {} days",
            days
        )));
    }

    let (incomes, expenses): (Vec<&Transaction>, Vec<&Transaction>) =
        entries.into_iter().partition(|t| t.kind == TransactionType::Income);
    let total_income = total(incomes.iter().copied())?;
    let total_expense = total(expenses.iter().copied())?;
    let grand_total = total_income.checked_add(total_expense).ok_or_else(overflow)?;
    let difference = total_income.checked_sub(total_expense).ok_or_else(overflow)?;

    Ok(IncomeExpenseComparison {
        timeframe,
        total_income: round_money(total_income),
        total_expense: round_money(total_expense),
        difference: round_money(difference),
        income_percent: percent(total_income, grand_total)?,
        expense_percent: percent(total_expense, grand_total)?,
        top_income_categories: category_stats(by_category(incomes)?, total_income)?,
        top_expense_categories: category_stats(by_category(expenses)?, total_expense)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn entry(amount: &str, kind: TransactionType, category: Option<&str>, date: DateTime<Utc>) -> Transaction {
        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: "u1".to_string(),
            amount: dec(amount),
            source: TransactionSource::Manual,
            kind,
            category: category.map(str::to_string),
            payment_method: None,
            date,
            description: None,
        }
    }

    fn expense(amount: &str, category: &str, date: DateTime<Utc>) -> Transaction {
        entry(amount, TransactionType::Expense, Some(category), date)
    }

    // Wednesday
    fn now() -> DateTime<Utc> {
        at(2025, 3, 12)
    }

    #[test]
    fn period_starts() {
        assert_eq!(start_of_week(now()), Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap());
        assert_eq!(start_of_month(now()), Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(start_of_year(now()), Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            start_of_previous_month(at(2025, 1, 15)),
            Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn week_start_crosses_month_boundary() {
        // Sunday 2 March 2025 belongs to the week starting Monday 24 February
        assert_eq!(
            start_of_week(at(2025, 3, 2)),
            Utc.with_ymd_and_hms(2025, 2, 24, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn paginate_reports_has_next() {
        let entries: Vec<Transaction> = (0..5).map(|i| expense("1", "Food", at(2025, 3, i + 1))).collect();
        let page = paginate(entries.clone(), 2, 0);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 5);
        assert!(page.has_next);

        let last = paginate(entries.clone(), 2, 4);
        assert_eq!(last.items.len(), 1);
        assert!(!last.has_next);

        let past_end = paginate(entries, 2, 10);
        assert!(past_end.items.is_empty());
        assert!(!past_end.has_next);
    }

    #[test]
    fn merge_filters_and_sorts_newest_first() {
        let manual = vec![
            expense("10", "Food", at(2025, 3, 1)),
            entry("500", TransactionType::Income, Some("Salary"), at(2025, 3, 5)),
        ];
        let bank = vec![BankTransaction {
            id: "b1".to_string(),
            user_id: "u1".to_string(),
            bank_account_id: "a1".to_string(),
            transaction_id: "t1".to_string(),
            source: TransactionSource::Plaid,
            name: "Grocer".to_string(),
            amount: 20.5,
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            category: Some(vec!["Food".to_string()]),
            payment_method: None,
            payment_channel: None,
            iso_currency_code: None,
            pending: false,
            created_at: Utc::now(),
        }];

        let all = merge_ledger(manual.clone(), &bank, None, None).unwrap();
        let amounts: Vec<Decimal> = all.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![dec("500"), dec("20.5"), dec("10")]);

        let expenses = merge_ledger(manual.clone(), &bank, None, Some(TransactionType::Expense)).unwrap();
        assert_eq!(expenses.len(), 2);

        let only_bank = merge_ledger(manual, &bank, Some(TransactionSource::Plaid), None).unwrap();
        assert_eq!(only_bank.len(), 1);
        assert_eq!(only_bank[0].source, TransactionSource::Plaid);
    }

    #[test]
    fn summary_totals_and_top_categories() {
        let mut ledger = vec![
            expense("10.005", "Food", at(2025, 3, 11)),
            expense("30", "Transport", at(2025, 3, 3)),
            expense("60", "Housing", at(2025, 1, 20)),
            expense("5", "Food", at(2024, 12, 31)),
            entry("1000", TransactionType::Income, Some("Salary"), at(2025, 3, 11)),
        ];
        ledger[1].payment_method = Some("Visa".to_string());
        let summary = summary(&ledger, Some(TransactionType::Expense), now()).unwrap();

        assert_eq!(summary.total_spent.week, dec("10.01"));
        assert_eq!(summary.total_spent.month, dec("40.01"));
        assert_eq!(summary.total_spent.year, dec("100.01"));

        let names: Vec<&str> = summary.top_categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Housing", "Transport", "Food"]);
        assert_eq!(summary.payment_methods.len(), 1);
        assert_eq!(summary.payment_methods[0].percent, dec("100"));
    }

    #[test]
    fn summary_keeps_five_categories() {
        let ledger: Vec<Transaction> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|c| expense("1", c, at(2025, 3, 11)))
            .collect();
        let summary = summary(&ledger, None, now()).unwrap();
        let names: Vec<&str> = summary.top_categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn pie_requires_current_month_entries() {
        let ledger = vec![expense("10", "Food", at(2025, 2, 27))];
        let err = pie(&ledger, None, now()).unwrap_err();
        assert_eq!(err.to_string(), "No transactions found for this month");
    }

    #[test]
    fn pie_percent_uses_month_total() {
        let ledger = vec![
            expense("30", "Food", at(2025, 3, 2)),
            expense("10", "Rent", at(2025, 3, 3)),
            entry("60", TransactionType::Expense, None, at(2025, 3, 4)),
        ];
        let chart = pie(&ledger, None, now()).unwrap();
        assert_eq!(chart.data[0].category, "Food");
        assert_eq!(chart.data[0].percent, dec("30"));
        assert_eq!(chart.data[1].percent, dec("10"));
    }

    #[test]
    fn line_fills_missing_days() {
        let ledger = vec![
            expense("5", "Food", at(2025, 3, 10)),
            expense("2.5", "Food", at(2025, 3, 10)),
        ];
        let chart = line(&ledger, None, Timeframe::Week, now()).unwrap();
        assert_eq!(chart.data.len(), 8);
        assert_eq!(chart.data[0].date, "2025-03-05");
        assert_eq!(chart.data[7].date, "2025-03-12");
        let tenth = chart.data.iter().find(|p| p.date == "2025-03-10").unwrap();
        assert_eq!(tenth.amount, dec("7.5"));
        assert_eq!(chart.data[0].amount, Decimal::ZERO);
    }

    #[test]
    fn line_reports_empty_window() {
        let err = line(&[], None, Timeframe::Month, now()).unwrap_err();
        assert_eq!(err.to_string(), "No transactions found for the last 30 days");
    }

    #[test]
    fn compare_months_change() {
        let ledger = vec![
            expense("100", "Food", at(2025, 2, 14)),
            expense("150", "Food", at(2025, 3, 2)),
        ];
        let comparison = compare_months(&ledger, None, now()).unwrap();
        assert_eq!(comparison.previous_month_total, dec("100"));
        assert_eq!(comparison.current_month_total, dec("150"));
        assert_eq!(comparison.change_percent, dec("50"));

        let fresh = compare_months(&ledger[1..], None, now()).unwrap();
        assert_eq!(fresh.change_percent, Decimal::ZERO);
    }

    #[test]
    fn budget_overview_tracks_expenses() {
        let budgets = vec![
            Budget {
                id: "b1".to_string(),
                user_id: "u1".to_string(),
                category: "Food".to_string(),
                limit: dec("200"),
                created_at: Utc::now(),
            },
            Budget {
                id: "b2".to_string(),
                user_id: "u1".to_string(),
                category: "Fun".to_string(),
                limit: Decimal::ZERO,
                created_at: Utc::now(),
            },
        ];
        let ledger = vec![
            expense("50", "Food", at(2025, 3, 2)),
            expense("70", "Food", at(2025, 2, 2)),
            entry("80", TransactionType::Income, Some("Food"), at(2025, 3, 2)),
        ];
        let overview = budget_overview(&ledger, &budgets, now()).unwrap();
        assert_eq!(overview.categories[0].spent, dec("50"));
        assert_eq!(overview.categories[0].percent, dec("25"));
        assert_eq!(overview.categories[1].spent, Decimal::ZERO);
        assert_eq!(overview.categories[1].percent, Decimal::ZERO);

        assert!(budget_overview(&ledger, &[], now()).is_err());
    }

    #[test]
    fn compare_types_splits_income_and_expense() {
        let ledger = vec![
            entry("300", TransactionType::Income, Some("Salary"), at(2025, 3, 10)),
            expense("100", "Food", at(2025, 3, 11)),
            expense("1", "Food", at(2024, 3, 11)),
        ];
        let comparison = compare_types(&ledger, ComparisonWindow::Month, now()).unwrap();
        assert_eq!(comparison.total_income, dec("300"));
        assert_eq!(comparison.total_expense, dec("100"));
        assert_eq!(comparison.difference, dec("200"));
        assert_eq!(comparison.income_percent, dec("75"));
        assert_eq!(comparison.expense_percent, dec("25"));
        assert_eq!(comparison.top_expense_categories[0].percent, dec("100"));
    }

    #[test]
    fn overflowing_totals_are_errors() {
        let huge = "50000000000000000000000000000";
        let ledger = vec![expense(huge, "Food", at(2025, 3, 10)), expense(huge, "Food", at(2025, 3, 11))];
        assert!(summary(&ledger, None, now()).is_err());
        assert!(pie(&ledger, None, now()).is_err());
        assert!(compare_types(&ledger, ComparisonWindow::Month, now()).is_err());
    }
}
