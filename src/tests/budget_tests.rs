use crate::core::errors::FinanceError;
use crate::core::models::budget::BudgetInput;
use crate::tests::{add_transaction, create_test_service, expense, register_user};
use chrono::Utc;
use rust_decimal::Decimal;

fn budget(category: &str, limit: i64) -> BudgetInput {
    BudgetInput {
        category: category.to_string(),
        limit: Decimal::from(limit),
    }
}

#[tokio::test]
async fn test_budget_lifecycle() {
    let service = create_test_service();
    let user = register_user(&service, "ada@example.com").await;

    let created = service.create_budget(&user.id, budget("Food", 300)).await.unwrap();
    assert_eq!(created.limit, Decimal::from(300));

    let duplicate = service.create_budget(&user.id, budget("Food", 100)).await;
    assert!(matches!(duplicate, Err(FinanceError::Conflict(msg)) if msg == "Budget for this category already exists."));

    let updated = service.update_budget(&user.id, "Food", Decimal::from(450)).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(service.list_budgets(&user.id).await.unwrap()[0].limit, Decimal::from(450));

    service.delete_budget(&user.id, "Food").await.unwrap();
    assert!(service.list_budgets(&user.id).await.unwrap().is_empty());
    let again = service.delete_budget(&user.id, "Food").await;
    assert!(matches!(again, Err(FinanceError::BudgetNotFound(_))));
}

#[tokio::test]
async fn test_budget_validation() {
    let service = create_test_service();
    let user = register_user(&service, "ada@example.com").await;

    assert!(service.create_budget(&user.id, budget("Savings", 0)).await.is_ok());
    let negative = service.create_budget(&user.id, budget("Food", -1)).await;
    assert!(matches!(negative, Err(FinanceError::InvalidInput(field, _)) if field == "limit"));
    let unbounded = service.create_budget(&user.id, budget("Food", i64::MAX)).await;
    assert!(matches!(unbounded, Err(FinanceError::InvalidInput(field, _)) if field == "limit"));
    let missing = service.update_budget(&user.id, "Rent", Decimal::from(10)).await;
    assert!(matches!(missing, Err(FinanceError::BudgetNotFound(_))));
}

#[tokio::test]
async fn test_budget_analysis() {
    let service = create_test_service();
    let user = register_user(&service, "ada@example.com").await;
    let now = Utc::now();

    let empty = service.budget_analysis(&user.id, now).await;
    assert!(matches!(empty, Err(FinanceError::NotFound(msg)) if msg == "No budgets found"));

    service.create_budget(&user.id, budget("Food", 200)).await.unwrap();
    add_transaction(&service, &user, expense(Decimal::from(50), "Food", now)).await;

    let overview = service.budget_analysis(&user.id, now).await.unwrap();
    assert_eq!(overview.categories.len(), 1);
    let food = &overview.categories[0];
    assert_eq!(food.category, "Food");
    assert_eq!(food.spent, Decimal::from(50));
    assert_eq!(food.percent, Decimal::from(25));
}
