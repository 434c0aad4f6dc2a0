use crate::core::errors::FinanceError;
use crate::core::models::category::{CategoryInput, CategoryUpdate, DEFAULT_CATEGORIES, UNCATEGORIZED};
use crate::tests::{add_transaction, create_test_service, expense, register_user};
use chrono::Utc;
use rust_decimal::Decimal;

fn category(name: &str) -> CategoryInput {
    CategoryInput {
        name: name.to_string(),
        icon: Some("🐶".to_string()),
        color: Some("#A1B2C3".to_string()),
    }
}

#[tokio::test]
async fn test_seed_default_categories_is_idempotent() {
    let service = create_test_service();
    assert_eq!(service.seed_default_categories().await.unwrap(), DEFAULT_CATEGORIES.len());
    assert_eq!(service.seed_default_categories().await.unwrap(), 0);

    let user = register_user(&service, "ada@example.com").await;
    let categories = service.list_categories(&user.id).await.unwrap();
    assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
    assert!(categories.iter().all(|c| c.is_default && c.user_id.is_none()));
}

#[tokio::test]
async fn test_create_category() {
    let service = create_test_service();
    service.seed_default_categories().await.unwrap();
    let user = register_user(&service, "ada@example.com").await;
    let other = register_user(&service, "bob@example.com").await;

    let created = service.create_category(&user.id, category("  Pets  ")).await.unwrap();
    assert_eq!(created.name, "Pets");
    assert!(!created.is_default);

    let listed = service.list_categories(&user.id).await.unwrap();
    assert_eq!(listed.len(), DEFAULT_CATEGORIES.len() + 1);
    assert!(listed[..DEFAULT_CATEGORIES.len()].iter().all(|c| c.is_default));
    assert_eq!(service.list_categories(&other.id).await.unwrap().len(), DEFAULT_CATEGORIES.len());

    let duplicate = service.create_category(&user.id, category("pets")).await;
    assert!(matches!(duplicate, Err(FinanceError::BadRequest(msg)) if msg == "Category with this name already exists."));
    // names are scoped per user
    assert!(service.create_category(&other.id, category("Pets")).await.is_ok());
}

#[tokio::test]
async fn test_create_category_validation() {
    let service = create_test_service();
    let user = register_user(&service, "ada@example.com").await;

    let blank = service.create_category(&user.id, category("   ")).await;
    assert!(matches!(blank, Err(FinanceError::InvalidInput(field, _)) if field == "name"));

    let long = service.create_category(&user.id, category(&"x".repeat(51))).await;
    assert!(matches!(long, Err(FinanceError::InvalidInput(field, _)) if field == "name"));

    let mut bad_color = category("Pets");
    bad_color.color = Some("red".to_string());
    let result = service.create_category(&user.id, bad_color).await;
    assert!(matches!(result, Err(FinanceError::InvalidInput(field, _)) if field == "color"));
}

#[tokio::test]
async fn test_update_category() {
    let service = create_test_service();
    let user = register_user(&service, "ada@example.com").await;
    let intruder = register_user(&service, "eve@example.com").await;
    let pets = service.create_category(&user.id, category("Pets")).await.unwrap();
    service.create_category(&user.id, category("Travel")).await.unwrap();

    let updated = service
        .update_category(
            &user.id,
            &pets.id,
            CategoryUpdate {
                name: Some("Animals".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Animals");
    assert_eq!(updated.color.as_deref(), Some("#A1B2C3"));

    let clash = service
        .update_category(
            &user.id,
            &pets.id,
            CategoryUpdate {
                name: Some("travel".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(clash, Err(FinanceError::BadRequest(_))));

    let denied = service
        .update_category(&intruder.id, &pets.id, CategoryUpdate::default())
        .await;
    assert!(matches!(denied, Err(FinanceError::Forbidden(msg)) if msg == "Not authorized to update this category"));
}

#[tokio::test]
async fn test_default_categories_are_read_only() {
    let service = create_test_service();
    service.seed_default_categories().await.unwrap();
    let user = register_user(&service, "ada@example.com").await;
    let food = service
        .list_categories(&user.id)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Food")
        .unwrap();

    let fetched = service.get_category(&user.id, &food.id).await;
    assert!(matches!(fetched, Err(FinanceError::CategoryNotFound(_))));
    let deleted = service.delete_category(&user.id, &food.id).await;
    assert!(matches!(deleted, Err(FinanceError::Forbidden(msg)) if msg == "You are not authorized to delete this category"));
}

#[tokio::test]
async fn test_delete_category_reassigns_transactions() {
    let service = create_test_service();
    let user = register_user(&service, "ada@example.com").await;
    let pets = service.create_category(&user.id, category("Pets")).await.unwrap();
    let vet = add_transaction(&service, &user, expense(Decimal::from(80), "Pets", Utc::now())).await;
    let lunch = add_transaction(&service, &user, expense(Decimal::from(12), "Food", Utc::now())).await;

    service.delete_category(&user.id, &pets.id).await.unwrap();

    let vet = service.get_transaction(&user.id, &vet.id).await.unwrap();
    assert_eq!(vet.category.as_deref(), Some(UNCATEGORIZED));
    let lunch = service.get_transaction(&user.id, &lunch.id).await.unwrap();
    assert_eq!(lunch.category.as_deref(), Some("Food"));
    assert!(matches!(
        service.get_category(&user.id, &pets.id).await,
        Err(FinanceError::CategoryNotFound(_))
    ));
}
