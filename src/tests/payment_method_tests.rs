use crate::core::errors::FinanceError;
use crate::core::models::payment_method::{PaymentMethodInput, PaymentMethodUpdate, UNDEFINED_PAYMENT_METHOD};
use crate::tests::{add_transaction, create_test_service, expense, register_user};
use chrono::Utc;
use rust_decimal::Decimal;

fn visa() -> PaymentMethodInput {
    PaymentMethodInput {
        name: "Visa".to_string(),
        bank: Some("RBC".to_string()),
        card_type: Some("credit".to_string()),
        last4: Some("4242".to_string()),
        icon: None,
    }
}

#[tokio::test]
async fn test_create_payment_method() {
    let service = create_test_service();
    let user = register_user(&service, "ada@example.com").await;

    let method = service.create_payment_method(&user.id, visa()).await.unwrap();
    assert_eq!(method.name, "Visa");
    assert_eq!(service.list_payment_methods(&user.id).await.unwrap().len(), 1);

    let mut duplicate = visa();
    duplicate.name = " VISA ".to_string();
    let result = service.create_payment_method(&user.id, duplicate).await;
    assert!(matches!(result, Err(FinanceError::BadRequest(msg)) if msg == "Payment method with this name already exists."));
}

#[tokio::test]
async fn test_create_payment_method_validation() {
    let service = create_test_service();
    let user = register_user(&service, "ada@example.com").await;

    let mut prepaid = visa();
    prepaid.card_type = Some("prepaid".to_string());
    let result = service.create_payment_method(&user.id, prepaid).await;
    assert!(matches!(result, Err(FinanceError::InvalidInput(field, _)) if field == "card_type"));

    let mut short = visa();
    short.last4 = Some("42".to_string());
    let result = service.create_payment_method(&user.id, short).await;
    assert!(matches!(result, Err(FinanceError::InvalidInput(field, _)) if field == "last4"));
}

#[tokio::test]
async fn test_update_payment_method() {
    let service = create_test_service();
    let user = register_user(&service, "ada@example.com").await;
    let intruder = register_user(&service, "eve@example.com").await;
    let method = service.create_payment_method(&user.id, visa()).await.unwrap();

    let updated = service
        .update_payment_method(
            &user.id,
            &method.id,
            PaymentMethodUpdate {
                card_type: Some("debit".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.card_type.as_deref(), Some("debit"));
    assert_eq!(updated.name, "Visa");

    let denied = service
        .update_payment_method(&intruder.id, &method.id, PaymentMethodUpdate::default())
        .await;
    assert!(matches!(denied, Err(FinanceError::Forbidden(msg)) if msg == "Not authorized to update this method"));
    let hidden = service.get_payment_method(&intruder.id, &method.id).await;
    assert!(matches!(hidden, Err(FinanceError::PaymentMethodNotFound(_))));
}

#[tokio::test]
async fn test_delete_payment_method_reassigns_transactions() {
    let service = create_test_service();
    let user = register_user(&service, "ada@example.com").await;
    let intruder = register_user(&service, "eve@example.com").await;
    let method = service.create_payment_method(&user.id, visa()).await.unwrap();
    let mut input = expense(Decimal::from(15), "Food", Utc::now());
    input.payment_method = Some("Visa".to_string());
    let paid = add_transaction(&service, &user, input).await;

    let denied = service.delete_payment_method(&intruder.id, &method.id).await;
    assert!(matches!(denied, Err(FinanceError::Forbidden(msg)) if msg == "Forbidden"));

    service.delete_payment_method(&user.id, &method.id).await.unwrap();
    let paid = service.get_transaction(&user.id, &paid.id).await.unwrap();
    assert_eq!(paid.payment_method.as_deref(), Some(UNDEFINED_PAYMENT_METHOD));
    assert!(service.list_payment_methods(&user.id).await.unwrap().is_empty());
}
