use super::*;
use crate::db::models::{
    OrderCreate, OrderStatus, PaymentCreate, PaymentMethod, PaymentStatus, PaymentUpdate,
};
use crate::utils::AppError;
use crate::workflow::{OrderWorkflow, PaymentWorkflow};

/// (order id, table id) with a 20.00 total
async fn seed_order(db: &surrealdb::Surreal<surrealdb::engine::local::Db>) -> (String, String) {
    let table = seed_table(db, 1, 4).await;
    let menu = seed_menu_item(db, "Paella", "10.00").await;
    let created = OrderWorkflow::new(db.clone())
        .create_order(OrderCreate {
            table: table.clone(),
            customer_name: None,
            notes: None,
            items: vec![line(&menu, 2)],
        })
        .await
        .expect("seed order");
    (created.order.id.unwrap().to_string(), table)
}

fn payment_create(order: &str, tip: Option<&str>) -> PaymentCreate {
    PaymentCreate {
        order: order.to_string(),
        payment_method: PaymentMethod::Card,
        amount: None,
        tip_amount: tip.map(dec),
        discount_amount: None,
        notes: None,
    }
}

fn eight_percent() -> rust_decimal::Decimal {
    dec("0.08")
}

#[tokio::test]
async fn create_payment_derives_tax_and_final_amount() {
    let db = test_db().await;
    let (order_id, _) = seed_order(&db).await;

    let workflow = PaymentWorkflow::new(db.clone(), eight_percent());
    let payment = workflow
        .create(payment_create(&order_id, Some("3.00")))
        .await
        .unwrap();

    assert_eq!(payment.amount, dec("20.00"));
    assert_eq!(payment.tax_amount, dec("1.60"));
    assert_eq!(payment.tip_amount, dec("3.00"));
    assert_eq!(payment.final_amount, dec("24.60"));
    assert_eq!(payment.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn an_order_gets_exactly_one_payment() {
    let db = test_db().await;
    let (order_id, _) = seed_order(&db).await;

    let workflow = PaymentWorkflow::new(db.clone(), eight_percent());
    workflow.create(payment_create(&order_id, None)).await.unwrap();

    let err = workflow
        .create(payment_create(&order_id, None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn cancelled_orders_cannot_be_paid() {
    let db = test_db().await;
    let (order_id, _) = seed_order(&db).await;
    OrderWorkflow::new(db.clone())
        .update_status(&order_id, OrderStatus::Cancelled)
        .await
        .unwrap();

    let workflow = PaymentWorkflow::new(db.clone(), eight_percent());
    let err = workflow
        .create(payment_create(&order_id, None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn client_supplied_amount_must_match_order_total() {
    let db = test_db().await;
    let (order_id, _) = seed_order(&db).await;

    let workflow = PaymentWorkflow::new(db.clone(), eight_percent());
    let mut payload = payment_create(&order_id, None);
    payload.amount = Some(dec("19.99"));

    let err = workflow.create(payload).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // The exact total is accepted
    let mut payload = payment_create(&order_id, None);
    payload.amount = Some(dec("20.00"));
    assert!(workflow.create(payload).await.is_ok());
}

#[tokio::test]
async fn negative_adjustments_are_rejected() {
    let db = test_db().await;
    let (order_id, _) = seed_order(&db).await;

    let workflow = PaymentWorkflow::new(db.clone(), eight_percent());
    let err = workflow
        .create(payment_create(&order_id, Some("-1.00")))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn complete_payment_settles_order_and_table_together() {
    let db = test_db().await;
    let (order_id, table_id) = seed_order(&db).await;

    let workflow = PaymentWorkflow::new(db.clone(), eight_percent());
    let payment = workflow.create(payment_create(&order_id, None)).await.unwrap();
    let payment_id = payment.id.unwrap().to_string();

    assert!(!table_is_available(&db, &table_id).await);

    let completed = workflow
        .complete(&payment_id, Some("tx-123".to_string()))
        .await
        .unwrap();
    assert_eq!(completed.payment_status, PaymentStatus::Completed);
    assert_eq!(completed.transaction_id.as_deref(), Some("tx-123"));

    // Side effects land as one set
    let order = crate::db::repository::OrderRepository::new(db.clone())
        .find_by_id(&order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Served);
    assert!(table_is_available(&db, &table_id).await);

    // Completing twice is rejected and changes nothing
    let err = workflow.complete(&payment_id, None).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    let unchanged = crate::db::repository::PaymentRepository::new(db.clone())
        .find_by_id(&payment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.payment_status, PaymentStatus::Completed);
    assert_eq!(unchanged.transaction_id.as_deref(), Some("tx-123"));
}

#[tokio::test]
async fn refund_requires_completion_and_cancels_the_order() {
    let db = test_db().await;
    let (order_id, table_id) = seed_order(&db).await;

    let workflow = PaymentWorkflow::new(db.clone(), eight_percent());
    let payment = workflow.create(payment_create(&order_id, None)).await.unwrap();
    let payment_id = payment.id.unwrap().to_string();

    // Pending payments cannot be refunded
    let err = workflow.refund(&payment_id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    workflow.complete(&payment_id, None).await.unwrap();
    let refunded = workflow.refund(&payment_id).await.unwrap();
    assert_eq!(refunded.payment_status, PaymentStatus::Refunded);

    let order = crate::db::repository::OrderRepository::new(db.clone())
        .find_by_id(&order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Cancelled);
    // Refund releases the table like every other cancellation path
    assert!(table_is_available(&db, &table_id).await);
}

#[tokio::test]
async fn update_recomputes_final_amount_while_pending() {
    let db = test_db().await;
    let (order_id, _) = seed_order(&db).await;

    let workflow = PaymentWorkflow::new(db.clone(), eight_percent());
    let payment = workflow.create(payment_create(&order_id, None)).await.unwrap();
    let payment_id = payment.id.unwrap().to_string();
    assert_eq!(payment.final_amount, dec("21.60"));

    let updated = workflow
        .update(
            &payment_id,
            PaymentUpdate {
                payment_method: None,
                amount: None,
                tip_amount: Some(dec("5.00")),
                discount_amount: Some(dec("2.00")),
                transaction_id: None,
                notes: None,
            },
        )
        .await
        .unwrap();
    // 20.00 + 5.00 + 1.60 - 2.00
    assert_eq!(updated.final_amount, dec("24.60"));

    workflow.complete(&payment_id, None).await.unwrap();
    let err = workflow
        .update(
            &payment_id,
            PaymentUpdate {
                payment_method: None,
                amount: None,
                tip_amount: Some(dec("0.00")),
                discount_amount: None,
                transaction_id: None,
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}
