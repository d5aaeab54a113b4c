use super::*;
use crate::db::models::{OrderCreate, OrderStatus};
use crate::db::repository::OrderRepository;
use crate::utils::AppError;
use crate::workflow::OrderWorkflow;

async fn create_order(
    workflow: &OrderWorkflow,
    table: &str,
    items: Vec<OrderItemInput>,
) -> crate::db::models::OrderWithItems {
    workflow
        .create_order(OrderCreate {
            table: table.to_string(),
            customer_name: Some("Walk-in".to_string()),
            notes: None,
            items,
        })
        .await
        .expect("create order")
}

#[tokio::test]
async fn create_order_snapshots_prices_and_occupies_table() {
    let db = test_db().await;
    let table = seed_table(&db, 1, 4).await;
    let paella = seed_menu_item(&db, "Paella", "14.50").await;
    let flan = seed_menu_item(&db, "Flan", "4.00").await;

    let workflow = OrderWorkflow::new(db.clone());
    let created = create_order(&workflow, &table, vec![line(&paella, 2), line(&flan, 1)]).await;

    assert_eq!(created.order.status, OrderStatus::Pending);
    assert_eq!(created.order.total_price, dec("33.00"));
    assert_eq!(created.order.table_number, 1);
    assert_eq!(created.items.len(), 2);
    assert!(created.items.iter().any(|i| i.price == dec("14.50") && i.quantity == 2));
    assert!(!table_is_available(&db, &table).await);
}

#[tokio::test]
async fn create_order_requires_at_least_one_item() {
    let db = test_db().await;
    let table = seed_table(&db, 1, 4).await;

    let workflow = OrderWorkflow::new(db.clone());
    let err = workflow
        .create_order(OrderCreate {
            table: table.clone(),
            customer_name: None,
            notes: None,
            items: vec![],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(table_is_available(&db, &table).await);
}

#[tokio::test]
async fn create_order_with_unknown_menu_item_creates_nothing() {
    let db = test_db().await;
    let table = seed_table(&db, 1, 4).await;

    let workflow = OrderWorkflow::new(db.clone());
    let err = workflow
        .create_order(OrderCreate {
            table: table.clone(),
            customer_name: None,
            notes: None,
            items: vec![line("menu_item:missing", 1)],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let orders = OrderRepository::new(db.clone())
        .find_filtered(None, None, None)
        .await
        .unwrap();
    assert!(orders.is_empty());
    assert!(table_is_available(&db, &table).await);
}

#[tokio::test]
async fn create_order_with_unavailable_item_is_rejected() {
    let db = test_db().await;
    let table = seed_table(&db, 1, 4).await;
    let paella = seed_menu_item(&db, "Paella", "14.50").await;
    set_menu_availability(&db, &paella, false).await;

    let workflow = OrderWorkflow::new(db.clone());
    let err = workflow
        .create_order(OrderCreate {
            table,
            customer_name: None,
            notes: None,
            items: vec![line(&paella, 1)],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn add_item_recomputes_total_but_keeps_old_snapshots() {
    let db = test_db().await;
    let table = seed_table(&db, 1, 4).await;
    let paella = seed_menu_item(&db, "Paella", "14.50").await;

    let workflow = OrderWorkflow::new(db.clone());
    let created = create_order(&workflow, &table, vec![line(&paella, 1)]).await;
    let order_id = created.order.id.as_ref().unwrap().to_string();

    // Menu price changes after the first line was taken
    set_menu_price(&db, &paella, "20.00").await;

    let updated = workflow.add_item(&order_id, line(&paella, 1)).await.unwrap();
    assert_eq!(updated.items.len(), 2);
    // Old line keeps its snapshot, new line gets the current price
    assert!(updated.items.iter().any(|i| i.price == dec("14.50")));
    assert!(updated.items.iter().any(|i| i.price == dec("20.00")));
    assert_eq!(updated.order.total_price, dec("34.50"));
}

#[tokio::test]
async fn terminal_orders_reject_item_mutations() {
    let db = test_db().await;
    let table = seed_table(&db, 1, 4).await;
    let paella = seed_menu_item(&db, "Paella", "14.50").await;

    let workflow = OrderWorkflow::new(db.clone());
    let created = create_order(&workflow, &table, vec![line(&paella, 1)]).await;
    let order_id = created.order.id.as_ref().unwrap().to_string();
    let item_id = created.items[0].id.as_ref().unwrap().to_string();

    workflow
        .update_status(&order_id, OrderStatus::InProgress)
        .await
        .unwrap();
    workflow
        .update_status(&order_id, OrderStatus::Served)
        .await
        .unwrap();

    let err = workflow.add_item(&order_id, line(&paella, 1)).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    let err = workflow.remove_item(&order_id, &item_id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn remove_item_recomputes_total_and_checks_ownership() {
    let db = test_db().await;
    let table_a = seed_table(&db, 1, 4).await;
    let table_b = seed_table(&db, 2, 4).await;
    let paella = seed_menu_item(&db, "Paella", "14.50").await;
    let flan = seed_menu_item(&db, "Flan", "4.00").await;

    let workflow = OrderWorkflow::new(db.clone());
    let first = create_order(&workflow, &table_a, vec![line(&paella, 2), line(&flan, 1)]).await;
    let second = create_order(&workflow, &table_b, vec![line(&flan, 1)]).await;

    let first_id = first.order.id.as_ref().unwrap().to_string();
    let second_id = second.order.id.as_ref().unwrap().to_string();
    let flan_item = first
        .items
        .iter()
        .find(|i| i.price == dec("4.00"))
        .unwrap()
        .id
        .as_ref()
        .unwrap()
        .to_string();

    // Item belongs to the first order, not the second
    let err = workflow.remove_item(&second_id, &flan_item).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let updated = workflow.remove_item(&first_id, &flan_item).await.unwrap();
    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.order.total_price, dec("29.00"));
}

#[tokio::test]
async fn update_status_follows_the_lifecycle_machine() {
    let db = test_db().await;
    let table = seed_table(&db, 1, 4).await;
    let paella = seed_menu_item(&db, "Paella", "14.50").await;

    let workflow = OrderWorkflow::new(db.clone());
    let created = create_order(&workflow, &table, vec![line(&paella, 1)]).await;
    let order_id = created.order.id.as_ref().unwrap().to_string();

    // PENDING cannot jump straight to SERVED
    let err = workflow
        .update_status(&order_id, OrderStatus::Served)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    let order = workflow
        .update_status(&order_id, OrderStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::InProgress);
    assert!(!table_is_available(&db, &table).await);

    let order = workflow
        .update_status(&order_id, OrderStatus::Served)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Served);
    assert!(table_is_available(&db, &table).await);

    // SERVED is terminal
    let err = workflow
        .update_status(&order_id, OrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn cancelling_an_order_frees_its_table() {
    let db = test_db().await;
    let table = seed_table(&db, 1, 4).await;
    let paella = seed_menu_item(&db, "Paella", "14.50").await;

    let workflow = OrderWorkflow::new(db.clone());
    let created = create_order(&workflow, &table, vec![line(&paella, 1)]).await;
    let order_id = created.order.id.as_ref().unwrap().to_string();

    workflow
        .update_status(&order_id, OrderStatus::Cancelled)
        .await
        .unwrap();
    assert!(table_is_available(&db, &table).await);
}

#[test]
fn status_machine_and_wire_parsing() {
    assert_eq!(OrderStatus::parse_str("IN_PROGRESS"), Some(OrderStatus::InProgress));
    assert_eq!(OrderStatus::parse_str("DELIVERED"), None);

    assert!(OrderStatus::Pending.can_transition_to(OrderStatus::InProgress));
    assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
    assert!(OrderStatus::InProgress.can_transition_to(OrderStatus::Served));
    assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Served));
    assert!(!OrderStatus::Served.can_transition_to(OrderStatus::Cancelled));
    assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Pending));
}
