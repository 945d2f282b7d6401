//! Vendor status transitions against a mocked order service.

use std::time::Duration;

use jiff::civil::date;
use rust_decimal::Decimal;
use souk::{
    api::{ApiError, Page, poll::OrderPoller},
    orders::{
        Order, OrderStatus, ShippingAddress,
        workflow::{MockOrderGateway, TransitionError, request_transition},
    },
};
use testresult::TestResult;
use tokio::sync::mpsc;
use uuid::Uuid;

fn address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Ada Okafor".to_owned(),
        address_line1: "12 Harbor Lane".to_owned(),
        address_line2: None,
        city: "Brighton".to_owned(),
        state: "East Sussex".to_owned(),
        postal_code: "BN1 1AA".to_owned(),
        country: "GB".to_owned(),
        phone_number: "+44 1273 000000".to_owned(),
    }
}

fn order(status: OrderStatus) -> Order {
    Order {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        items: Vec::new(),
        total_amount: Decimal::from(80),
        status,
        shipping_address: address(),
        cancellation_reason: None,
        status_note: None,
        estimated_delivery_date: None,
        created_at: None,
        confirmed_at: None,
        shipped_at: None,
        delivered_at: None,
        cancelled_at: None,
    }
}

fn page(orders: Vec<Order>) -> Page<Order> {
    let total = orders.len() as u64;

    Page {
        content: orders,
        total_elements: total,
        total_pages: 1,
        size: 50,
        page: 0,
        first: true,
        last: true,
    }
}

#[tokio::test]
async fn allowed_transition_returns_the_updated_order() -> TestResult {
    let placed = order(OrderStatus::Placed);
    let id = placed.id;

    let mut gateway = MockOrderGateway::new();
    gateway
        .expect_update_order_status()
        .withf(move |order_id, update| {
            *order_id == id
                && update.status == OrderStatus::Preparing
                && update.estimated_delivery_date.is_none()
        })
        .returning(|order_id, update| {
            let mut updated = order(update.status);
            updated.id = order_id;
            Ok(updated)
        });

    let updated =
        request_transition(&gateway, &placed, OrderStatus::Preparing, None, None).await?;

    assert_eq!(updated.status, OrderStatus::Preparing);
    assert_eq!(updated.id, id);

    Ok(())
}

#[tokio::test]
async fn disallowed_target_is_blocked_before_any_request() {
    let delivered = order(OrderStatus::Delivered);
    let gateway = MockOrderGateway::new();

    let result =
        request_transition(&gateway, &delivered, OrderStatus::Preparing, None, None).await;

    assert!(
        matches!(
            result,
            Err(TransitionError::NotAllowed {
                from: OrderStatus::Delivered,
                to: OrderStatus::Preparing,
            })
        ),
        "expected NotAllowed, got {result:?}"
    );
}

#[tokio::test]
async fn unknown_status_offers_no_transition() {
    let unrecognised = order(OrderStatus::Unknown);
    let gateway = MockOrderGateway::new();

    let result =
        request_transition(&gateway, &unrecognised, OrderStatus::Preparing, None, None).await;

    assert!(
        matches!(result, Err(TransitionError::NotAllowed { .. })),
        "expected NotAllowed, got {result:?}"
    );
}

#[tokio::test]
async fn scheduling_without_a_date_is_blocked_client_side() {
    let shipped = order(OrderStatus::Shipped);
    let gateway = MockOrderGateway::new();

    let result = request_transition(
        &gateway,
        &shipped,
        OrderStatus::DeliveryScheduled,
        None,
        None,
    )
    .await;

    assert!(
        matches!(result, Err(TransitionError::MissingDeliveryDate)),
        "expected MissingDeliveryDate, got {result:?}"
    );
}

#[tokio::test]
async fn scheduling_with_a_date_submits_the_date() -> TestResult {
    let shipped = order(OrderStatus::Shipped);
    let delivery = date(2026, 9, 15);

    let mut gateway = MockOrderGateway::new();
    gateway
        .expect_update_order_status()
        .withf(move |_, update| {
            update.status == OrderStatus::DeliveryScheduled
                && update.estimated_delivery_date == Some(delivery)
        })
        .returning(|order_id, update| {
            let mut updated = order(update.status);
            updated.id = order_id;
            updated.estimated_delivery_date = update.estimated_delivery_date;
            Ok(updated)
        });

    let updated = request_transition(
        &gateway,
        &shipped,
        OrderStatus::DeliveryScheduled,
        Some("carrier confirmed".to_owned()),
        Some(delivery),
    )
    .await?;

    assert_eq!(updated.status, OrderStatus::DeliveryScheduled);
    assert_eq!(updated.estimated_delivery_date, Some(delivery));

    Ok(())
}

#[tokio::test]
async fn server_rejection_is_surfaced_without_retry() {
    let placed = order(OrderStatus::Placed);

    let mut gateway = MockOrderGateway::new();
    gateway
        .expect_update_order_status()
        .times(1)
        .returning(|_, _| {
            Err(ApiError::Rejected {
                status: 409,
                message: "order status changed concurrently".to_owned(),
            })
        });

    let result =
        request_transition(&gateway, &placed, OrderStatus::Preparing, None, None).await;

    match result {
        Err(TransitionError::Rejected(message)) => {
            assert_eq!(message, "order status changed concurrently");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_is_surfaced_as_gateway_error() {
    let placed = order(OrderStatus::Placed);

    let mut gateway = MockOrderGateway::new();
    gateway
        .expect_update_order_status()
        .returning(|_, _| Err(ApiError::NotFound));

    let result =
        request_transition(&gateway, &placed, OrderStatus::Preparing, None, None).await;

    assert!(
        matches!(result, Err(TransitionError::Gateway(ApiError::NotFound))),
        "expected Gateway(NotFound), got {result:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn poller_pushes_snapshots_until_the_receiver_is_dropped() {
    let mut gateway = MockOrderGateway::new();
    gateway
        .expect_vendor_orders()
        .returning(|_, _, _| Ok(page(vec![order(OrderStatus::Placed)])));

    let (tx, mut rx) = mpsc::channel(1);
    let poller = OrderPoller::new(gateway, Duration::from_secs(15));
    let handle = tokio::spawn(poller.run(tx));

    let snapshot = rx.recv().await.expect("first snapshot should arrive");
    assert_eq!(snapshot.content.len(), 1);

    drop(rx);

    handle.await.expect("poller task should stop cleanly");
}

#[tokio::test(start_paused = true)]
async fn poller_stops_on_a_dropped_receiver_even_when_fetches_fail() {
    let mut gateway = MockOrderGateway::new();
    gateway
        .expect_vendor_orders()
        .returning(|_, _, _| Err(ApiError::NotFound));

    let (tx, rx) = mpsc::channel::<Page<Order>>(1);
    drop(rx);

    let poller = OrderPoller::new(gateway, Duration::from_secs(15));
    let handle = tokio::spawn(poller.run(tx));

    handle.await.expect("poller task should stop cleanly");
}

#[tokio::test(start_paused = true)]
async fn poller_skips_failed_fetches_and_keeps_going() {
    let mut gateway = MockOrderGateway::new();
    let mut calls = 0_u32;
    gateway.expect_vendor_orders().returning(move |_, _, _| {
        calls += 1;
        if calls == 1 {
            Err(ApiError::NotFound)
        } else {
            Ok(page(Vec::new()))
        }
    });

    let (tx, mut rx) = mpsc::channel(1);
    let poller = OrderPoller::new(gateway, Duration::from_secs(15));
    let handle = tokio::spawn(poller.run(tx));

    let snapshot = rx.recv().await.expect("a later tick should still deliver");
    assert!(snapshot.content.is_empty());

    drop(rx);

    handle.await.expect("poller task should stop cleanly");
}
