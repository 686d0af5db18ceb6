//! Trade service unit tests.
//!
//! Offer creation and acceptance settle inside a transaction; these
//! tests cover the up-front validation and the non-settling decisions.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use rust_decimal::Decimal;
use uuid::Uuid;

use bendensana::domain::{CreateTradeOffer, TradeDecision, TradeOfferStatus};
use bendensana::errors::AppError;
use bendensana::infra::{MockProductRepository, MockTradeRepository};
use bendensana::services::{TradeManager, TradeService};

use common::{pending_offer, published_product, TestUnitOfWork};

fn offer_for(target: i32) -> CreateTradeOffer {
    CreateTradeOffer {
        target_product_id: target,
        offered_product_ids: vec![],
        offered_cash: Some(Decimal::from(50)),
        message: None,
    }
}

fn service_with_products(products: MockProductRepository) -> TradeManager<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        products: Arc::new(products),
        ..Default::default()
    };
    TradeManager::new(Arc::new(uow))
}

fn service_with_trades(trades: MockTradeRepository) -> TradeManager<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        trades: Arc::new(trades),
        ..Default::default()
    };
    TradeManager::new(Arc::new(uow))
}

#[tokio::test]
async fn offer_requires_products_or_cash() {
    let create = CreateTradeOffer {
        target_product_id: 1,
        offered_product_ids: vec![],
        offered_cash: None,
        message: None,
    };

    let result = service_with_products(MockProductRepository::new())
        .create_offer(Uuid::new_v4(), create)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn cannot_trade_for_own_listing() {
    let offerer_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .with(eq(1))
        .returning(move |id| Ok(Some(published_product(id, offerer_id))));

    let result = service_with_products(products)
        .create_offer(offerer_id, offer_for(1))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn offered_products_must_exist() {
    let offerer_id = Uuid::new_v4();
    let receiver_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(published_product(id, receiver_id))));
    products.expect_find_many().returning(|_| Ok(vec![]));

    let create = CreateTradeOffer {
        target_product_id: 1,
        offered_product_ids: vec![10],
        offered_cash: None,
        message: None,
    };
    let result = service_with_products(products)
        .create_offer(offerer_id, create)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn offered_products_must_belong_to_the_offerer() {
    let offerer_id = Uuid::new_v4();
    let receiver_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(published_product(id, receiver_id))));
    products
        .expect_find_many()
        .returning(|ids| Ok(ids.into_iter().map(|id| published_product(id, Uuid::new_v4())).collect()));

    let create = CreateTradeOffer {
        target_product_id: 1,
        offered_product_ids: vec![10],
        offered_cash: None,
        message: None,
    };
    let result = service_with_products(products)
        .create_offer(offerer_id, create)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn strangers_cannot_read_an_offer() {
    let mut trades = MockTradeRepository::new();
    trades
        .expect_find_by_id()
        .returning(|id| Ok(Some(pending_offer(id, Uuid::new_v4(), Uuid::new_v4(), 1))));

    let result = service_with_trades(trades).get_offer(1, Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn receiver_rejects_without_settlement() {
    let receiver_id = Uuid::new_v4();
    let receiver = receiver_id;

    let mut trades = MockTradeRepository::new();
    trades
        .expect_find_by_id()
        .returning(move |id| Ok(Some(pending_offer(id, Uuid::new_v4(), receiver, 1))));
    trades
        .expect_set_status()
        .with(eq(1), eq(TradeOfferStatus::Rejected))
        .returning(|id, status| {
            let mut offer = pending_offer(id, Uuid::new_v4(), Uuid::new_v4(), 1);
            offer.status = status;
            Ok(offer)
        });

    let offer = service_with_trades(trades)
        .decide(1, receiver_id, TradeDecision::Reject)
        .await
        .unwrap();

    assert_eq!(offer.status, TradeOfferStatus::Rejected);
}

#[tokio::test]
async fn offerer_cancels_a_pending_offer() {
    let offerer_id = Uuid::new_v4();
    let offerer = offerer_id;

    let mut trades = MockTradeRepository::new();
    trades
        .expect_find_by_id()
        .returning(move |id| Ok(Some(pending_offer(id, offerer, Uuid::new_v4(), 1))));
    trades
        .expect_set_status()
        .with(eq(1), eq(TradeOfferStatus::Cancelled))
        .returning(|id, status| {
            let mut offer = pending_offer(id, Uuid::new_v4(), Uuid::new_v4(), 1);
            offer.status = status;
            Ok(offer)
        });

    let offer = service_with_trades(trades)
        .decide(1, offerer_id, TradeDecision::Cancel)
        .await
        .unwrap();

    assert_eq!(offer.status, TradeOfferStatus::Cancelled);
}

#[tokio::test]
async fn offerer_cannot_accept_their_own_offer() {
    let offerer_id = Uuid::new_v4();
    let offerer = offerer_id;

    let mut trades = MockTradeRepository::new();
    trades
        .expect_find_by_id()
        .returning(move |id| Ok(Some(pending_offer(id, offerer, Uuid::new_v4(), 1))));

    let result = service_with_trades(trades)
        .decide(1, offerer_id, TradeDecision::Accept)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}
