//! Profile service unit tests.

mod common;

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use bendensana::domain::{Address, UpsertAddress, UserCard};
use bendensana::errors::AppError;
use bendensana::infra::{MockAddressRepository, MockCardRepository};
use bendensana::services::{ProfileManager, ProfileService};

use common::TestUnitOfWork;

fn address(id: i32, user_id: Uuid) -> Address {
    Address {
        id,
        user_id,
        title: Some("Home".to_string()),
        company_name: None,
        country: None,
        city: None,
        address_line: None,
        address_line2: None,
        zip_code: None,
    }
}

fn card(id: i32, user_id: Uuid) -> UserCard {
    UserCard {
        id,
        user_id,
        card_holder_name: "Test User".to_string(),
        card_number: "4242424242424242".to_string(),
        expiry_date: Some("12/27".to_string()),
        cvv: Some("123".to_string()),
        is_default: false,
        created_at: Utc::now(),
    }
}

fn blank_upsert() -> UpsertAddress {
    UpsertAddress {
        title: Some("Work".to_string()),
        company_name: None,
        country: None,
        city: None,
        address_line: None,
        address_line2: None,
        zip_code: None,
    }
}

fn service(
    addresses: MockAddressRepository,
    cards: MockCardRepository,
) -> ProfileManager<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        addresses: Arc::new(addresses),
        cards: Arc::new(cards),
        ..Default::default()
    };
    ProfileManager::new(Arc::new(uow))
}

#[tokio::test]
async fn cannot_update_someone_elses_address() {
    let mut addresses = MockAddressRepository::new();
    addresses
        .expect_find_by_id()
        .returning(|id| Ok(Some(address(id, Uuid::new_v4()))));

    let result = service(addresses, MockCardRepository::new())
        .update_address(Uuid::new_v4(), 1, blank_upsert())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn owners_update_their_address() {
    let user_id = Uuid::new_v4();

    let mut addresses = MockAddressRepository::new();
    addresses
        .expect_find_by_id()
        .returning(move |id| Ok(Some(address(id, user_id))));
    addresses
        .expect_update()
        .with(eq(1), mockall::predicate::always())
        .returning(move |id, upsert| {
            let mut updated = address(id, user_id);
            updated.title = upsert.title;
            Ok(updated)
        });

    let updated = service(addresses, MockCardRepository::new())
        .update_address(user_id, 1, blank_upsert())
        .await
        .unwrap();

    assert_eq!(updated.title.as_deref(), Some("Work"));
}

#[tokio::test]
async fn deleting_an_unknown_address_is_not_found() {
    let mut addresses = MockAddressRepository::new();
    addresses.expect_find_by_id().returning(|_| Ok(None));

    let result = service(addresses, MockCardRepository::new())
        .delete_address(Uuid::new_v4(), 1)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn listed_cards_are_masked() {
    let user_id = Uuid::new_v4();

    let mut cards = MockCardRepository::new();
    cards
        .expect_list_for_user()
        .returning(|user_id| Ok(vec![card(1, user_id)]));

    let listed = service(MockAddressRepository::new(), cards)
        .list_cards(user_id)
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert!(listed[0].card_number_masked.ends_with("4242"));
    assert!(!listed[0].card_number_masked.contains("424242424242"));
}

#[tokio::test]
async fn cannot_delete_someone_elses_card() {
    let mut cards = MockCardRepository::new();
    cards
        .expect_find_by_id()
        .returning(|id| Ok(Some(card(id, Uuid::new_v4()))));

    let result = service(MockAddressRepository::new(), cards)
        .delete_card(Uuid::new_v4(), 1)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn owners_set_their_default_card() {
    let user_id = Uuid::new_v4();

    let mut cards = MockCardRepository::new();
    cards
        .expect_find_by_id()
        .returning(move |id| Ok(Some(card(id, user_id))));
    cards
        .expect_set_default()
        .with(eq(user_id), eq(1))
        .returning(|_, _| Ok(()));

    let result = service(MockAddressRepository::new(), cards)
        .set_default_card(user_id, 1)
        .await;

    assert!(result.is_ok());
}
