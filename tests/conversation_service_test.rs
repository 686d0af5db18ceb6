//! Conversation service unit tests.

mod common;

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use bendensana::domain::{Conversation, Message};
use bendensana::errors::AppError;
use bendensana::infra::{MockConversationRepository, MockProductRepository};
use bendensana::services::{ConversationManager, ConversationService};

use common::{published_product, TestUnitOfWork};

fn thread(id: i32, buyer_id: Uuid, seller_id: Uuid, product_id: i32) -> Conversation {
    Conversation {
        id,
        buyer_id,
        seller_id,
        product_id,
        created_at: Utc::now(),
        last_message_at: Utc::now(),
    }
}

fn message(conversation_id: i32, sender_id: Uuid, content: String) -> Message {
    Message {
        id: 1,
        conversation_id,
        sender_id,
        content,
        is_read: false,
        sent_at: Utc::now(),
    }
}

fn service(
    conversations: MockConversationRepository,
    products: MockProductRepository,
) -> ConversationManager<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        conversations: Arc::new(conversations),
        products: Arc::new(products),
        ..Default::default()
    };
    ConversationManager::new(Arc::new(uow))
}

#[tokio::test]
async fn start_rejects_a_blank_message() {
    let result = service(MockConversationRepository::new(), MockProductRepository::new())
        .start(Uuid::new_v4(), 5, "   ".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn sellers_cannot_message_themselves() {
    let user_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(published_product(id, user_id))));

    let result = service(MockConversationRepository::new(), products)
        .start(user_id, 5, "Is this still available?".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn start_reuses_an_existing_thread() {
    let buyer_id = Uuid::new_v4();
    let seller_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(published_product(id, seller_id))));

    let mut conversations = MockConversationRepository::new();
    conversations
        .expect_find_by_triple()
        .with(eq(buyer_id), eq(seller_id), eq(5))
        .returning(|buyer_id, seller_id, product_id| {
            Ok(Some(thread(3, buyer_id, seller_id, product_id)))
        });
    // No expect_create: starting again must not open a second thread.
    conversations
        .expect_add_message()
        .with(eq(3), eq(buyer_id), eq("Is this still available?".to_string()))
        .returning(|conversation_id, sender_id, content| {
            Ok(message(conversation_id, sender_id, content))
        });

    let result = service(conversations, products)
        .start(buyer_id, 5, "Is this still available?".to_string())
        .await
        .unwrap();

    assert_eq!(result.id, 3);
}

#[tokio::test]
async fn start_opens_a_thread_when_none_exists() {
    let buyer_id = Uuid::new_v4();
    let seller_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(published_product(id, seller_id))));

    let mut conversations = MockConversationRepository::new();
    conversations.expect_find_by_triple().returning(|_, _, _| Ok(None));
    conversations
        .expect_create()
        .returning(|buyer_id, seller_id, product_id| {
            Ok(thread(4, buyer_id, seller_id, product_id))
        });
    conversations
        .expect_add_message()
        .returning(|conversation_id, sender_id, content| {
            Ok(message(conversation_id, sender_id, content))
        });

    let result = service(conversations, products)
        .start(buyer_id, 5, "Hi!".to_string())
        .await
        .unwrap();

    assert_eq!(result.id, 4);
    assert_eq!(result.buyer_id, buyer_id);
}

#[tokio::test]
async fn only_participants_read_a_thread() {
    let mut conversations = MockConversationRepository::new();
    conversations
        .expect_find_by_id()
        .returning(|id| Ok(Some(thread(id, Uuid::new_v4(), Uuid::new_v4(), 5))));

    let result = service(conversations, MockProductRepository::new())
        .messages(3, Uuid::new_v4())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn reading_marks_the_thread_read_before_fetching() {
    let buyer_id = Uuid::new_v4();
    let buyer = buyer_id;

    let mut conversations = MockConversationRepository::new();
    conversations
        .expect_find_by_id()
        .returning(move |id| Ok(Some(thread(id, buyer, Uuid::new_v4(), 5))));

    // The mark must land first so the returned messages already read as
    // seen by this reader.
    let mut order = mockall::Sequence::new();
    conversations
        .expect_mark_read()
        .with(eq(3), eq(buyer_id))
        .times(1)
        .in_sequence(&mut order)
        .returning(|_, _| Ok(()));
    conversations
        .expect_messages()
        .times(1)
        .in_sequence(&mut order)
        .returning(|conversation_id| {
            Ok(vec![message(conversation_id, Uuid::new_v4(), "Hello".to_string())])
        });

    let messages = service(conversations, MockProductRepository::new())
        .messages(3, buyer_id)
        .await
        .unwrap();

    assert_eq!(messages.len(), 1);
}

#[tokio::test]
async fn only_participants_send() {
    let mut conversations = MockConversationRepository::new();
    conversations
        .expect_find_by_id()
        .returning(|id| Ok(Some(thread(id, Uuid::new_v4(), Uuid::new_v4(), 5))));

    let result = service(conversations, MockProductRepository::new())
        .send(3, Uuid::new_v4(), "Hello".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}
