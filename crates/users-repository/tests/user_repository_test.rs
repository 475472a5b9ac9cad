//! Integration tests for MySqlUserRepository.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker; run with `cargo test -- --ignored`.

mod common;

use common::TestDatabase;
use users_core::User;
use users_repository::{MySqlUserRepository, UserRepository};

fn create_test_user(username: &str) -> User {
    User::new(username)
        .with_email(format!("{}@example.com", username))
        .with_name("Test", "User")
        .with_role("member")
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_and_find_by_username() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let saved = repo
        .save(&create_test_user("alice"))
        .await
        .expect("Failed to save user");
    assert!(saved.id.is_some());
    assert!(saved.created_at.is_some());

    let found = repo
        .find_by_username("alice")
        .await
        .expect("Query failed")
        .expect("User not found");

    assert_eq!(found, saved);
    assert_eq!(found.email.as_deref(), Some("alice@example.com"));
    assert_eq!(found.role.as_deref(), Some("member"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_username_not_found() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let result = repo.find_by_username("nobody").await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_username_match_is_case_sensitive() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    repo.save(&create_test_user("alice")).await.expect("Failed to save user");

    let result = repo.find_by_username("Alice").await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_replaces_existing_record() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let first = repo.save(&create_test_user("bob")).await.expect("Failed to save user");

    let updated = create_test_user("bob").with_email("bob@new.example.com").with_role("admin");
    let second = repo.save(&updated).await.expect("Failed to update user");

    assert_eq!(second.id, first.id);
    assert_eq!(second.email.as_deref(), Some("bob@new.example.com"));
    assert_eq!(second.role.as_deref(), Some("admin"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_by_username() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    repo.save(&create_test_user("carol")).await.expect("Failed to save user");

    assert!(repo.delete_by_username("carol").await.expect("Delete failed"));
    assert!(repo.find_by_username("carol").await.expect("Query failed").is_none());

    // Second delete finds nothing to remove
    assert!(!repo.delete_by_username("carol").await.expect("Delete failed"));
}
