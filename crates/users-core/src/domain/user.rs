//! User entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User record as held by the store and mirrored into the cache.
///
/// Only `username` carries meaning for the lookup path; every other field is
/// payload that travels through the service untouched. The JSON field names
/// match the upstream users API so existing cache entries stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    /// Store-generated identifier, absent until the user is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Unique username, bounded by the store column.
    #[validate(length(min = 1, max = 64))]
    pub username: String,

    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// First name.
    #[serde(default, rename = "firstname")]
    pub first_name: Option<String>,

    /// Last name.
    #[serde(default, rename = "lastname")]
    pub last_name: Option<String>,

    /// Free-form role label.
    #[serde(default)]
    pub role: Option<String>,

    /// Creation timestamp, set by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp, set by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates an unsaved user with only a username.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: None,
            first_name: None,
            last_name: None,
            role: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets first and last name.
    #[must_use]
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    /// Sets the role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidateExt;

    #[test]
    fn test_new_user_is_unsaved() {
        let user = User::new("alice");
        assert_eq!(user.username, "alice");
        assert!(user.id.is_none());
        assert!(user.email.is_none());
    }

    #[test]
    fn test_builder_methods() {
        let user = User::new("alice")
            .with_email("a@x.com")
            .with_name("Alice", "Liddell")
            .with_role("admin");

        assert_eq!(user.email.as_deref(), Some("a@x.com"));
        assert_eq!(user.first_name.as_deref(), Some("Alice"));
        assert_eq!(user.last_name.as_deref(), Some("Liddell"));
        assert_eq!(user.role.as_deref(), Some("admin"));
    }


    #[test]
    fn test_json_uses_upstream_field_names() {
        let user = User::new("alice").with_name("Alice", "Liddell");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["username"], "alice");
        assert_eq!(json["firstname"], "Alice");
        assert_eq!(json["lastname"], "Liddell");
        assert!(json.get("id").is_none());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let user: User = serde_json::from_str(r#"{"username":"alice","email":"a@x.com"}"#).unwrap();
        assert_eq!(user, User::new("alice").with_email("a@x.com"));
    }

    #[test]
    fn test_validation_rejects_empty_username() {
        let user = User::new("");
        assert!(user.validate_request().is_err());
    }

    #[test]
    fn test_validation_rejects_overlong_username() {
        let user = User::new("a".repeat(65));
        assert!(user.validate_request().is_err());
    }

    #[test]
    fn test_validation_ignores_payload_fields() {
        let user = User::new("alice")
            .with_email("not-an-email")
            .with_name("x".repeat(200), "")
            .with_role("r".repeat(100));
        assert!(user.validate_request().is_ok());
    }

    #[test]
    fn test_validation_accepts_minimal_user() {
        assert!(User::new("alice").validate_request().is_ok());
    }
}
