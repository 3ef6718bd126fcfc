//! Bearer token claims and the caller identity derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

/// JWT claims issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a user with no profile fields.
    #[must_use]
    pub fn new(user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id,
            name: None,
            email: None,
            picture: None,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}

/// The authenticated principal on whose behalf a mutating call executes.
///
/// Resolved once per request and passed explicitly into service calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Avatar URL.
    pub image: Option<String>,
}

impl Caller {
    /// Creates a caller with only an identifier.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self {
            id,
            name: None,
            email: None,
            image: None,
        }
    }
}

impl From<Claims> for Caller {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.user_id(),
            name: claims.name,
            email: claims.email,
            image: claims.picture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let user_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::hours(1);

        let claims = Claims::new(user_id, expires_at);

        assert_eq!(claims.sub, user_id);
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
        assert!(claims.name.is_none());
    }

    #[test]
    fn test_caller_from_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, Utc::now() + Duration::hours(1))
            .with_name("하츄핑")
            .with_email("ping@example.com")
            .with_picture("https://cdn.example.com/ping.png");

        let caller = Caller::from(claims);

        assert_eq!(caller.id, UserId::from_uuid(user_id));
        assert_eq!(caller.name.as_deref(), Some("하츄핑"));
        assert_eq!(caller.email.as_deref(), Some("ping@example.com"));
        assert_eq!(
            caller.image.as_deref(),
            Some("https://cdn.example.com/ping.png")
        );
    }

    #[test]
    fn test_claims_without_profile_fields_deserialize() {
        let user_id = Uuid::new_v4();
        let json = format!(r#"{{"sub":"{user_id}","iat":1,"exp":2}}"#);
        let claims: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(claims.sub, user_id);
        assert!(claims.picture.is_none());
    }
}
