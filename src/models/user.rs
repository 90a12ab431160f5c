// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use url::Url;
use validator::Validate;

/// Avatar assigned to users who never uploaded one.
pub const DEFAULT_AVATAR: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=default";

/// A document backing a user's verification (e.g. a linked profile).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,

    /// Display name shown next to comments.
    pub name: String,

    /// Unique, stored lowercased.
    pub email: String,

    pub avatar: String,

    pub is_verified: bool,

    /// Stored as a JSONB array in the database.
    pub proofs: Json<Vec<Proof>>,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[serde(default = "default_avatar")]
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub avatar: String,

    #[serde(default)]
    pub is_verified: bool,

    #[serde(default)]
    #[validate(custom(function = validate_proof_urls))]
    pub proofs: Vec<Proof>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            avatar: default_avatar(),
            is_verified: false,
            proofs: Vec::new(),
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    /// Trims name and email and lowercases the email, matching how they are stored.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self
    }
}

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

/// Validates that a string is a correctly formatted URL.
fn validate_url_string(url: &str) -> Result<(), validator::ValidationError> {
    if Url::parse(url).is_err() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}

/// Every proof must point at a parseable URL.
fn validate_proof_urls(proofs: &[Proof]) -> Result<(), validator::ValidationError> {
    for proof in proofs {
        if Url::parse(&proof.url).is_err() {
            return Err(validator::ValidationError::new("invalid_proof_url"));
        }
    }
    Ok(())
}
