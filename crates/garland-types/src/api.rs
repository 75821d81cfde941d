use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::disclosure::{IconKind, LockReason};
use crate::models::Color;

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
}

// -- Trees --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTreeRequest {
    pub name: String,
    /// 4-digit backup access code. Stored, never echoed back.
    pub pin: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TreeResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub theme: String,
    pub created_at: DateTime<Utc>,
}

/// Entry in the caller's tree list.
#[derive(Debug, Serialize, Deserialize)]
pub struct TreeSummary {
    pub id: Uuid,
    pub name: String,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMessageRequest {
    pub content: String,
    pub sender: Option<String>,
    pub color: Option<String>,
}

/// A message as served to a viewer: ornament metadata plus the disclosure
/// computed for that viewer at request time. The raw sender and content never
/// appear outside `title`/`body`, so a locked view leaks nothing.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageView {
    pub id: Uuid,
    pub tree_id: Uuid,
    pub color: Color,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub body: String,
    pub locked: bool,
    pub reason: LockReason,
    pub icon: IconKind,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub status: String,
    pub id: Uuid,
}
