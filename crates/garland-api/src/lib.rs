pub mod auth;
pub mod error;
pub mod messages;
pub mod middleware;
pub mod trees;

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::warn;
use uuid::Uuid;

use garland_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    /// Fixed offset whose wall clock decides the Christmas unlock. One
    /// configured zone governs every viewer, so owner and guests agree on
    /// the unwrap moment.
    pub unlock_offset: FixedOffset,
}

pub(crate) fn parse_uuid(raw: &str, what: &str) -> Uuid {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt {} '{}': {}", what, raw, e);
        Uuid::default()
    })
}

pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite's own datetime() writes "YYYY-MM-DD HH:MM:SS" without a
            // timezone; treat it as UTC.
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}': {}", raw, e);
            DateTime::default()
        })
}
