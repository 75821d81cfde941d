use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A decorated tree. The owner is fixed at creation and is the only identity
/// allowed to read message contents or delete ornaments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub theme: String,
    pub created_at: DateTime<Utc>,
}

/// An ornament hung on a tree by a visitor. `sender` is unauthenticated
/// display text and carries no authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub tree_id: Uuid,
    pub sender: String,
    pub content: String,
    pub color: Color,
    pub created_at: DateTime<Utc>,
}

/// Closed ornament palette. Anything outside it resolves to red so a stray
/// color name coming in over the wire can never leave an ornament unstyled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Red,
    Gold,
    Blue,
    Green,
    Purple,
    Silver,
}

impl Color {
    pub fn parse_or_default(name: &str) -> Self {
        match name {
            "red" => Color::Red,
            "gold" => Color::Gold,
            "blue" => Color::Blue,
            "green" => Color::Green,
            "purple" => Color::Purple,
            "silver" => Color::Silver,
            _ => Color::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Gold => "gold",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Purple => "purple",
            Color::Silver => "silver",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_color_falls_back_to_red() {
        assert_eq!(Color::parse_or_default("chartreuse"), Color::Red);
        assert_eq!(Color::parse_or_default(""), Color::Red);
    }

    #[test]
    fn palette_round_trips_through_names() {
        for color in [
            Color::Red,
            Color::Gold,
            Color::Blue,
            Color::Green,
            Color::Purple,
            Color::Silver,
        ] {
            assert_eq!(Color::parse_or_default(color.as_str()), color);
        }
    }
}
