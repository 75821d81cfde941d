use serde::{Deserialize, Serialize};

/// Why a message body is withheld from the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockReason {
    None,
    NotOwner,
    SeasonLocked,
}

/// Which glyph the reader should show alongside the disclosed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Sparkles,
    Lock,
    Gift,
}

/// What a given viewer is allowed to see of a message at a given instant.
/// Produced by `garland_core::evaluate`; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disclosure {
    pub title: String,
    pub body: String,
    pub locked: bool,
    pub reason: LockReason,
    pub icon: IconKind,
}
