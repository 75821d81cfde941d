use chrono::{DateTime, TimeZone};

use garland_types::disclosure::{Disclosure, IconKind, LockReason};
use garland_types::models::Message;

use crate::season::season_locked;

const GUEST_TITLE: &str = "Secret Message";
const GUEST_BODY: &str = "Only the tree owner can read this message!";
const WRAPPED_BODY: &str =
    "This message is wrapped until Christmas morning (Dec 25th, 5:00 AM).";

/// Decide what `message` discloses to a viewer at instant `now`.
///
/// The rules are a strict priority chain, not independent checks:
///
/// 1. A non-owner gets the fixed guest denial. The sender's name is never
///    revealed to a non-owner.
/// 2. The owner inside the wrap season sees who the message is from, but the
///    body stays sealed until Christmas morning.
/// 3. Otherwise the owner reads the content verbatim.
pub fn evaluate<Tz: TimeZone>(message: &Message, is_owner: bool, now: &DateTime<Tz>) -> Disclosure {
    if !is_owner {
        return Disclosure {
            title: GUEST_TITLE.to_string(),
            body: GUEST_BODY.to_string(),
            locked: true,
            reason: LockReason::NotOwner,
            icon: IconKind::Lock,
        };
    }

    if season_locked(now) {
        return Disclosure {
            title: format!("From: {}", message.sender),
            body: WRAPPED_BODY.to_string(),
            locked: true,
            reason: LockReason::SeasonLocked,
            icon: IconKind::Gift,
        };
    }

    Disclosure {
        title: format!("From: {}", message.sender),
        body: message.content.clone(),
        locked: false,
        reason: LockReason::None,
        icon: IconKind::Sparkles,
    }
}
