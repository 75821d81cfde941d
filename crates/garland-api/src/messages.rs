use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use garland_core::evaluate;
use garland_db::models::MessageRow;
use garland_types::api::{CreateMessageRequest, DeleteResponse, MessageView};
use garland_types::models::{Color, Message};

use crate::error::ApiError;
use crate::middleware::{Claims, Viewer};
use crate::{AppState, parse_timestamp, parse_uuid};

const MAX_CONTENT_CHARS: usize = 300;
const MAX_SENDER_CHARS: usize = 20;

pub async fn list_messages(
    State(state): State<AppState>,
    Path(tree_id): Path<Uuid>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Json<Vec<MessageView>>, ApiError> {
    // Run blocking DB reads off the async runtime
    let db = state.clone();
    let tid = tree_id.to_string();
    let (tree, rows) = tokio::task::spawn_blocking(move || {
        let tree = db.db.get_tree(&tid)?.ok_or(ApiError::TreeNotFound)?;
        let rows = db.db.messages_for_tree(&tid)?;
        Ok::<_, ApiError>((tree, rows))
    })
    .await??;

    let is_owner = viewer
        .user_id()
        .is_some_and(|id| id.to_string() == tree.owner_id);

    // Disclosure depends on wall-clock time, so it is computed fresh on every
    // request, in the configured zone.
    let now = Utc::now().with_timezone(&state.unlock_offset);

    let views = rows
        .into_iter()
        .map(|row| {
            let message = message_from_row(row);
            let disclosure = evaluate(&message, is_owner, &now);
            MessageView {
                id: message.id,
                tree_id: message.tree_id,
                color: message.color,
                created_at: message.created_at,
                title: disclosure.title,
                body: disclosure.body,
                locked: disclosure.locked,
                reason: disclosure.reason,
                icon: disclosure.icon,
            }
        })
        .collect();

    Ok(Json(views))
}

pub async fn create_message(
    State(state): State<AppState>,
    Path(tree_id): Path<Uuid>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let content = req.content.trim().to_string();
    if content.is_empty() {
        return Err(ApiError::Validation(
            "Message content is required".to_string(),
        ));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(ApiError::Validation(
            "Message content is limited to 300 characters".to_string(),
        ));
    }

    let sender = req.sender.as_deref().map(str::trim).unwrap_or("");
    if sender.chars().count() > MAX_SENDER_CHARS {
        return Err(ApiError::Validation(
            "Sender name is limited to 20 characters".to_string(),
        ));
    }
    let sender = if sender.is_empty() {
        "Anonymous".to_string()
    } else {
        sender.to_string()
    };

    let color = req
        .color
        .as_deref()
        .map(Color::parse_or_default)
        .unwrap_or_default();

    let row = MessageRow {
        id: Uuid::new_v4().to_string(),
        tree_id: tree_id.to_string(),
        sender,
        content,
        color: color.as_str().to_string(),
        created_at: Utc::now().to_rfc3339(),
    };

    let db = state.clone();
    let stored = tokio::task::spawn_blocking(move || {
        if db.db.get_tree(&row.tree_id)?.is_none() {
            return Err(ApiError::TreeNotFound);
        }
        db.db.insert_message(&row)?;
        Ok::<_, ApiError>(row)
    })
    .await??;

    // The creator gets their own message echoed back undisclosed.
    Ok((StatusCode::CREATED, Json(message_from_row(stored))))
}

pub async fn delete_message(
    State(state): State<AppState>,
    Path((tree_id, message_id)): Path<(Uuid, Uuid)>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let db = state.clone();
    let tid = tree_id.to_string();
    let mid = message_id.to_string();
    let requester = claims.sub.to_string();

    tokio::task::spawn_blocking(move || {
        let message = db.db.get_message(&mid)?.ok_or(ApiError::MessageNotFound)?;
        if message.tree_id != tid {
            return Err(ApiError::MessageNotFound);
        }

        let tree = db.db.get_tree(&message.tree_id)?.ok_or(ApiError::TreeNotFound)?;

        // Tree ownership is the sole authority here. The sender text on the
        // message is unauthenticated display data and has no say.
        if tree.owner_id != requester {
            return Err(ApiError::NotTreeOwner);
        }

        if !db.db.delete_message(&mid)? {
            return Err(ApiError::MessageNotFound);
        }
        Ok::<_, ApiError>(())
    })
    .await??;

    Ok(Json(DeleteResponse {
        status: "deleted".to_string(),
        id: message_id,
    }))
}

fn message_from_row(row: MessageRow) -> Message {
    Message {
        id: parse_uuid(&row.id, "message id"),
        tree_id: parse_uuid(&row.tree_id, "tree id"),
        sender: row.sender,
        content: row.content,
        color: Color::parse_or_default(&row.color),
        created_at: parse_timestamp(&row.created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use garland_types::disclosure::LockReason;

    fn claims_for(user_id: Uuid) -> Claims {
        Claims {
            sub: user_id,
            username: "nalin".to_string(),
            exp: usize::MAX,
        }
    }

    fn guest() -> Viewer {
        Viewer { claims: None }
    }

    fn viewer_for(user_id: Uuid) -> Viewer {
        Viewer {
            claims: Some(claims_for(user_id)),
        }
    }

    /// Seeds an owner account plus one tree, returning (owner_id, tree_id).
    fn seed_tree(state: &AppState) -> (Uuid, Uuid) {
        let owner = Uuid::new_v4();
        let tree = Uuid::new_v4();
        state
            .db
            .create_user(&owner.to_string(), "nalin", "hash", &Utc::now().to_rfc3339())
            .unwrap();
        state
            .db
            .insert_tree(&garland_db::models::TreeRow {
                id: tree.to_string(),
                owner_id: owner.to_string(),
                name: "Family Tree".to_string(),
                pin: "1234".to_string(),
                theme: "classic".to_string(),
                created_at: Utc::now().to_rfc3339(),
            })
            .unwrap();
        (owner, tree)
    }

    async fn hang_message(state: &AppState, tree_id: Uuid, sender: &str, content: &str) -> Message {
        let resp = create_message(
            State(state.clone()),
            Path(tree_id),
            Json(CreateMessageRequest {
                content: content.to_string(),
                sender: Some(sender.to_string()),
                color: Some("gold".to_string()),
            }),
        )
        .await
        .unwrap()
        .into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);
        testutil::json_body(resp).await
    }

    #[tokio::test]
    async fn guests_get_the_fixed_denial_and_no_sender() {
        let state = testutil::state();
        let (_, tree_id) = seed_tree(&state);
        hang_message(&state, tree_id, "Ravi", "Happy Holidays").await;

        let views = list_messages(State(state), Path(tree_id), Extension(guest()))
            .await
            .unwrap();
        assert_eq!(views.0.len(), 1);

        let view = &views.0[0];
        assert!(view.locked);
        assert_eq!(view.reason, LockReason::NotOwner);
        assert_eq!(view.title, "Secret Message");
        assert_eq!(view.body, "Only the tree owner can read this message!");
        assert!(!view.title.contains("Ravi"));
    }

    #[tokio::test]
    async fn a_logged_in_stranger_is_still_a_guest() {
        let state = testutil::state();
        let (_, tree_id) = seed_tree(&state);
        hang_message(&state, tree_id, "Ravi", "Happy Holidays").await;

        let views = list_messages(
            State(state),
            Path(tree_id),
            Extension(viewer_for(Uuid::new_v4())),
        )
        .await
        .unwrap();
        assert_eq!(views.0[0].reason, LockReason::NotOwner);
        assert_eq!(views.0[0].title, "Secret Message");
    }

    #[tokio::test]
    async fn the_owner_always_sees_who_sent_it() {
        // Whether the season gate is open depends on today's date, but the
        // owner is never denied outright: the title names the sender either
        // way, and an unlocked body is the content verbatim.
        let state = testutil::state();
        let (owner, tree_id) = seed_tree(&state);
        hang_message(&state, tree_id, "Ravi", "Happy Holidays").await;

        let views = list_messages(State(state), Path(tree_id), Extension(viewer_for(owner)))
            .await
            .unwrap();

        let view = &views.0[0];
        assert_eq!(view.title, "From: Ravi");
        assert_ne!(view.reason, LockReason::NotOwner);
        if !view.locked {
            assert_eq!(view.body, "Happy Holidays");
        } else {
            assert_eq!(view.reason, LockReason::SeasonLocked);
            assert!(!view.body.contains("Happy Holidays"));
        }
    }

    #[tokio::test]
    async fn listing_an_unknown_tree_is_not_found() {
        let state = testutil::state();
        let result = list_messages(State(state), Path(Uuid::new_v4()), Extension(guest())).await;
        assert!(matches!(result, Err(ApiError::TreeNotFound)));
    }

    #[tokio::test]
    async fn message_defaults_apply() {
        let state = testutil::state();
        let (_, tree_id) = seed_tree(&state);

        let resp = create_message(
            State(state.clone()),
            Path(tree_id),
            Json(CreateMessageRequest {
                content: "  hello  ".to_string(),
                sender: Some("   ".to_string()),
                color: Some("mauve".to_string()),
            }),
        )
        .await
        .unwrap()
        .into_response();
        let message: Message = testutil::json_body(resp).await;

        assert_eq!(message.sender, "Anonymous");
        assert_eq!(message.content, "hello");
        assert_eq!(message.color, Color::Red);

        let resp = create_message(
            State(state),
            Path(tree_id),
            Json(CreateMessageRequest {
                content: "hi".to_string(),
                sender: None,
                color: None,
            }),
        )
        .await
        .unwrap()
        .into_response();
        let message: Message = testutil::json_body(resp).await;
        assert_eq!(message.sender, "Anonymous");
        assert_eq!(message.color, Color::Red);
    }

    #[tokio::test]
    async fn message_validation_limits() {
        let state = testutil::state();
        let (_, tree_id) = seed_tree(&state);

        let result = create_message(
            State(state.clone()),
            Path(tree_id),
            Json(CreateMessageRequest {
                content: "   ".to_string(),
                sender: None,
                color: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));

        let result = create_message(
            State(state.clone()),
            Path(tree_id),
            Json(CreateMessageRequest {
                content: "x".repeat(301),
                sender: None,
                color: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));

        let result = create_message(
            State(state.clone()),
            Path(tree_id),
            Json(CreateMessageRequest {
                content: "hello".to_string(),
                sender: Some("x".repeat(21)),
                color: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));

        let result = create_message(
            State(state),
            Path(Uuid::new_v4()),
            Json(CreateMessageRequest {
                content: "hello".to_string(),
                sender: None,
                color: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(ApiError::TreeNotFound)));
    }

    #[tokio::test]
    async fn only_the_tree_owner_deletes() {
        let state = testutil::state();
        let (owner, tree_id) = seed_tree(&state);
        let message = hang_message(&state, tree_id, "Ravi", "Happy Holidays").await;

        // A non-owner is refused, message content notwithstanding.
        let result = delete_message(
            State(state.clone()),
            Path((tree_id, message.id)),
            Extension(claims_for(Uuid::new_v4())),
        )
        .await;
        assert!(matches!(result, Err(ApiError::NotTreeOwner)));

        // The owner succeeds, and the message is gone from the listing.
        let deleted = delete_message(
            State(state.clone()),
            Path((tree_id, message.id)),
            Extension(claims_for(owner)),
        )
        .await
        .unwrap();
        assert_eq!(deleted.0.status, "deleted");
        assert_eq!(deleted.0.id, message.id);

        let views = list_messages(
            State(state.clone()),
            Path(tree_id),
            Extension(viewer_for(owner)),
        )
        .await
        .unwrap();
        assert!(views.0.is_empty());

        // Deleting again finds nothing.
        let result = delete_message(
            State(state),
            Path((tree_id, message.id)),
            Extension(claims_for(owner)),
        )
        .await;
        assert!(matches!(result, Err(ApiError::MessageNotFound)));
    }

    #[tokio::test]
    async fn delete_checks_the_message_belongs_to_the_tree() {
        let state = testutil::state();
        let (owner, tree_id) = seed_tree(&state);
        let message = hang_message(&state, tree_id, "Ravi", "Happy Holidays").await;

        let result = delete_message(
            State(state),
            Path((Uuid::new_v4(), message.id)),
            Extension(claims_for(owner)),
        )
        .await;
        assert!(matches!(result, Err(ApiError::MessageNotFound)));
    }
}
