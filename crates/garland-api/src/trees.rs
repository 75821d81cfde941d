use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use garland_db::models::TreeRow;
use garland_types::api::{CreateTreeRequest, TreeResponse, TreeSummary};

use crate::error::ApiError;
use crate::middleware::Claims;
use crate::{AppState, parse_timestamp, parse_uuid};

pub async fn create_tree(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateTreeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::Validation("Tree name is required".to_string()));
    }
    if req.pin.len() != 4 || !req.pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::Validation(
            "PIN must be exactly 4 digits".to_string(),
        ));
    }

    let row = TreeRow {
        id: Uuid::new_v4().to_string(),
        owner_id: claims.sub.to_string(),
        name,
        pin: req.pin,
        theme: "classic".to_string(),
        created_at: Utc::now().to_rfc3339(),
    };
    state.db.insert_tree(&row)?;

    Ok((StatusCode::CREATED, Json(tree_response(row))))
}

pub async fn get_tree(
    State(state): State<AppState>,
    Path(tree_id): Path<Uuid>,
) -> Result<Json<TreeResponse>, ApiError> {
    let row = state
        .db
        .get_tree(&tree_id.to_string())?
        .ok_or(ApiError::TreeNotFound)?;

    Ok(Json(tree_response(row)))
}

pub async fn list_my_trees(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<TreeSummary>>, ApiError> {
    let rows = state.db.trees_by_owner(&claims.sub.to_string())?;

    let trees = rows
        .into_iter()
        .map(|row| TreeSummary {
            id: parse_uuid(&row.id, "tree id"),
            name: row.name,
        })
        .collect();

    Ok(Json(trees))
}

/// The pin never leaves the database: it is a backup access code, not
/// display data.
fn tree_response(row: TreeRow) -> TreeResponse {
    TreeResponse {
        id: parse_uuid(&row.id, "tree id"),
        owner_id: parse_uuid(&row.owner_id, "owner id"),
        name: row.name,
        theme: row.theme,
        created_at: parse_timestamp(&row.created_at),
    }
}
