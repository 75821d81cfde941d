use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

/// Who is looking. Derived per request from an optional bearer token;
/// anonymous guests carry no claims.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub claims: Option<Claims>,
}

impl Viewer {
    pub fn user_id(&self) -> Option<Uuid> {
        self.claims.as_ref().map(|c| c.sub)
    }
}

fn decode_claims(req: &Request, secret: &str) -> Option<Claims> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

/// Reject the request unless it carries a valid JWT.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = decode_claims(&req, &state.jwt_secret).ok_or(ApiError::Unauthorized)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Attach the viewer context. A bad or absent token is not an error here;
/// the request goes through as a guest, it just reads less.
pub async fn attach_viewer(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let claims = decode_claims(&req, &state.jwt_secret);
    req.extensions_mut().insert(Viewer { claims });
    next.run(req).await
}
