use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::FixedOffset;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use garland_api::middleware::{attach_viewer, require_auth};
use garland_api::{AppState, AppStateInner, auth, messages, trees};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "garland=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("GARLAND_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("GARLAND_DB_PATH").unwrap_or_else(|_| "garland.db".into());
    let host = std::env::var("GARLAND_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("GARLAND_PORT")
        .unwrap_or_else(|_| "8000".into())
        .parse()?;

    // The unlock clock: one fixed offset from UTC governs when messages
    // unwrap, for every viewer. Defaults to UTC itself.
    let offset_minutes: i32 = std::env::var("GARLAND_UTC_OFFSET_MINUTES")
        .unwrap_or_else(|_| "0".into())
        .parse()?;
    let unlock_offset = FixedOffset::east_opt(offset_minutes * 60)
        .ok_or_else(|| anyhow::anyhow!("GARLAND_UTC_OFFSET_MINUTES out of range"))?;

    // Init database
    let db = garland_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner {
        db,
        jwt_secret,
        unlock_offset,
    });

    // Routes
    let public_routes = Router::new()
        .route("/", get(health))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .with_state(state.clone());

    // Tree viewing is open to everyone; the viewer context decides how much
    // each message discloses.
    let tree_routes = Router::new()
        .route("/trees/{tree_id}", get(trees::get_tree))
        .route(
            "/trees/{tree_id}/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            attach_viewer,
        ))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/trees", post(trees::create_tree).get(trees::list_my_trees))
        .route(
            "/trees/{tree_id}/messages/{message_id}",
            delete(messages::delete_message),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
        .with_state(state);

    let app = Router::new()
        .merge(public_routes)
        .merge(tree_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Garland server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "Garland API running" }))
}
