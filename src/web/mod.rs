use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, SeaOrmAuthService};

pub mod auth;
mod error;
pub mod flash;
mod handlers;
pub mod templates;
pub mod validation;

pub use error::WebError;

/// Application context built once at startup and handed to every handler.
/// No module-level singletons; anything a handler needs hangs off this.
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub auth: Arc<dyn AuthService>,
}

pub async fn create_app_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    store.ping().await?;

    let auth = Arc::new(SeaOrmAuthService::new(store.clone())) as Arc<dyn AuthService>;

    Ok(Arc::new(AppState {
        config,
        store,
        auth,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config.server.session_minutes,
        )));

    let protected_routes = create_protected_router();

    Router::new()
        .merge(protected_routes)
        .route("/", get(handlers::index))
        .route(
            "/login",
            get(handlers::login_form).post(handlers::login),
        )
        .route("/user/{name}", get(handlers::user_page))
        .fallback(handlers::not_found)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The mutating routes, all behind one login guard. Adding a route here is
/// the only way to register a mutating handler, so the auth flag cannot be
/// forgotten per-handler.
fn create_protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(handlers::create_movie))
        .route("/logout", post(handlers::logout))
        .route(
            "/settings",
            get(handlers::settings_form).post(handlers::update_settings),
        )
        .route(
            "/movie/edit/{movie_id}",
            get(handlers::edit_form).post(handlers::update_movie),
        )
        .route("/movie/delete/{movie_id}", post(handlers::delete_movie))
        .route_layer(middleware::from_fn(auth::require_login))
}
