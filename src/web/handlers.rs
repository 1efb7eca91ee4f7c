use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::{SESSION_USER_KEY, session_username};
use super::flash::{flash, take_flashes};
use super::templates::{self, PageContext};
use super::validation::validate_movie_input;
use super::{AppState, WebError};
use crate::services::AuthError;

// ============================================================================
// Form Types
// ============================================================================

#[derive(Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub name: String,
}

/// Shared page data: the first user's display name for the header, the
/// session's login state, and any flash messages queued for this render.
async fn page_context(state: &AppState, session: &Session) -> Result<PageContext, WebError> {
    let display_name = state
        .store
        .first_user()
        .await?
        .map_or_else(|| "Watchlist".to_string(), |user| user.name);

    let logged_in = session
        .get::<String>(SESSION_USER_KEY)
        .await
        .ok()
        .flatten()
        .is_some();

    Ok(PageContext {
        display_name,
        logged_in,
        flashes: take_flashes(session).await,
    })
}

// ============================================================================
// Movies
// ============================================================================

/// GET /
/// List all movies in store order.
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, WebError> {
    let ctx = page_context(&state, &session).await?;
    let movies = state.store.list_movies().await?;

    Ok(Html(templates::index_page(&ctx, &movies)))
}

/// POST /
/// Create a movie from the index form.
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<MovieForm>,
) -> Result<Redirect, WebError> {
    if validate_movie_input(&form.title, &form.year).is_err() {
        flash(&session, "Invalid input.").await;
        return Ok(Redirect::to("/"));
    }

    state.store.add_movie(&form.title, &form.year).await?;

    flash(&session, "Item created.").await;
    Ok(Redirect::to("/"))
}

/// GET /movie/edit/{movie_id}
/// Render the edit form pre-filled with current values.
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(movie_id): Path<i32>,
) -> Result<Html<String>, WebError> {
    let movie = state
        .store
        .get_movie(movie_id)
        .await?
        .ok_or_else(|| WebError::movie_not_found(movie_id))?;

    let ctx = page_context(&state, &session).await?;
    Ok(Html(templates::edit_page(&ctx, &movie)))
}

/// POST /movie/edit/{movie_id}
/// Update both fields; invalid input redirects back to this form.
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(movie_id): Path<i32>,
    Form(form): Form<MovieForm>,
) -> Result<Redirect, WebError> {
    // Lookup comes first so an unknown id is a 404 even with a bad body.
    state
        .store
        .get_movie(movie_id)
        .await?
        .ok_or_else(|| WebError::movie_not_found(movie_id))?;

    if validate_movie_input(&form.title, &form.year).is_err() {
        flash(&session, "Invalid input.").await;
        return Ok(Redirect::to(&format!("/movie/edit/{movie_id}")));
    }

    if !state
        .store
        .update_movie(movie_id, &form.title, &form.year)
        .await?
    {
        return Err(WebError::movie_not_found(movie_id));
    }

    flash(&session, "Item updated.").await;
    Ok(Redirect::to("/"))
}

/// POST /movie/delete/{movie_id}
/// Irreversible; any confirmation lives client-side.
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(movie_id): Path<i32>,
) -> Result<Redirect, WebError> {
    if !state.store.remove_movie(movie_id).await? {
        return Err(WebError::movie_not_found(movie_id));
    }

    flash(&session, "Item deleted.").await;
    Ok(Redirect::to("/"))
}

// ============================================================================
// Auth
// ============================================================================

/// GET /login
pub async fn login_form(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, WebError> {
    let ctx = page_context(&state, &session).await?;
    Ok(Html(templates::login_page(&ctx)))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, WebError> {
    if form.username.is_empty() || form.password.is_empty() {
        flash(&session, "Invalid input.").await;
        return Ok(Redirect::to("/login"));
    }

    match state.auth.login(&form.username, &form.password).await {
        Ok(result) => {
            session
                .insert(SESSION_USER_KEY, &result.username)
                .await
                .map_err(|e| WebError::internal(format!("Failed to create session: {e}")))?;

            flash(&session, "Login success.").await;
            Ok(Redirect::to("/"))
        }
        // Wrong username and wrong password look the same to the browser.
        Err(AuthError::InvalidCredentials | AuthError::UserNotFound) => {
            flash(&session, "Invalid username or password.").await;
            Ok(Redirect::to("/login"))
        }
        Err(e) => Err(WebError::internal(format!("Authentication error: {e}"))),
    }
}

/// POST /logout
/// Clears only the login marker so the goodbye flash survives.
pub async fn logout(session: Session) -> Result<Redirect, WebError> {
    session
        .remove::<String>(SESSION_USER_KEY)
        .await
        .map_err(|e| WebError::internal(format!("Session error: {e}")))?;

    flash(&session, "Goodbye.").await;
    Ok(Redirect::to("/"))
}

// ============================================================================
// Settings
// ============================================================================

/// GET /settings
pub async fn settings_form(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, WebError> {
    let username = session_username(&session).await?;

    let info = state
        .auth
        .get_user_info(&username)
        .await
        .map_err(|e| WebError::internal(format!("Failed to get user: {e}")))?;

    let ctx = page_context(&state, &session).await?;
    Ok(Html(templates::settings_page(&ctx, &info.name)))
}

/// POST /settings
/// Update the display name of the logged-in user.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect, WebError> {
    let username = session_username(&session).await?;

    match state.auth.update_display_name(&username, &form.name).await {
        Ok(()) => {
            flash(&session, "Settings updated.").await;
            Ok(Redirect::to("/"))
        }
        Err(AuthError::Validation(_)) => {
            flash(&session, "Invalid input.").await;
            Ok(Redirect::to("/settings"))
        }
        Err(e) => Err(WebError::internal(format!("Failed to update name: {e}"))),
    }
}

// ============================================================================
// Misc
// ============================================================================

/// GET /user/{name}
/// Plain-text greeting; the name comes from the URL and is escaped.
pub async fn user_page(Path(name): Path<String>) -> String {
    format!("User: {}", html_escape::encode_text(&name))
}

/// Any path the router does not know.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(templates::not_found_page("The page you requested does not exist")),
    )
        .into_response()
}
