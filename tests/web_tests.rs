use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use watchlist::config::Config;
use watchlist::web::AppState;

const ADMIN_USER: &str = "admin";
const ADMIN_PASSWORD: &str = "correct horse battery";

async fn spawn_app() -> (Router, Arc<AppState>) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // A single pooled connection, otherwise each connection gets its own
    // empty in-memory database.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.server.secure_cookies = false;

    let state = watchlist::web::create_app_state(config.clone())
        .await
        .expect("Failed to create app state");

    state
        .store
        .upsert_admin(ADMIN_USER, ADMIN_PASSWORD, &config.security)
        .await
        .expect("Failed to create admin user");

    (watchlist::web::router(state.clone()), state)
}

fn form_request(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("No session cookie set")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Log in as the seeded admin and return the session cookie.
async fn login(app: &Router) -> String {
    let body = format!("username={ADMIN_USER}&password={ADMIN_PASSWORD}");
    let response = app
        .clone()
        .oneshot(form_request("/login", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");
    session_cookie(&response)
}

#[tokio::test]
async fn test_index_lists_movies() {
    let (app, state) = spawn_app().await;
    state.store.add_movie("WALL-E", "2008").await.unwrap();
    state.store.add_movie("Mahjong", "1996").await.unwrap();

    let response = app.oneshot(get_request("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("WALL-E (2008)"));
    assert!(body.contains("Mahjong (1996)"));
    assert!(body.contains("2 Titles"));
}

#[tokio::test]
async fn test_anonymous_create_is_redirected_without_mutation() {
    let (app, state) = spawn_app().await;

    let response = app
        .oneshot(form_request("/", "title=WALL-E&year=2008", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
    assert_eq!(state.store.movie_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_then_index_shows_movie() {
    let (app, _state) = spawn_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(form_request("/", "title=WALL-E&year=2008", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let response = app.oneshot(get_request("/", Some(&cookie))).await.unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Item created."));
    assert!(body.contains("WALL-E (2008)"));
}

#[tokio::test]
async fn test_invalid_input_leaves_table_unchanged() {
    let (app, state) = spawn_app().await;
    let cookie = login(&app).await;

    let long_title = "a".repeat(61);
    let bad_bodies = [
        "title=&year=2008".to_string(),
        "title=WALL-E&year=200".to_string(),
        "title=WALL-E&year=20088".to_string(),
        "title=WALL-E&year=".to_string(),
        format!("title={long_title}&year=2008"),
    ];

    for body in &bad_bodies {
        let response = app
            .clone()
            .oneshot(form_request("/", body, Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/");
    }

    assert_eq!(state.store.movie_count().await.unwrap(), 0);

    let response = app.oneshot(get_request("/", Some(&cookie))).await.unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Invalid input."));
}

#[tokio::test]
async fn test_edit_round_trip() {
    let (app, state) = spawn_app().await;
    let cookie = login(&app).await;
    let movie = state.store.add_movie("Leon", "1993").await.unwrap();

    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/movie/edit/{}", movie.id),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("value=\"Leon\""));
    assert!(body.contains("value=\"1993\""));

    let response = app
        .clone()
        .oneshot(form_request(
            &format!("/movie/edit/{}", movie.id),
            "title=Leon&year=1994",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.oneshot(get_request("/", Some(&cookie))).await.unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Item updated."));
    assert!(body.contains("Leon (1994)"));
    assert!(!body.contains("Leon (1993)"));
}

#[tokio::test]
async fn test_invalid_edit_redirects_back_and_keeps_row() {
    let (app, state) = spawn_app().await;
    let cookie = login(&app).await;
    let movie = state.store.add_movie("Leon", "1994").await.unwrap();

    let uri = format!("/movie/edit/{}", movie.id);
    let response = app
        .clone()
        .oneshot(form_request(&uri, "title=&year=1994", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], uri.as_str());

    let unchanged = state.store.get_movie(movie.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "Leon");
    assert_eq!(unchanged.year, "1994");
}

#[tokio::test]
async fn test_edit_unknown_movie_is_404() {
    let (app, _state) = spawn_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_request("/movie/edit/999", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(form_request(
            "/movie/edit/999",
            "title=Leon&year=1994",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_movie() {
    let (app, state) = spawn_app().await;
    let cookie = login(&app).await;
    let movie = state.store.add_movie("Mahjong", "1996").await.unwrap();

    let uri = format!("/movie/delete/{}", movie.id);
    let response = app
        .clone()
        .oneshot(form_request(&uri, "", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(state.store.movie_count().await.unwrap(), 0);

    // Same id again: gone, so 404 and still nothing mutated.
    let response = app
        .clone()
        .oneshot(form_request(&uri, "", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get_request("/", Some(&cookie))).await.unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Item deleted."));
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let (app, _state) = spawn_app().await;

    let body = format!("username={ADMIN_USER}&password=wrong");
    let response = app
        .clone()
        .oneshot(form_request("/login", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(get_request("/login", Some(&cookie)))
        .await
        .unwrap();
    let page = body_string(response).await;
    assert!(page.contains("Invalid username or password."));

    // The session is still anonymous.
    let response = app
        .oneshot(form_request("/", "title=WALL-E&year=2008", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
}

#[tokio::test]
async fn test_login_requires_exact_username() {
    let (app, _state) = spawn_app().await;

    // Correct password for the only user, but a different username.
    let body = format!("username=somebody&password={ADMIN_PASSWORD}");
    let response = app
        .clone()
        .oneshot(form_request("/login", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
}

#[tokio::test]
async fn test_login_with_empty_fields() {
    let (app, _state) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(form_request("/login", "username=&password=", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
    let cookie = session_cookie(&response);

    let response = app
        .oneshot(get_request("/login", Some(&cookie)))
        .await
        .unwrap();
    let page = body_string(response).await;
    assert!(page.contains("Invalid input."));
}

#[tokio::test]
async fn test_logout_revokes_mutation_rights() {
    let (app, state) = spawn_app().await;
    let cookie = login(&app).await;
    let movie = state.store.add_movie("Leon", "1994").await.unwrap();

    let response = app
        .clone()
        .oneshot(form_request("/logout", "", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let response = app
        .clone()
        .oneshot(get_request("/", Some(&cookie)))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Goodbye."));

    // Same cookie, but no longer logged in: delete must not go through.
    let response = app
        .oneshot(form_request(
            &format!("/movie/delete/{}", movie.id),
            "",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
    assert_eq!(state.store.movie_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_settings_updates_display_name() {
    let (app, _state) = spawn_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(form_request("/settings", "name=Grey+Li", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let response = app.oneshot(get_request("/", Some(&cookie))).await.unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Settings updated."));
    assert!(body.contains("Grey Li's Watchlist"));
}

#[tokio::test]
async fn test_settings_rejects_long_name() {
    let (app, state) = spawn_app().await;
    let cookie = login(&app).await;

    let long_name = "a".repeat(21);
    let response = app
        .clone()
        .oneshot(form_request(
            "/settings",
            &format!("name={long_name}"),
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/settings");

    let user = state.store.first_user().await.unwrap().unwrap();
    assert_eq!(user.name, ADMIN_USER);
}

#[tokio::test]
async fn test_settings_requires_login() {
    let (app, _state) = spawn_app().await;

    let response = app
        .oneshot(get_request("/settings", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
}

#[tokio::test]
async fn test_user_page_escapes_name() {
    let (app, _state) = spawn_app().await;

    let response = app
        .oneshot(get_request("/user/%3Cscript%3Ealert(1)%3C%2Fscript%3E", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.starts_with("User: "));
    assert!(!body.contains("<script>"));
    assert!(body.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_unknown_path_renders_404_page() {
    let (app, _state) = spawn_app().await;

    let response = app.oneshot(get_request("/no/such/page", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_string(response).await;
    assert!(body.contains("404 Error - Page Not Found"));
}
