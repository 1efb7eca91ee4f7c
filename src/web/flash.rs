//! One-time notices carried in the session and drained on the next render.

use tower_sessions::Session;

const FLASH_KEY: &str = "_flashes";

/// Queue a message for the next rendered page.
///
/// Session write failures are logged and swallowed.
pub async fn flash(session: &Session, message: &str) {
    let mut pending: Vec<String> = session
        .get(FLASH_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    pending.push(message.to_string());

    if let Err(e) = session.insert(FLASH_KEY, &pending).await {
        tracing::warn!("Failed to store flash message: {e}");
    }
}

/// Remove and return all queued messages.
pub async fn take_flashes(session: &Session) -> Vec<String> {
    session
        .remove::<Vec<String>>(FLASH_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}
