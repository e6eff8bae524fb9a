use actix_session::{Session, SessionInsertError};
use serde::{Deserialize, Serialize};

use super::FLASHES_KEY;

/// Styling bucket of a flash message; templates use it as a CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Message,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: Category,
    pub message: String,
}

/// Queue a message for the next rendered page.
pub fn push(
    session: &Session,
    category: Category,
    message: impl Into<String>,
) -> Result<(), SessionInsertError> {
    let mut flashes = pending(session);
    flashes.push(Flash {
        category,
        message: message.into(),
    });

    session.insert(FLASHES_KEY, flashes)
}

/// Remove and return every queued message.
pub fn take(session: &Session) -> Vec<Flash> {
    let flashes = match session.get::<Vec<Flash>>(FLASHES_KEY) {
        Ok(Some(flashes)) => flashes,
        // Nothing queued: leave the session unchanged so no cookie is written.
        Ok(None) => return Vec::new(),
        Err(e) => {
            ::tracing::warn!(error = %e, "Discarding malformed flash messages");
            Vec::new()
        }
    };

    session.remove(FLASHES_KEY);

    flashes
}

fn pending(session: &Session) -> Vec<Flash> {
    session
        .get::<Vec<Flash>>(FLASHES_KEY)
        .ok()
        .flatten()
        .unwrap_or_default()
}
