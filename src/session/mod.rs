//! Identity stored in the session cookie.
//!
//! The cookie carries the authenticated user's id under [`USER_ID_KEY`] and a
//! freshness marker under [`FRESH_KEY`]. Pending flash messages live under
//! [`FLASHES_KEY`], see [`flash`].

pub mod flash;

use actix_session::{Session, SessionInsertError};
use uuid::Uuid;

pub use flash::{Category, Flash};

pub const USER_ID_KEY: &str = "_user_id";
pub const FRESH_KEY: &str = "_fresh";
pub const FLASHES_KEY: &str = "_flashes";

/// The id of the logged-in user, if the session holds a well-formed one.
pub fn user_id(session: &Session) -> Option<Uuid> {
    match session.get::<String>(USER_ID_KEY) {
        Ok(Some(id)) => Uuid::parse_str(&id).ok(),
        Ok(None) => None,
        Err(e) => {
            ::tracing::warn!(error = %e, "Unreadable user id in session");
            None
        }
    }
}

/// Bind the session to `id`. The session is renewed first so a pre-login
/// cookie never carries over into the authenticated one.
pub fn login(session: &Session, id: Uuid) -> Result<(), SessionInsertError> {
    session.renew();
    session.insert(USER_ID_KEY, id.to_string())?;
    session.insert(FRESH_KEY, true)?;

    Ok(())
}

/// Drop the identity keys. Pending flashes survive.
pub fn logout(session: &Session) {
    session.remove(USER_ID_KEY);
    session.remove(FRESH_KEY);
}
