use std::future::Future;
use std::pin::Pin;

use actix_session::{Session, SessionExt};
use actix_web::dev::Payload;
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest};
use sea_orm::DatabaseConnection;

use crate::entities::v1::users;
use crate::error::Error;
use crate::metrics::AppMetrics;
use crate::session::{self, Category, flash};

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to access this page.";

/// The logged-in user.
///
/// Taking `Auth` as a handler argument guards the route: a request without a
/// valid session is rejected with [`Error::Unauthenticated`], which answers
/// with a redirect to `/login?next=<path>`.
#[derive(Debug, Clone)]
pub struct Auth {
    pub user: users::Model,
}

impl FromRequest for Auth {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let session = req.get_session();
        let metrics = req.app_data::<Data<AppMetrics>>().cloned();
        let next = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| req.path().to_string());

        let db = match req.app_data::<Data<DatabaseConnection>>().cloned() {
            Some(db) => db,
            None => {
                return Box::pin(async move {
                    ::tracing::error!("Failed to get database connection");

                    Err(Error::MissingState("database connection"))
                });
            }
        };

        Box::pin(async move {
            match Auth::current(&session, &db).await? {
                Some(auth) => {
                    ::tracing::debug!(user_id = %auth.user.id, "Authenticated request");

                    Ok(auth)
                }
                None => {
                    let metrics = metrics.as_ref().map(|metrics| metrics.get_ref());

                    Err(deny(&session, metrics, next))
                }
            }
        })
    }
}

impl Auth {
    /// The session's user without guarding: anonymous requests get `None`
    /// and the session is left untouched.
    pub async fn current(session: &Session, db: &DatabaseConnection) -> Result<Option<Self>, Error> {
        let Some(id) = session::user_id(session) else {
            return Ok(None);
        };

        let user = users::Model::find_by_id(db, id).await?;

        Ok(user.map(|user| Auth { user }))
    }
}

fn deny(session: &Session, metrics: Option<&AppMetrics>, next: String) -> Error {
    ::tracing::info!(next = %next, "Rejected unauthenticated request");

    // A stale id for a vanished user must not linger.
    session::logout(session);

    if let Err(e) = flash::push(session, Category::Message, LOGIN_REQUIRED_MESSAGE) {
        ::tracing::warn!(error = %e, "Failed to queue login-required flash");
    }

    if let Some(metrics) = metrics {
        metrics.record_access_denied();
    }

    Error::Unauthenticated { next }
}

/// The login page, remembering where to go afterwards.
pub fn login_url(next: &str) -> String {
    format!("/login?next={}", urlencoding::encode(next))
}

/// Only same-site absolute paths are followed after login.
///
/// Browsers drop tab and newline from URLs, so `/\t/host` would turn into
/// `//host`; any control character rejects the path.
pub fn is_safe_next(next: &str) -> bool {
    if next.chars().any(|c| c.is_ascii_control()) {
        return false;
    }

    next.starts_with('/') && !next.starts_with("//") && !next.contains('\\')
}
