use actix_session::Session;

use crate::entities::v1::users::Model;
use crate::metrics::AppMetrics;
use crate::session;

#[::tracing::instrument(skip_all, fields(user_id = %user.id))]
pub fn logout(session: &Session, user: &Model, metrics: &AppMetrics) {
    session::logout(session);
    metrics.record_logout();

    ::tracing::info!("User logged out");
}
