use actix_session::Session;
use actix_web::{HttpResponse, get};
use actix_web::web::Data;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::error::Error;
use crate::middlewares::v1::auth::Auth;
use crate::session::flash;
use crate::views::{Layout, Views};

#[get("/")]
pub async fn index(
    session: Session,
    db: Data<DatabaseConnection>,
    views: Data<Views>,
) -> Result<HttpResponse, Error> {
    let mut layout = Layout::new("Home").flashes(flash::take(&session));

    if let Some(auth) = Auth::current(&session, &db).await? {
        layout = layout.user(&auth.user);
    }

    views.page("index", layout, json!({}))
}

#[get("/dashboard")]
pub async fn dashboard(
    auth: Auth,
    session: Session,
    views: Data<Views>,
) -> Result<HttpResponse, Error> {
    let layout = Layout::new("Dashboard")
        .flashes(flash::take(&session))
        .user(&auth.user);

    views.page(
        "dashboard",
        layout,
        json!({
            "email": auth.user.email,
            "created_at": auth.user.created_at.format("%Y-%m-%d").to_string(),
        }),
    )
}
