use actix_session::Session;
use actix_web::{HttpResponse, get};

/// Raw session entries (JSON-encoded values), for asserting on session state.
///
/// Only mounted by [`service!`](crate::service).
#[get("/__test/session")]
pub async fn session_state(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(session.entries().clone())
}

/// Fully wired application on a fresh in-memory database.
///
/// Expands to `(service, db)`.
#[macro_export]
macro_rules! service {
    () => {{
        let db = $crate::testing::setup::database().await;
        let state = $crate::testing::setup::state(db.clone());
        let app = ::actix_web::App::new()
            .configure(|app| state.register(app))
            .configure($crate::router::route)
            .service($crate::testing::instance::session_state)
            .wrap(state.session_middleware())
            .wrap(state.headers_middleware())
            .wrap(state.metrics_middleware());

        let service = ::actix_web::test::init_service(app).await;

        (service, db)
    }};
}
