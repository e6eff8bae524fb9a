use actix_web::web::ServiceConfig;

use crate::controllers;

pub fn route(app: &mut ServiceConfig) {
    // Pages
    app.service(controllers::v1::page::index);
    app.service(controllers::v1::page::dashboard);
    // Auth
    app.service(controllers::v1::auth::register_form);
    app.service(controllers::v1::auth::register);
    app.service(controllers::v1::auth::login_form);
    app.service(controllers::v1::auth::login);
    app.service(controllers::v1::auth::logout);

    // Health check endpoints
    app.service(controllers::health::health);
    app.service(controllers::health::health_db);

    // Metrics endpoint
    app.service(controllers::metrics::metrics);
}
