//! HTTP server assembly.
//!
//! [`AppState`] owns everything handlers pull out of `web::Data` plus the
//! middleware configuration, so the production server and the test service
//! are wired identically.

use actix_session::SessionMiddleware;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite};
use actix_web::web::{Data, ServiceConfig};
use actix_web::{App, HttpServer};
use anyhow::Context;
use sea_orm::DatabaseConnection;

use crate::config::{AppConfig, AuthConfig, SecurityHeadersConfig, SessionConfig};
use crate::metrics::{AppMetrics, MetricsMiddleware};
use crate::router;
use crate::security::{PasswordHasher, SecurityHeadersMiddleware};
use crate::views::Views;

#[derive(Clone)]
pub struct AppState {
    pub db: Data<DatabaseConnection>,
    pub views: Data<Views>,
    pub hasher: Data<PasswordHasher>,
    pub auth: Data<AuthConfig>,
    pub metrics: Data<AppMetrics>,
    pub session: SessionConfig,
    pub headers: SecurityHeadersConfig,
    key: Key,
}

impl AppState {
    pub fn new(config: &AppConfig, db: DatabaseConnection) -> anyhow::Result<Self> {
        let views = Views::new(config.app.name.clone()).context("Failed to register templates")?;
        let hasher = PasswordHasher::from_config(&config.auth)
            .map_err(|e| anyhow::anyhow!("Invalid Argon2 parameters: {e}"))?;
        let key = session_key(&config.session)?;

        Ok(Self {
            db: Data::new(db),
            views: Data::new(views),
            hasher: Data::new(hasher),
            auth: Data::new(config.auth.clone()),
            metrics: Data::new(AppMetrics::new()),
            session: config.session.clone(),
            headers: config.security.headers.clone(),
            key,
        })
    }

    /// Shared handler state.
    pub fn register(&self, app: &mut ServiceConfig) {
        app.app_data(self.db.clone());
        app.app_data(self.views.clone());
        app.app_data(self.hasher.clone());
        app.app_data(self.auth.clone());
        app.app_data(self.metrics.clone());
    }

    /// Private (encrypted and signed) cookie sessions.
    pub fn session_middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(self.session.cookie_name.clone())
            .cookie_secure(self.session.secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .cookie_content_security(CookieContentSecurity::Private)
            .build()
    }

    pub fn headers_middleware(&self) -> SecurityHeadersMiddleware {
        SecurityHeadersMiddleware::new(self.headers.clone())
    }

    pub fn metrics_middleware(&self) -> MetricsMiddleware {
        MetricsMiddleware::new(self.metrics.get_ref().clone())
    }
}

/// Cookie key from `session.secret`, or a random one when the secret is
/// empty. A random key does not survive restarts.
pub fn session_key(config: &SessionConfig) -> anyhow::Result<Key> {
    if config.secret.is_empty() {
        ::tracing::warn!("session.secret is empty, generating an ephemeral session key");
        return Ok(Key::generate());
    }

    Key::try_from(config.secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("Invalid session.secret: {e}"))
}

#[::tracing::instrument(skip_all, fields(host = %config.server.host, port = config.server.port))]
pub async fn run(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let state = AppState::new(&config, db)?;

    let mut server = HttpServer::new(move || {
        App::new()
            .configure(|app| state.register(app))
            .configure(router::route)
            .wrap(state.session_middleware())
            .wrap(state.headers_middleware())
            .wrap(state.metrics_middleware())
    })
    .shutdown_timeout(config.app.shutdown_timeout);

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let server = server
        .bind((config.server.host.as_str(), config.server.port))
        .with_context(|| {
            format!(
                "Failed to bind {}:{}",
                config.server.host, config.server.port
            )
        })?;

    ::tracing::info!(
        environment = %config.app.environment,
        "Starting {}",
        config.app.name
    );

    server.run().await.context("Server terminated with an error")
}
