//! Server-rendered pages.
//!
//! Templates are compiled into the binary and registered once at startup.
//! Every page gets the same `layout` (title, flashes, signed-in user) and a
//! page-specific `content` object.

use actix_web::HttpResponse;
use actix_web::http::header::{self, ContentType};
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use serde_json::{Value, json};

use crate::entities::v1::users;
use crate::error::Error;
use crate::session::Flash;

const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("../../templates/header.hbs")),
    ("footer", include_str!("../../templates/footer.hbs")),
];

const PAGES: [(&str, &str); 4] = [
    ("index", include_str!("../../templates/index.hbs")),
    ("login", include_str!("../../templates/login.hbs")),
    ("register", include_str!("../../templates/register.hbs")),
    ("dashboard", include_str!("../../templates/dashboard.hbs")),
];

pub struct Views {
    registry: Handlebars<'static>,
    app_name: String,
}

impl Views {
    pub fn new(app_name: impl Into<String>) -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();

        for (name, source) in PARTIALS {
            registry.register_partial(name, source)?;
        }

        for (name, source) in PAGES {
            registry.register_template_string(name, source)?;
        }

        Ok(Self {
            registry,
            app_name: app_name.into(),
        })
    }

    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String, RenderError> {
        self.registry.render(template, data)
    }

    /// Render `template` as a complete HTML page with status 200.
    #[::tracing::instrument(skip(self, layout, content))]
    pub fn page(&self, template: &str, layout: Layout, content: Value) -> Result<HttpResponse, Error> {
        let context = json!({
            "layout": {
                "title": layout.title,
                "app_name": self.app_name,
                "flashes": layout.flashes,
                "user": layout.user,
            },
            "content": content,
        });

        let body = self.render(template, &context)?;

        Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(body))
    }
}

/// Data shared by every page.
#[derive(Debug, Default, Serialize)]
pub struct Layout {
    pub title: String,
    pub flashes: Vec<Flash>,
    /// Email of the signed-in user.
    pub user: Option<String>,
}

impl Layout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn flashes(mut self, flashes: Vec<Flash>) -> Self {
        self.flashes = flashes;
        self
    }

    pub fn user(mut self, user: &users::Model) -> Self {
        self.user = Some(user.email.clone());
        self
    }
}

/// 302 to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
