use std::collections::HashMap;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::test::{self, TestRequest};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Drives a test service like a browser: cookies set by a response are sent
/// with every following request.
pub struct Browser<S> {
    service: S,
    cookies: HashMap<String, Cookie<'static>>,
}

impl<S, B> Browser<S>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    pub fn new(service: S) -> Self {
        Self {
            service,
            cookies: HashMap::new(),
        }
    }

    pub async fn get(&mut self, uri: &str) -> ServiceResponse<B> {
        self.send(TestRequest::get().uri(uri)).await
    }

    /// POST `form` as `application/x-www-form-urlencoded`.
    pub async fn post<T: Serialize>(&mut self, uri: &str, form: &T) -> ServiceResponse<B> {
        self.send(TestRequest::post().uri(uri).set_form(form)).await
    }

    pub async fn send(&mut self, mut req: TestRequest) -> ServiceResponse<B> {
        for cookie in self.cookies.values() {
            req = req.cookie(cookie.clone());
        }

        let resp = test::call_service(&self.service, req.to_request()).await;

        for cookie in resp.response().cookies() {
            let cookie = cookie.into_owned();

            if cookie.value().is_empty() {
                self.cookies.remove(cookie.name());
            } else {
                self.cookies.insert(cookie.name().to_string(), cookie);
            }
        }

        resp
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// Server-side view of the session, see
    /// [`session_state`](crate::testing::instance::session_state).
    pub async fn session(&mut self) -> HashMap<String, String> {
        let resp = self.get("/__test/session").await;

        test::read_body_json(resp).await
    }

    pub async fn session_value<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let session = self.session().await;

        session
            .get(key)
            .map(|raw| serde_json::from_str(raw).expect("Session value is not JSON"))
    }
}

pub async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let body = test::read_body(resp).await;

    String::from_utf8(body.to_vec()).expect("Response body is not UTF-8")
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
