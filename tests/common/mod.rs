//! Shared fixtures: a migrated SQLite database in a temp dir, the real
//! service stack over it, and a cookie-carrying HTTP client for the router.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use chia_directory::api::{create_router, AppState};
use chia_directory::config::Config;
use chia_directory::domain::Registration;
use chia_directory::infra::Database;
use chia_directory::services::{ServiceContainer, Services};

/// A fresh database. The directory lives as long as this value.
pub struct TestDb {
    pub database: Arc<Database>,
    pub config: Config,
    _dir: TempDir,
}

pub async fn test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = Config {
        database_url: format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("directory.db").display()
        ),
        db_max_connections: 4,
        ..Config::default()
    };
    let database = Database::connect(&config).await.expect("migrated database");

    TestDb {
        database: Arc::new(database),
        config,
        _dir: dir,
    }
}

impl TestDb {
    pub fn services(&self) -> Arc<dyn ServiceContainer> {
        Arc::new(Services::from_connection(
            self.database.get_connection(),
            &self.config,
        ))
    }

    pub async fn router(&self) -> Router {
        let state = AppState::from_config(self.database.clone(), None, &self.config)
            .await
            .expect("app state");
        create_router(state)
    }
}

pub fn explorer_registration(username: &str, email: &str, preference: &str) -> Registration {
    Registration {
        username: username.into(),
        email: email.into(),
        password: "secreto".into(),
        role: "Explorador".into(),
        first_name: "Ana".into(),
        first_surname: "Ruiz".into(),
        phone: "3001234567".into(),
        preference: preference.into(),
        ..Default::default()
    }
}

pub fn entrepreneur_registration(username: &str, email: &str, business: &str, nit: &str) -> Registration {
    Registration {
        username: username.into(),
        email: email.into(),
        password: "secreto".into(),
        role: "Emprendedor".into(),
        owner_first_name: "Luis".into(),
        owner_first_surname: "Pardo".into(),
        business_name: business.into(),
        tax_id: nit.into(),
        category: "Comida".into(),
        location: "Calle 10".into(),
        zone: "Norte".into(),
        ..Default::default()
    }
}

// =============================================================================
// HTTP client
// =============================================================================

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

impl TestResponse {
    /// Messages of the flashes rendered with this page.
    pub fn flashes(&self) -> Vec<String> {
        self.body["flashes"]
            .as_array()
            .map(|flashes| {
                flashes
                    .iter()
                    .filter_map(|f| f["message"].as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Drives the router like a browser, carrying the session cookie along.
pub struct Client {
    router: Router,
    cookie: Option<String>,
}

impl Client {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            cookie: None,
        }
    }

    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    /// The `name=value` pair of the session cookie currently held.
    pub fn cookie(&self) -> Option<String> {
        self.cookie.clone()
    }

    /// Present `cookie` on the next requests instead of the held one.
    pub fn set_cookie(&mut self, cookie: Option<String>) {
        self.cookie = cookie;
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self.request("GET", path).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))
            .unwrap();
        self.send(request).await
    }

    pub async fn login(&mut self, identifier: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("identifier", identifier), ("password", password)])
            .await
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .to_string();
            let cleared = pair.ends_with('=');
            self.cookie = if cleared { None } else { Some(pair) };
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            location,
            body,
        }
    }
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            b' ' => "+".to_string(),
            other => format!("%{:02X}", other),
        })
        .collect()
}
