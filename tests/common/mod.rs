#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use harbonline_backend::app::app::{Repositories, Services};
use harbonline_backend::config::{CompanyConfig, JwtConfig};
use harbonline_backend::util::email::{EmailError, EmailMessage, Mailer};
use harbonline_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl, ADMIN_ROLE};

pub const ADMIN_INBOX: &str = "office@harbonline.test";

/// Keeps every message instead of sending it; can be told to fail.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub fail: AtomicBool,
}

impl RecordingMailer {
    pub fn messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(EmailError::SmtpError("relay unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub services: Services,
    pub mailer: Arc<RecordingMailer>,
    pub admin_token: String,
}

pub fn company() -> CompanyConfig {
    CompanyConfig {
        bank_name: "Harbour Bank".to_string(),
        account_name: "Harbonline Ltd".to_string(),
        sort_code: "12-34-56".to_string(),
        account_number: "12345678".to_string(),
        ..CompanyConfig::default()
    }
}

pub fn test_app() -> TestApp {
    let mailer = Arc::new(RecordingMailer::default());
    let jwt_utils: Arc<dyn JwtTokenUtils> = Arc::new(JwtTokenUtilsImpl::new(JwtConfig::default()));
    let admin_token = jwt_utils
        .generate_token_pair("6650f0c2a1b2c3d4e5f60718", "admin@harbonline.test", ADMIN_ROLE)
        .unwrap()
        .access_token;
    let services = Services::new(
        Repositories::in_memory(),
        mailer.clone(),
        company(),
        Some(ADMIN_INBOX.to_string()),
        jwt_utils,
    );
    TestApp { router: services.router(), services, mailer, admin_token }
}

impl TestApp {
    pub fn token_for_role(&self, role: &str) -> String {
        self.services
            .jwt_utils
            .generate_token_pair("6650f0c2a1b2c3d4e5f60719", "someone@harbonline.test", role)
            .unwrap()
            .access_token
    }

    pub async fn raw(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    pub async fn request(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let resp = self.raw(method, uri, token, body).await;
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        (status, json)
    }

    pub async fn public(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request(method, uri, None, body).await
    }

    pub async fn admin(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.admin_token.clone();
        self.request(method, uri, Some(&token), body).await
    }
}

/// Hex id of a stored record as returned by the API.
pub fn id_of(record: &Value) -> String {
    record["_id"]["$oid"].as_str().expect("record has an _id").to_string()
}
