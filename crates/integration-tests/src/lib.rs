//! Shared fixtures for the HTTP-level test suite: a fully wired
//! application over temp storage plus helpers for driving it with
//! tower `oneshot` calls.

use std::sync::Arc;

use api_adapters::{build_router, AppState};
use auth_adapters::PasscodeAuthenticator;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use configs::Passcodes;
use domains::traits::{Authenticator, MediaStore, MessageRepo};
use http_body_util::BodyExt;
use secrecy::SecretString;
use services::messages::MessageService;
use storage_adapters::{JsonMessageStore, LocalMediaStore};
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

pub const ADMIN_CODE: &str = "admin-code";
pub const USER_CODE: &str = "user-code";
pub const GUEST_CODE: &str = "guest-code";
pub const CHAT_CODE: &str = "chat-code";
pub const MOD_CODE: &str = "mod-code";

fn secret(code: &str) -> Option<SecretString> {
    Some(SecretString::from(code.to_string()))
}

pub fn test_passcodes() -> Passcodes {
    Passcodes {
        admin: secret(ADMIN_CODE),
        user: secret(USER_CODE),
        guest: secret(GUEST_CODE),
        chat: secret(CHAT_CODE),
        moderator: secret(MOD_CODE),
    }
}

pub struct TestApp {
    router: Router,
    // Keeps the temp data directory alive for the app's lifetime.
    _data_dir: tempfile::TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let data_dir = tempfile::tempdir().expect("create temp data dir");
        let images = data_dir.path().join("images");
        tokio::fs::create_dir_all(&images)
            .await
            .expect("create images dir");

        let repo: Arc<dyn MessageRepo> =
            Arc::new(JsonMessageStore::new(data_dir.path().join("messages.json")));
        let media: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(images));
        let auth: Arc<dyn Authenticator> = Arc::new(PasscodeAuthenticator::new(test_passcodes()));

        let state = AppState {
            auth,
            media,
            messages: Arc::new(MessageService::new(repo)),
        };
        let session_layer = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

        Self {
            router: build_router(state).layer(session_layer),
            _data_dir: data_dir,
        }
    }

    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router call")
    }

    pub async fn login_response(&self, passcode: &str) -> Response<Body> {
        self.post_form("/login", None, &format!("passcode={passcode}"))
            .await
    }

    /// Logs in with the given passcode and returns the session cookie
    /// to attach to subsequent requests.
    pub async fn login(&self, passcode: &str) -> String {
        let response = self.login_response(passcode).await;
        assert_eq!(
            response.status(),
            StatusCode::SEE_OTHER,
            "login should redirect"
        );
        session_cookie(&response).expect("login should set a session cookie")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::empty()).expect("request")).await
    }

    pub async fn post_form(&self, uri: &str, cookie: Option<&str>, body: &str) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::from(body.to_string())).expect("request"))
            .await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        cookie: Option<&str>,
        body: serde_json::Value,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::from(body.to_string())).expect("request"))
            .await
    }

    /// Multipart POST to `/upload` with every file under the `images`
    /// field name.
    pub async fn upload<D: AsRef<[u8]>>(
        &self,
        cookie: &str,
        files: &[(&str, D)],
    ) -> Response<Body> {
        let boundary = "fixture-boundary-7f3a91";
        let parts: Vec<(&str, &[u8])> =
            files.iter().map(|(name, data)| (*name, data.as_ref())).collect();
        self.request(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .header(header::COOKIE, cookie)
                .body(Body::from(multipart_body(boundary, &parts)))
                .expect("request"),
        )
        .await
    }
}

/// First `Set-Cookie` value trimmed to `name=value`.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)?
        .to_str()
        .ok()
        .map(|raw| raw.split(';').next().unwrap_or(raw).to_string())
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .expect("ascii location")
        .to_string()
}

pub async fn body_bytes(response: Response<Body>) -> bytes::Bytes {
    response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes()
}

pub async fn body_string(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).expect("utf-8 body")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

fn multipart_body(boundary: &str, files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (filename, data) in files {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"images\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
