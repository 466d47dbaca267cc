//! In-process application used by the HTTP integration suites.
//!
//! Routes run against the real services, the Argon2 hasher and the JWT
//! issuer, all backed by a seeded [`InMemoryStore`]. Each call builds a fresh
//! Actix service over the shared state so suites can drive it from either
//! `#[actix_web::test]` functions or a blocking BDD world.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test, web};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};
use yoga_backend::Trace;
use yoga_backend::domain::TRACE_ID_HEADER;
use yoga_backend::domain::{AuthService, SessionService, TeacherService, UserService};
use yoga_backend::inbound::http::configure;
use yoga_backend::inbound::http::state::{HttpState, HttpStatePorts};
use yoga_backend::outbound::memory::InMemoryStore;
use yoga_backend::outbound::security::{Argon2PasswordHasher, JwtTokenService};

pub const TEST_SECRET: &[u8] = b"integration-suite-signing-secret";
pub const TEST_PASSWORD: &str = "sun-salutation";

/// Response captured from one request.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub trace_id: Option<String>,
}

/// Identity returned by a successful login.
#[derive(Debug, Clone)]
pub struct LoggedIn {
    pub id: i64,
    pub token: String,
}

#[derive(Clone)]
pub struct TestApp {
    state: web::Data<HttpState>,
}

impl TestApp {
    pub fn new() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let store = Arc::new(InMemoryStore::seeded(Arc::clone(&clock)));
        let tokens = Arc::new(JwtTokenService::new(
            TEST_SECRET.to_vec(),
            3_600_000,
            Arc::clone(&clock),
        ));
        let auth = Arc::new(AuthService::new(
            Arc::clone(&store),
            Arc::new(Argon2PasswordHasher),
            tokens,
        ));
        let sessions = Arc::new(SessionService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            clock,
        ));
        let users = Arc::new(UserService::new(Arc::clone(&store)));
        let state = HttpState::new(HttpStatePorts {
            login: auth.clone(),
            registration: auth.clone(),
            principals: auth,
            sessions: sessions.clone(),
            sessions_query: sessions,
            teachers: Arc::new(TeacherService::new(store)),
            users: users.clone(),
            users_query: users,
        });
        Self {
            state: web::Data::new(state),
        }
    }

    pub async fn call(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Reply {
        let app = test::init_service(
            App::new()
                .app_data(self.state.clone())
                .wrap(Trace)
                .configure(configure),
        )
        .await;
        let mut request = test::TestRequest::default().method(method).uri(path);
        if let Some(token) = token {
            request = request.insert_header((AUTHORIZATION, format!("Bearer {token}")));
        }
        if let Some(body) = body {
            request = request.set_json(body);
        }
        let res = test::call_service(&app, request.to_request()).await;
        let status = res.status();
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = test::read_body(res).await;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        Reply {
            status,
            body,
            trace_id,
        }
    }

    pub async fn register(&self, email: &str) -> Reply {
        self.call(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": email,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "password": TEST_PASSWORD,
            })),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Reply {
        self.call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Register `email` and log in, panicking when either step fails.
    pub async fn sign_up(&self, email: &str) -> LoggedIn {
        let registered = self.register(email).await;
        assert_eq!(registered.status, StatusCode::OK, "register {email}");
        let reply = self.login(email, TEST_PASSWORD).await;
        assert_eq!(reply.status, StatusCode::OK, "login {email}");
        LoggedIn {
            id: reply.body["id"].as_i64().expect("user id"),
            token: reply.body["token"]
                .as_str()
                .expect("token")
                .to_owned(),
        }
    }

    /// Create a session taught by seeded teacher 1 and return its id.
    pub async fn create_session(&self, token: &str, name: &str) -> i64 {
        let reply = self
            .call(
                Method::POST,
                "/api/session",
                Some(token),
                Some(json!({
                    "name": name,
                    "date": "2026-11-02T09:00:00Z",
                    "teacher_id": 1,
                    "description": "Slow flow for beginners",
                })),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK, "create session {name}");
        reply.body["id"].as_i64().expect("session id")
    }

    pub async fn participate(&self, token: &str, session: i64, user: i64) -> Reply {
        self.call(
            Method::POST,
            &format!("/api/session/{session}/participate/{user}"),
            Some(token),
            None,
        )
        .await
    }

    pub async fn leave(&self, token: &str, session: i64, user: i64) -> Reply {
        self.call(
            Method::DELETE,
            &format!("/api/session/{session}/participate/{user}"),
            Some(token),
            None,
        )
        .await
    }

    pub async fn get(&self, token: Option<&str>, path: &str) -> Reply {
        self.call(Method::GET, path, token, None).await
    }

    pub async fn delete(&self, token: &str, path: &str) -> Reply {
        self.call(Method::DELETE, path, Some(token), None).await
    }
}
