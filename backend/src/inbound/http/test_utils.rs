//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::ports::{
    MockLoginService, MockPrincipalResolver, MockRegistrationService, MockSessionCommand,
    MockSessionQuery, MockTeacherQuery, MockUserCommand, MockUserQuery,
};
use crate::domain::{Email, Principal, UserId};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Token accepted by [`TestPorts::authenticated`].
pub const TEST_TOKEN: &str = "test-token";

/// Mock ports with no expectations; set the ones a test exercises.
pub struct TestPorts {
    pub login: MockLoginService,
    pub registration: MockRegistrationService,
    pub principals: MockPrincipalResolver,
    pub sessions: MockSessionCommand,
    pub sessions_query: MockSessionQuery,
    pub teachers: MockTeacherQuery,
    pub users: MockUserCommand,
    pub users_query: MockUserQuery,
}

impl Default for TestPorts {
    fn default() -> Self {
        Self {
            login: MockLoginService::new(),
            registration: MockRegistrationService::new(),
            principals: MockPrincipalResolver::new(),
            sessions: MockSessionCommand::new(),
            sessions_query: MockSessionQuery::new(),
            teachers: MockTeacherQuery::new(),
            users: MockUserCommand::new(),
            users_query: MockUserQuery::new(),
        }
    }
}

impl TestPorts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ports whose resolver accepts [`TEST_TOKEN`] as `principal`.
    pub fn authenticated(principal: Principal) -> Self {
        let mut ports = Self::new();
        ports
            .principals
            .expect_resolve()
            .withf(|token: &str| token == TEST_TOKEN)
            .returning(move |_| Ok(principal.clone()));
        ports
    }

    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            principals: Arc::new(self.principals),
            sessions: Arc::new(self.sessions),
            sessions_query: Arc::new(self.sessions_query),
            teachers: Arc::new(self.teachers),
            users: Arc::new(self.users),
            users_query: Arc::new(self.users_query),
        }))
    }
}

pub fn test_principal(id: i64, email: &str) -> Principal {
    Principal::new(UserId::new(id), Email::new(email).expect("valid email"))
}

pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {TEST_TOKEN}"))
}

pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}
