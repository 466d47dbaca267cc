//! Wiring of repositories, credential adapters and services into the HTTP
//! state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use yoga_backend::domain::ports::{SessionRepository, TeacherRepository, UserRepository};
use yoga_backend::domain::{AuthService, SessionService, TeacherService, UserService};
use yoga_backend::inbound::http::state::{HttpState, HttpStatePorts};
use yoga_backend::outbound::memory::InMemoryStore;
use yoga_backend::outbound::persistence::{
    DieselSessionRepository, DieselTeacherRepository, DieselUserRepository,
};
use yoga_backend::outbound::security::{Argon2PasswordHasher, JwtTokenService};

use super::ServerConfig;

/// Build services over the given repositories.
fn wire<S, T, U>(
    config: &ServerConfig,
    sessions: Arc<S>,
    teachers: Arc<T>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    S: SessionRepository + 'static,
    T: TeacherRepository + 'static,
    U: UserRepository + 'static,
{
    let tokens = Arc::new(JwtTokenService::new(
        config.jwt_secret.to_vec(),
        config.jwt_expiration_ms,
        Arc::clone(&clock),
    ));
    let auth = Arc::new(AuthService::new(
        Arc::clone(&users),
        Arc::new(Argon2PasswordHasher),
        tokens,
    ));
    let session_service = Arc::new(SessionService::new(
        sessions,
        Arc::clone(&teachers),
        Arc::clone(&users),
        clock,
    ));
    let user_service = Arc::new(UserService::new(users));

    HttpState::new(HttpStatePorts {
        login: auth.clone(),
        registration: auth.clone(),
        principals: auth,
        sessions: session_service.clone(),
        sessions_query: session_service,
        teachers: Arc::new(TeacherService::new(teachers)),
        users: user_service.clone(),
        users_query: user_service,
    })
}

/// Build the HTTP state, backed by PostgreSQL when a pool is configured and
/// by a seeded in-memory store otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => wire(
            config,
            Arc::new(DieselSessionRepository::new(pool.clone())),
            Arc::new(DieselTeacherRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
            clock,
        ),
        None => {
            info!("no database configured; using in-memory store");
            let store = Arc::new(InMemoryStore::seeded(Arc::clone(&clock)));
            wire(config, Arc::clone(&store), Arc::clone(&store), store, clock)
        }
    };
    web::Data::new(state)
}
