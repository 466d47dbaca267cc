//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, PrincipalResolver, RegistrationService, SessionCommand, SessionQuery,
    TeacherQuery, UserCommand, UserQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub principals: Arc<dyn PrincipalResolver>,
    pub sessions: Arc<dyn SessionCommand>,
    pub sessions_query: Arc<dyn SessionQuery>,
    pub teachers: Arc<dyn TeacherQuery>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub principals: Arc<dyn PrincipalResolver>,
    pub sessions: Arc<dyn SessionCommand>,
    pub sessions_query: Arc<dyn SessionQuery>,
    pub teachers: Arc<dyn TeacherQuery>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use yoga_backend::domain::{AuthService, SessionService, TeacherService, UserService};
    /// use yoga_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use yoga_backend::outbound::memory::InMemoryStore;
    /// use yoga_backend::outbound::security::{Argon2PasswordHasher, JwtTokenService};
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let store = Arc::new(InMemoryStore::new(clock.clone()));
    /// let tokens = Arc::new(JwtTokenService::new(b"doc-secret".to_vec(), 60_000, clock.clone()));
    /// let auth = Arc::new(AuthService::new(
    ///     store.clone(),
    ///     Arc::new(Argon2PasswordHasher),
    ///     tokens,
    /// ));
    /// let sessions = Arc::new(SessionService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     clock,
    /// ));
    /// let users = Arc::new(UserService::new(store.clone()));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: auth.clone(),
    ///     registration: auth.clone(),
    ///     principals: auth,
    ///     sessions: sessions.clone(),
    ///     sessions_query: sessions,
    ///     teachers: Arc::new(TeacherService::new(store)),
    ///     users: users.clone(),
    ///     users_query: users,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            principals,
            sessions,
            sessions_query,
            teachers,
            users,
            users_query,
        } = ports;
        Self {
            login,
            registration,
            principals,
            sessions,
            sessions_query,
            teachers,
            users,
            users_query,
        }
    }
}
