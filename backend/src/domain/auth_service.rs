//! Authentication domain service.
//!
//! Implements signup, login and bearer-token principal resolution on top of
//! the user repository, the password hasher and the token service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, PrincipalResolver, RegistrationService,
    TokenError, TokenService, UserPersistenceError, UserRepository,
};
use crate::domain::user_service::map_user_error;
use crate::domain::{
    Email, Error, LoginCredentials, LoginOutcome, NewUser, Principal, SignupDetails, User,
};

/// Message returned for any signup whose email is already registered.
pub const EMAIL_TAKEN_MESSAGE: &str = "Error: Email is already taken!";
/// Message returned for every failed login, whatever the cause.
pub const BAD_CREDENTIALS_MESSAGE: &str = "Bad credentials";
/// Message returned when a presented token cannot be verified.
pub const INVALID_TOKEN_MESSAGE: &str = "invalid or expired token";
/// Message returned when a verified token names an account that is gone.
pub const PRINCIPAL_NOT_FOUND_MESSAGE: &str = "authentication principal not found";

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

/// Authentication service implementing the login, registration and principal
/// resolution driving ports.
pub struct AuthService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> AuthService<U, H, T> {
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

impl<U, H, T> AuthService<U, H, T>
where
    U: UserRepository,
{
    async fn user_by_email(&self, email: &Email) -> Result<Option<User>, Error> {
        self.users
            .find_by_email(email)
            .await
            .map_err(map_user_error)
    }
}

#[async_trait]
impl<U, H, T> RegistrationService for AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: Send + Sync,
{
    async fn register(&self, details: &SignupDetails) -> Result<User, Error> {
        let taken = self
            .users
            .exists_by_email(details.email())
            .await
            .map_err(map_user_error)?;
        if taken {
            debug!(email = %details.email(), "signup rejected: email taken");
            return Err(Error::invalid_request(EMAIL_TAKEN_MESSAGE));
        }

        let password = self
            .hasher
            .hash(details.password())
            .map_err(map_hash_error)?;
        let new_user = NewUser {
            email: details.email().clone(),
            first_name: details.first_name().clone(),
            last_name: details.last_name().clone(),
            password,
            admin: false,
        };

        // The store's unique index decides races between concurrent signups.
        let user = self.users.insert(&new_user).await.map_err(|err| match err {
            UserPersistenceError::DuplicateEmail { .. } => {
                Error::invalid_request(EMAIL_TAKEN_MESSAGE)
            }
            other => map_user_error(other),
        })?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<U, H, T> LoginService for AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let bad_credentials = || Error::authentication_failed(BAD_CREDENTIALS_MESSAGE);

        let Ok(email) = Email::new(credentials.email()) else {
            return Err(bad_credentials());
        };
        let Some(user) = self.user_by_email(&email).await? else {
            debug!("login rejected: unknown email");
            return Err(bad_credentials());
        };
        let matches = self
            .hasher
            .verify(credentials.password(), user.password())
            .map_err(map_hash_error)?;
        if !matches {
            debug!(user_id = %user.id(), "login rejected: wrong password");
            return Err(bad_credentials());
        }

        let token = self
            .tokens
            .issue(user.email())
            .map_err(|err| Error::internal(format!("token issue failed: {err}")))?;
        info!(user_id = %user.id(), "user logged in");
        Ok(LoginOutcome { token, user })
    }
}

#[async_trait]
impl<U, H, T> PrincipalResolver for AuthService<U, H, T>
where
    U: UserRepository,
    H: Send + Sync,
    T: TokenService,
{
    async fn resolve(&self, token: &str) -> Result<Principal, Error> {
        let email = self.tokens.verify(token).map_err(|err| {
            match &err {
                TokenError::Encoding { .. } => warn!(reason = %err, "token rejected"),
                _ => debug!(reason = %err, "token rejected"),
            }
            Error::authentication_failed(INVALID_TOKEN_MESSAGE)
        })?;
        let user = self
            .user_by_email(&email)
            .await?
            .ok_or_else(|| Error::not_found(PRINCIPAL_NOT_FOUND_MESSAGE))?;
        Ok(Principal::from(&user))
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
