//! Authentication primitives: login credentials, signup data, principals and
//! access tokens.
//!
//! Inbound adapters build these from raw strings; the constructors reject
//! invalid shapes before a service or port is called. Plain-text passwords are
//! kept in zeroising buffers.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::{Email, PersonName, User, UserId, UserValidationError};

/// Maximum length of a plain-text password.
pub const PASSWORD_MAX: usize = 40;

/// Login payload validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Credentials submitted to the login flow.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller whitespace.
///
/// # Examples
/// ```
/// use yoga_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" a@test.com ", "pw").expect("valid");
/// assert_eq!(creds.email(), "a@test.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Build credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Login name used for the user lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plain-text password as provided.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Signup payload validation failures, tagged with the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupValidationError {
    #[error("{0}")]
    Email(UserValidationError),
    #[error("first name: {0}")]
    FirstName(UserValidationError),
    #[error("last name: {0}")]
    LastName(UserValidationError),
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("password must be at most {max} characters")]
    PasswordTooLong { max: usize },
}

impl SignupValidationError {
    /// Wire name of the field that failed validation.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::FirstName(_) => "firstName",
            Self::LastName(_) => "lastName",
            Self::EmptyPassword | Self::PasswordTooLong { .. } => "password",
        }
    }
}

/// Validated registration request.
#[derive(Debug, Clone)]
pub struct SignupDetails {
    email: Email,
    first_name: PersonName,
    last_name: PersonName,
    password: Zeroizing<String>,
}

/// Raw signup fields, as received by an inbound adapter.
#[derive(Debug, Clone, Copy)]
pub struct SignupFields<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
}

impl SignupDetails {
    /// Validate raw signup fields.
    ///
    /// # Examples
    /// ```
    /// use yoga_backend::domain::{SignupDetails, SignupFields};
    ///
    /// let details = SignupDetails::try_from_fields(SignupFields {
    ///     email: "a@test.com",
    ///     first_name: "Ada",
    ///     last_name: "Lovelace",
    ///     password: "pw",
    /// })
    /// .expect("valid signup");
    /// assert_eq!(details.email().as_ref(), "a@test.com");
    /// ```
    pub fn try_from_fields(fields: SignupFields<'_>) -> Result<Self, SignupValidationError> {
        let email = Email::new(fields.email).map_err(SignupValidationError::Email)?;
        let first_name =
            PersonName::new(fields.first_name).map_err(SignupValidationError::FirstName)?;
        let last_name =
            PersonName::new(fields.last_name).map_err(SignupValidationError::LastName)?;
        if fields.password.is_empty() {
            return Err(SignupValidationError::EmptyPassword);
        }
        if fields.password.chars().count() > PASSWORD_MAX {
            return Err(SignupValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        Ok(Self {
            email,
            first_name,
            last_name,
            password: Zeroizing::new(fields.password.to_owned()),
        })
    }

    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Signed bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Identity resolved from a request's bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
    email: Email,
}

impl Principal {
    #[must_use]
    pub fn new(user_id: UserId, email: Email) -> Self {
        Self { user_id, email }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Identifying key compared by the self-or-nothing guard.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::new(user.id(), user.email().clone())
    }
}

/// Successful login: a token plus the profile snapshot handed to the client.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: AccessToken,
    pub user: User,
}
