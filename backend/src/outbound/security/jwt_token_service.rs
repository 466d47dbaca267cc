//! HS512 JSON Web Token implementation of the [`TokenService`] port.
//!
//! Tokens carry `sub` (the account email), `iat` and `exp` in seconds. Expiry
//! is checked against the injected clock with zero leeway rather than the
//! system time, so tests can pin the instant.

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{AccessToken, Email};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies bearer tokens with a shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expiration_ms: i64,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service from the raw secret and token lifetime.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use yoga_backend::domain::Email;
    /// use yoga_backend::domain::ports::TokenService;
    /// use yoga_backend::outbound::security::JwtTokenService;
    ///
    /// let tokens = JwtTokenService::new(b"doc-secret".to_vec(), 60_000, Arc::new(DefaultClock));
    /// let email = Email::new("yoga@studio.com").expect("valid email");
    /// let token = tokens.issue(&email).expect("token");
    /// assert_eq!(tokens.verify(token.as_str()).expect("valid"), email);
    /// ```
    pub fn new(secret: Vec<u8>, expiration_ms: i64, clock: Arc<dyn Clock>) -> Self {
        let secret = zeroize::Zeroizing::new(secret);
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);
        Self {
            encoding: EncodingKey::from_secret(&secret),
            decoding: DecodingKey::from_secret(&secret),
            validation,
            expiration_ms,
            clock,
        }
    }
}

fn map_decode_error(err: &jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature => TokenError::bad_signature(),
        ErrorKind::ExpiredSignature => TokenError::expired(),
        _ => TokenError::malformed(err.to_string()),
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &Email) -> Result<AccessToken, TokenError> {
        let now = self.clock.utc().timestamp_millis();
        let claims = Claims {
            sub: subject.as_ref().to_owned(),
            iat: now / 1000,
            exp: now.saturating_add(self.expiration_ms) / 1000,
        };
        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::encoding(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Email, TokenError> {
        let result = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| map_decode_error(&err))
            .and_then(|data| {
                let claims = data.claims;
                if claims.exp <= self.clock.utc().timestamp() {
                    return Err(TokenError::expired());
                }
                Email::new(&claims.sub).map_err(|err| TokenError::malformed(err.to_string()))
            });
        if let Err(err) = &result {
            debug!(reason = %err, "token rejected");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn service_at(secret: &[u8], at: DateTime<Utc>) -> JwtTokenService {
        JwtTokenService::new(secret.to_vec(), 60_000, Arc::new(FixedClock(at)))
    }

    #[fixture]
    fn email() -> Email {
        Email::new("yoga@studio.com").expect("valid email")
    }

    #[rstest]
    fn issued_tokens_verify_within_their_lifetime(email: Email) {
        let token = service_at(b"secret", issued_at())
            .issue(&email)
            .expect("token");

        let later = service_at(b"secret", issued_at() + Duration::seconds(59));
        assert_eq!(later.verify(token.as_str()).expect("valid"), email);
        assert!(later.is_valid(token.as_str()));
    }

    #[rstest]
    #[case::at_expiry(60)]
    #[case::after_expiry(3_600)]
    fn expired_tokens_are_rejected(email: Email, #[case] elapsed_secs: i64) {
        let token = service_at(b"secret", issued_at())
            .issue(&email)
            .expect("token");

        let verifier = service_at(b"secret", issued_at() + Duration::seconds(elapsed_secs));
        let err = verifier.verify(token.as_str()).expect_err("expired");

        assert!(matches!(err, TokenError::Expired));
    }

    #[rstest]
    fn foreign_signatures_are_rejected(email: Email) {
        let token = service_at(b"other-secret", issued_at())
            .issue(&email)
            .expect("token");

        let err = service_at(b"secret", issued_at())
            .verify(token.as_str())
            .expect_err("bad signature");

        assert!(matches!(err, TokenError::BadSignature));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-token")]
    #[case("a.b.c")]
    fn garbage_is_malformed(#[case] token: &str) {
        let err = service_at(b"secret", issued_at())
            .verify(token)
            .expect_err("malformed");

        assert!(matches!(err, TokenError::Malformed { .. }));
    }

    #[rstest]
    fn tokens_use_hs512(email: Email) {
        let token = service_at(b"secret", issued_at())
            .issue(&email)
            .expect("token");

        let header = jsonwebtoken::decode_header(token.as_str()).expect("header");
        assert_eq!(header.alg, Algorithm::HS512);
    }
}
