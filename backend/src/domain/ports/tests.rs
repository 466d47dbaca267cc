use super::*;
use crate::domain::{AccessToken, Email};
use rstest::rstest;

struct FixedSubjectTokens;

impl TokenService for FixedSubjectTokens {
    fn issue(&self, subject: &Email) -> Result<AccessToken, TokenError> {
        Ok(AccessToken::new(format!("token-for-{subject}")))
    }

    fn verify(&self, token: &str) -> Result<Email, TokenError> {
        let subject = token
            .strip_prefix("token-for-")
            .ok_or_else(|| TokenError::malformed("unknown prefix"))?;
        Email::new(subject).map_err(|err| TokenError::malformed(err.to_string()))
    }
}

#[rstest]
#[case("token-for-a@test.com", true)]
#[case("garbage", false)]
#[case("token-for-not-an-email", false)]
fn is_valid_follows_verify(#[case] token: &str, #[case] expected: bool) {
    assert_eq!(FixedSubjectTokens.is_valid(token), expected);
}

#[rstest]
fn issued_tokens_verify_back_to_their_subject() {
    let subject = Email::new("yoga@studio.com").expect("valid email");
    let token = FixedSubjectTokens.issue(&subject).expect("issue");
    assert_eq!(
        FixedSubjectTokens.verify(token.as_str()).expect("verify"),
        subject
    );
}

#[rstest]
#[case(UserPersistenceError::connection("refused").to_string(), "user repository connection failed: refused")]
#[case(UserPersistenceError::duplicate_email("a@test.com").to_string(), "email a@test.com is already registered")]
#[case(SessionPersistenceError::missing_reference("teacher 9").to_string(), "session references a missing record: teacher 9")]
#[case(TeacherPersistenceError::query("syntax").to_string(), "teacher repository query failed: syntax")]
#[case(TokenError::expired().to_string(), "token expired")]
#[case(PasswordHashError::malformed_hash("bad").to_string(), "stored password hash is malformed: bad")]
fn port_errors_render_messages(#[case] rendered: String, #[case] expected: &str) {
    assert_eq!(rendered, expected);
}
