//! Advisory token inspection
//!
//! The client never holds the CI server's signing key, so the stored token
//! is decoded without signature verification and only its claims are
//! checked. Findings are warnings for the caller; the API calls are
//! attempted either way.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
use thiserror::Error;

use crate::target::TargetToken;

/// A problem with the stored token.
#[derive(Debug, Error)]
pub enum TokenIssue {
    #[error("not logged in")]
    NotLoggedIn,

    #[error("stored token is not usable: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Deserialize)]
struct Claims {}

/// Check the stored token, if any.
///
/// Validates structure and registered claims (expiry in particular), not
/// the signature.
pub fn validate(token: Option<&TargetToken>) -> Result<(), TokenIssue> {
    let token = token
        .filter(|t| !t.value.is_empty())
        .ok_or(TokenIssue::NotLoggedIn)?;

    let header = jsonwebtoken::decode_header(&token.value)?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_aud = false;

    decode::<Claims>(&token.value, &DecodingKey::from_secret(&[]), &validation)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        exp: u64,
    }

    fn bearer(value: &str) -> TargetToken {
        TargetToken {
            token_type: "bearer".to_string(),
            value: value.to_string(),
        }
    }

    fn minted(exp: u64) -> String {
        encode(
            &Header::default(),
            &TestClaims { exp },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    fn now() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[test]
    fn test_missing_token_is_not_logged_in() {
        assert!(matches!(validate(None), Err(TokenIssue::NotLoggedIn)));
        assert!(matches!(
            validate(Some(&bearer(""))),
            Err(TokenIssue::NotLoggedIn)
        ));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert!(matches!(
            validate(Some(&bearer("not-a-jwt"))),
            Err(TokenIssue::Invalid(_))
        ));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let token = bearer(&minted(now() - 3600));
        assert!(matches!(
            validate(Some(&token)),
            Err(TokenIssue::Invalid(_))
        ));
    }

    #[test]
    fn test_live_token_passes() {
        let token = bearer(&minted(now() + 3600));
        assert!(validate(Some(&token)).is_ok());
    }
}
