use actix_web::HttpRequest;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while establishing the caller's identity
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Malformed Authorization header")]
    MalformedHeader,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// JWT claims carried by access tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued for
    pub sub: String,
    pub exp: usize,
}

/// The authenticated caller, threaded explicitly into every handler
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
}

/// Verifies bearer tokens and extracts the caller's identity
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Extract and verify the bearer token on a request
    pub fn identify(&self, req: &HttpRequest) -> Result<Identity, AuthError> {
        let header = req
            .headers()
            .get("Authorization")
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::MalformedHeader)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MalformedHeader)?;

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        Ok(Identity {
            user_id: data.claims.sub,
        })
    }

    /// Issue a token for a user id; used by tests and local tooling
    pub fn issue(&self, user_id: &str, ttl_secs: u64) -> Result<String, AuthError> {
        let exp = chrono::Utc::now().timestamp() as usize + ttl_secs as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            exp,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_token_round_trip() {
        let verifier = JwtVerifier::new("test-secret");
        let token = verifier.issue("user-42", 3600).unwrap();

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        let identity = verifier.identify(&req).unwrap();
        assert_eq!(identity.user_id, "user-42");
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let verifier = JwtVerifier::new("test-secret");
        let req = TestRequest::default().to_http_request();

        assert!(matches!(
            verifier.identify(&req),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_non_bearer_header_is_rejected() {
        let verifier = JwtVerifier::new("test-secret");
        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic abc123"))
            .to_http_request();

        assert!(matches!(
            verifier.identify(&req),
            Err(AuthError::MalformedHeader)
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = JwtVerifier::new("secret-a");
        let verifier = JwtVerifier::new("secret-b");
        let token = issuer.issue("user-42", 3600).unwrap();

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        assert!(verifier.identify(&req).is_err());
    }
}
