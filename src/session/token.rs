//! Signed session cookie values

use crate::session::{SessionError, SessionId};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const SESSION_ISSUER: &str = "legaldoc";

/// Claims carried in the session cookie
#[derive(Debug, Serialize, Deserialize, Clone)]
struct SessionClaims {
    sub: String, // session id
    exp: usize,
    iat: usize,
    iss: String,
}

/// Issues and verifies session cookie tokens (HS256 JWTs)
#[derive(Clone)]
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionTokens {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Lifetime of an issued token
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `id`
    pub fn issue(&self, id: &SessionId) -> Result<String, SessionError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| SessionError::Signing("Time went backwards".to_string()))?;

        let claims = SessionClaims {
            sub: id.to_string(),
            exp: (now + self.ttl).as_secs() as usize,
            iat: now.as_secs() as usize,
            iss: SESSION_ISSUER.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Signing(e.to_string()))
    }

    /// Verify a token and return the session id it carries
    pub fn verify(&self, token: &str) -> Result<SessionId, SessionError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[SESSION_ISSUER]);

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| SessionError::InvalidToken)?;

        data.claims.sub.parse()
    }
}
