//! Session tokens: short-lived HS256 access JWTs and opaque refresh tokens.
//!
//! The access token travels as a Bearer header or the `daybook_session`
//! cookie. Refresh tokens are random strings stored only as a SHA-256 hash.

use daybook_core::types::{DbId, EpochMillis};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// `iss` claim of every access token; tokens from other issuers are refused.
pub const TOKEN_ISSUER: &str = "daybook";

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Access token payload.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The signed-in user's id.
    pub sub: DbId,
    pub iss: String,
    /// Expiry, Unix seconds.
    pub exp: i64,
    /// Issue time, Unix seconds.
    pub iat: i64,
    pub jti: String,
}

/// Token signing secret and lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `60`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or a lifetime is not an
    /// integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", 60),
            refresh_token_expiry_days: env_i64("JWT_REFRESH_EXPIRY_DAYS", 30),
        }
    }

    /// Access token lifetime in seconds; also the session cookie's `Max-Age`.
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    /// When a refresh session created at `now` stops being usable.
    pub fn refresh_expires_at(&self, now: EpochMillis) -> EpochMillis {
        now + self.refresh_token_expiry_days * MILLIS_PER_DAY
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid i64")),
        Err(_) => default,
    }
}

/// A freshly issued token pair. `refresh_token_hash` is what gets stored.
#[derive(Debug)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_token_hash: String,
}

/// Issue an access token and a new refresh token for `user_id`.
pub fn issue_tokens(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<IssuedTokens, jsonwebtoken::errors::Error> {
    let access_token = generate_access_token(user_id, config)?;
    let refresh_token = Uuid::new_v4().simple().to_string();
    let refresh_token_hash = hash_refresh_token(&refresh_token);
    Ok(IssuedTokens {
        access_token,
        refresh_token,
        refresh_token_hash,
    })
}

fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        iss: TOKEN_ISSUER.to_string(),
        exp: now + config.access_token_expiry_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature, expiry and issuer of an access token.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[TOKEN_ISSUER]);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// SHA-256 hex digest of a refresh token, as stored in `user_sessions`.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 30,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(iss: &str, exp_offset: i64) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: 7,
            iss: iss.to_string(),
            exp: now + exp_offset,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        }
    }

    #[test]
    fn issued_tokens_validate() {
        let tokens = issue_tokens(42, &config()).unwrap();

        let claims = validate_token(&tokens.access_token, &config()).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(tokens.refresh_token_hash, hash_refresh_token(&tokens.refresh_token));
        assert_eq!(tokens.refresh_token_hash.len(), 64);
    }

    #[test]
    fn refresh_tokens_are_unique() {
        let a = issue_tokens(1, &config()).unwrap();
        let b = issue_tokens(1, &config()).unwrap();
        assert_ne!(a.refresh_token, b.refresh_token);
    }

    #[test]
    fn expired_token_fails() {
        // Well past the default 60-second leeway.
        let token = sign(&claims(TOKEN_ISSUER, -300), &config().secret);
        assert!(validate_token(&token, &config()).is_err());
    }

    #[test]
    fn foreign_issuer_fails() {
        let token = sign(&claims("someone-else", 300), &config().secret);
        assert!(validate_token(&token, &config()).is_err());
    }

    #[test]
    fn different_secret_fails() {
        let token = sign(&claims(TOKEN_ISSUER, 300), "another-secret");
        assert!(validate_token(&token, &config()).is_err());
    }

    #[test]
    fn refresh_expiry_is_in_days() {
        assert_eq!(config().refresh_expires_at(1_000), 1_000 + 30 * MILLIS_PER_DAY);
    }
}
