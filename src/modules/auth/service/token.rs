//! Signed session tokens in the JWT compact form (`HS256`).
//!
//! Every token carries the user's identity claims, its kind (access or
//! refresh), issue and expiry timestamps and a unique token id. Signatures are HMAC-SHA256 over
//! `base64url(header) . base64url(claims)` with the shared `SECRET_KEY`.

use crate::{
    modules::user,
    types::AuthContext,
    utils::database::{timed, QueryError},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::Sha256;
use sqlx::PgExecutor;
use ulid::Ulid;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";
const TOKEN_TYPE: &str = "JWT";

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("token signing secret is not configured")]
    ConfigError,
    #[error("failed to encode token claims")]
    Encoding,
    #[error("token is malformed")]
    Malformed,
    #[error("token has expired")]
    Expired,
    #[error("token signature is invalid")]
    SignatureInvalid,
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum TokenType {
    #[serde(rename = "ACCESS")]
    Access,
    #[serde(rename = "REFRESH")]
    Refresh,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Claims {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub uid: String,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
    /// Unique per token, so pairs issued within the same second still differ.
    pub jti: String,
}

#[derive(Clone, Debug)]
pub struct Identity {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub uid: String,
}

impl From<&user::repository::User> for Identity {
    fn from(user: &user::repository::User) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            uid: user.id.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

fn secret(ctx: &AuthContext) -> Result<&str> {
    ctx.secret_key.as_deref().ok_or_else(|| {
        tracing::error!("Attempted to use tokens without a configured SECRET_KEY");
        Error::ConfigError
    })
}

fn mac(secret: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size")
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_vec(value)
        .map(|bytes| URL_SAFE_NO_PAD.encode(bytes))
        .map_err(|_| Error::Encoding)
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| Error::Malformed)?;

    serde_json::from_slice(&bytes).map_err(|_| Error::Malformed)
}

pub fn encode(ctx: &AuthContext, claims: &Claims) -> Result<String> {
    let secret = secret(ctx)?;
    let header = encode_segment(&Header {
        alg: ALGORITHM.to_string(),
        typ: TOKEN_TYPE.to_string(),
    })?;
    let signing_input = format!("{}.{}", header, encode_segment(claims)?);

    let mut mac = mac(secret);
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}

pub fn issue_token_pair(ctx: &AuthContext, identity: Identity) -> Result<TokenPair> {
    let now = Utc::now();
    let claims = |token_type, exp: i64| Claims {
        email: identity.email.clone(),
        first_name: identity.first_name.clone(),
        last_name: identity.last_name.clone(),
        uid: identity.uid.clone(),
        token_type,
        iat: now.timestamp(),
        exp,
        jti: Ulid::new().to_string(),
    };

    let access_token = encode(
        ctx,
        &claims(TokenType::Access, (now + ctx.access_token_ttl).timestamp()),
    )?;
    let refresh_token = encode(
        ctx,
        &claims(TokenType::Refresh, (now + ctx.refresh_token_ttl).timestamp()),
    )?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Verifies the signature, then the expiry, and returns the embedded claims.
pub fn validate_token(ctx: &AuthContext, token: &str) -> Result<Claims> {
    let secret = secret(ctx)?;

    let mut segments = token.split('.');
    let (header, claims, signature) = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(header), Some(claims), Some(signature), None) => (header, claims, signature),
        _ => return Err(Error::Malformed),
    };

    let parsed_header = decode_segment::<Header>(header)?;
    if parsed_header.alg != ALGORITHM {
        return Err(Error::Malformed);
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| Error::Malformed)?;

    let mut mac = mac(secret);
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(claims.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| Error::SignatureInvalid)?;

    let claims = decode_segment::<Claims>(claims)?;
    if claims.exp <= Utc::now().timestamp() {
        return Err(Error::Expired);
    }

    Ok(claims)
}

#[derive(Debug)]
pub enum PersistError {
    NotFound,
    UnexpectedError,
}

/// Overwrites the stored token pair of a user.
pub async fn persist_token_pair<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
    pair: &TokenPair,
) -> std::result::Result<(), PersistError> {
    let result = timed(
        sqlx::query(
            "
            UPDATE users SET
                token = $1,
                refresh_token = $2,
                updated_at = $3
            WHERE
                id = $4
            ",
        )
        .bind(&pair.access_token)
        .bind(&pair.refresh_token)
        .bind(Utc::now().naive_utc())
        .bind(&user_id)
        .execute(e),
    )
    .await
    .map_err(|err: QueryError| {
        tracing::error!(
            "Error occurred while persisting tokens for user {}: {}",
            user_id,
            err
        );
        PersistError::UnexpectedError
    })?;

    match result.rows_affected() {
        0 => Err(PersistError::NotFound),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(secret: &str) -> AuthContext {
        AuthContext::new(Some(secret.to_string()))
    }

    fn identity() -> Identity {
        Identity {
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            uid: "01HZX3S6Q7V8W9X0Y1Z2A3B4C5".to_string(),
        }
    }

    #[test]
    fn issued_tokens_validate_with_their_kind() {
        let ctx = context("restaurant-secret");
        let pair = issue_token_pair(&ctx, identity()).unwrap();

        let access = validate_token(&ctx, &pair.access_token).unwrap();
        let refresh = validate_token(&ctx, &pair.refresh_token).unwrap();

        assert_eq!(access.uid, "01HZX3S6Q7V8W9X0Y1Z2A3B4C5");
        assert_eq!(access.email, "ada@example.com");
        assert_eq!(access.token_type, TokenType::Access);
        assert_eq!(refresh.token_type, TokenType::Refresh);
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn back_to_back_pairs_are_distinct() {
        let ctx = context("restaurant-secret");
        let first = issue_token_pair(&ctx, identity()).unwrap();
        let second = issue_token_pair(&ctx, identity()).unwrap();

        assert_ne!(first.access_token, second.access_token);
        assert_ne!(first.refresh_token, second.refresh_token);

        let access = validate_token(&ctx, &first.access_token).unwrap();
        let refresh = validate_token(&ctx, &first.refresh_token).unwrap();
        assert_ne!(access.jti, refresh.jti);
        assert_eq!(access.iat, refresh.iat);
        assert!(access.iat <= Utc::now().timestamp());
    }

    #[test]
    fn access_tokens_expire_within_a_day() {
        let ctx = context("restaurant-secret");
        let pair = issue_token_pair(&ctx, identity()).unwrap();
        let claims = validate_token(&ctx, &pair.access_token).unwrap();
        let remaining = claims.exp - Utc::now().timestamp();

        assert!(remaining > 23 * 3600 && remaining <= 24 * 3600);
    }

    #[test]
    fn missing_secret_is_a_config_error() {
        let ctx = AuthContext::new(None);

        assert_eq!(issue_token_pair(&ctx, identity()), Err(Error::ConfigError));
        assert_eq!(
            issue_token_pair(&AuthContext::new(Some(String::new())), identity()),
            Err(Error::ConfigError)
        );
        assert_eq!(validate_token(&ctx, "a.b.c"), Err(Error::ConfigError));
    }

    #[test]
    fn rejects_tokens_signed_with_another_secret() {
        let pair = issue_token_pair(&context("one"), identity()).unwrap();

        assert_eq!(
            validate_token(&context("two"), &pair.access_token),
            Err(Error::SignatureInvalid)
        );
    }

    #[test]
    fn rejects_expired_tokens() {
        let ctx = context("restaurant-secret");
        let token = encode(
            &ctx,
            &Claims {
                email: "ada@example.com".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                uid: "user".to_string(),
                token_type: TokenType::Access,
                iat: Utc::now().timestamp() - 120,
                exp: Utc::now().timestamp() - 60,
                jti: Ulid::new().to_string(),
            },
        )
        .unwrap();

        assert_eq!(validate_token(&ctx, &token), Err(Error::Expired));
    }

    #[test]
    fn rejects_tampered_claims() {
        let ctx = context("restaurant-secret");
        let pair = issue_token_pair(&ctx, identity()).unwrap();
        let segments = pair.access_token.split('.').collect::<Vec<_>>();
        let forged_claims = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&Claims {
                email: "mallory@example.com".to_string(),
                first_name: "Mallory".to_string(),
                last_name: "M".to_string(),
                uid: "someone-else".to_string(),
                token_type: TokenType::Access,
                iat: Utc::now().timestamp(),
                exp: Utc::now().timestamp() + 3600,
                jti: Ulid::new().to_string(),
            })
            .unwrap(),
        );
        let forged = format!("{}.{}.{}", segments[0], forged_claims, segments[2]);

        assert_eq!(validate_token(&ctx, &forged), Err(Error::SignatureInvalid));
    }

    #[test]
    fn malformed_tokens_never_panic() {
        let ctx = context("restaurant-secret");

        for token in ["", "abc", "a.b", "a.b.c.d", "!!!.???.***", "e30.e30.e30"] {
            assert_eq!(validate_token(&ctx, token), Err(Error::Malformed), "{}", token);
        }
    }
}
