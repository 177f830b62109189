use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub is_admin: bool,
    pub exp: u64,
    pub iat: u64,
}

/// Issue an HS256 token valid for `lifetime_seconds`.
pub fn generate_token(
    user_id: impl Into<String>,
    is_admin: bool,
    secret: &str,
    lifetime_seconds: u64,
) -> anyhow::Result<String> {
    let now = u64::try_from(recipebox_shared::now())?;

    let claims = Claims {
        sub: user_id.into(),
        is_admin,
        exp: now + lifetime_seconds,
        iat: now,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

pub fn validate_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}
