use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{Identity, Role};
use crate::{
    error::{ApiError, ApiResult},
    settings,
};

pub const INVALID_TOKEN: &str = "Invalid or expired token";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 identity tokens. Built once at startup and
/// shared read-only.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
            validation,
        }
    }

    pub fn from_settings(auth: &settings::Auth) -> anyhow::Result<Self> {
        if auth.secret.is_empty() {
            anyhow::bail!("auth.secret must not be empty");
        }
        Ok(Self::new(&auth.secret, auth.lifetime()?))
    }

    pub fn issue(&self, subject_id: i32, role: Role) -> ApiResult<String> {
        self.issue_at(subject_id, role, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        subject_id: i32,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> ApiResult<String> {
        let claims = Claims {
            id: subject_id,
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.lifetime).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("signing token")?;
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> ApiResult<Identity> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| ApiError::Unauthenticated(INVALID_TOKEN))?;

        Ok(Identity {
            subject_id: data.claims.id,
            role: data.claims.role,
        })
    }
}
