//! JWT Authentication
//!
//! The token carries everything the core needs about a session: who the user
//! is, their role, and the tenant they signed in to.

use crate::error::ApiError;
use crate::AppState;
use axum::{async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use portal_core::{Role, SessionUser, TenantConfig, TenantId, TenantType, UserId};
use serde::{Deserialize, Serialize};
use tracing::debug;

const TOKEN_TTL_HOURS: i64 = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: UserId,
    pub name: String,
    pub role: Role,
    pub tenant_id: TenantId,
    pub tenant_name: String,
    pub tenant_type: TenantType,
    pub exp: usize,
}

impl Claims {
    /// Claims for `user` on `tenant`, valid for the standard session length
    pub fn new(user: &SessionUser, tenant: &TenantConfig) -> Self {
        let exp = (chrono::Utc::now() + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;

        Self {
            sub: user.id,
            name: user.display_name.clone(),
            role: user.role,
            tenant_id: tenant.tenant_id.clone(),
            tenant_name: tenant.display_name.clone(),
            tenant_type: tenant.tenant_type,
            exp,
        }
    }

    pub fn session(self) -> Session {
        Session {
            user: SessionUser {
                id: self.sub,
                role: self.role,
                display_name: self.name,
            },
            tenant: TenantConfig {
                tenant_id: self.tenant_id,
                display_name: self.tenant_name,
                tenant_type: self.tenant_type,
            },
        }
    }
}

/// Signing and verification keys
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn create_token(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), claims, &self.encoding)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }
}

/// Authenticated caller, extracted from the bearer token
#[derive(Debug, Clone)]
pub struct Session {
    pub user: SessionUser,
    pub tenant: TenantConfig,
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let claims = state.keys.verify_token(token).map_err(|e| {
            debug!(error = %e, "rejecting bearer token");
            ApiError::Unauthorized
        })?;

        Ok(claims.session())
    }
}
