use actix_web::{HttpMessage, HttpResponse, dev::ServiceRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    env_config::JwtConfig,
    error::{AppError, Res},
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JwtClaims {
    /// Id of the user inside the tenant's schema.
    pub user_id: i32,
    pub email: String,
    pub tenant_id: Uuid,
    pub exp: usize,
}

pub struct NewClaims {
    pub user_id: i32,
    pub email: String,
    pub tenant_id: Uuid,
}

/// Generates JWT token based on user object and JWT configuration options
pub fn generate_jwt(claims: NewClaims, config: &JwtConfig) -> Res<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(config.expiration_hours))
        .ok_or_else(|| AppError::Internal("Token expiration overflow".to_string()))?
        .timestamp();

    let claims = JwtClaims {
        user_id: claims.user_id,
        email: claims.email,
        tenant_id: claims.tenant_id,
        exp: expiration as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(AppError::from)
}

/// Extracts claims object from JWT token.
/// Requires JWT secret.
pub fn validate_jwt(token: &str, secret: &str) -> Res<JwtClaims> {
    jsonwebtoken::decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        log::debug!("Rejected session token: {}", e);
        AppError::Unauthorized("Invalid token".to_string())
    })
}

pub fn get_jwt_claims_or_error(req: &ServiceRequest) -> Result<JwtClaims, HttpResponse> {
    if let Some(jwt_claims_res) = req.extensions().get::<Res<JwtClaims>>() {
        match jwt_claims_res {
            Ok(claims) => Ok(claims.clone()),
            Err(app_error) => Err(app_error.to_http_response()),
        }
    } else {
        Err(
            AppError::Unauthorized("No authorization token provided".to_string())
                .to_http_response(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(hours: i64) -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: hours,
        }
    }

    fn claims(tenant_id: Uuid) -> NewClaims {
        NewClaims {
            user_id: 7,
            email: "a@acme.com".to_string(),
            tenant_id,
        }
    }

    #[test]
    fn issued_token_embeds_user_and_tenant() {
        let tenant_id = Uuid::new_v4();
        let token = generate_jwt(claims(tenant_id), &config(168)).unwrap();
        let claims = validate_jwt(&token, "test-secret").unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "a@acme.com");
        assert_eq!(claims.tenant_id, tenant_id);

        let week = Utc::now().timestamp() + 168 * 3600;
        assert!((claims.exp as i64 - week).abs() < 60);
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let token = generate_jwt(claims(Uuid::new_v4()), &config(1)).unwrap();
        let err = validate_jwt(&token, "other-secret").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = generate_jwt(claims(Uuid::new_v4()), &config(-2)).unwrap();
        assert!(validate_jwt(&token, "test-secret").is_err());
    }
}
