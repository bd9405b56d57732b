use std::sync::Arc;

use actix_web::{Responder, post, web};
use common::{env_config::Config, error::Res, http::Success};
use sqlx::PgPool;

use crate::dtos::auth::{LoginRequest, RegisterRequest};
use crate::services;

/// Registers a new tenant together with its admin user.
///
/// # Input
/// - `req`: JSON payload with the tenant `name`, admin `email` and `password`,
///   plus optional `domain`, `firstName` and `lastName`
/// - `pool`: Database connection pool
/// - `config`: Application configuration
///
/// # Output
/// - Success: 201 with `{ user, tenantId, token }`
/// - Error: 400 for missing fields, a taken email or a taken tenant name;
///   500 when the tenant schema cannot be created (nothing is left behind)
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/auth/register', {
///   method: 'POST',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({
///     name: 'Acme',
///     email: 'admin@acme.com',
///     password: 'secret1'
///   })
/// });
///
/// if (response.ok) {
///   const { token, tenantId, user } = await response.json();
///   localStorage.setItem('authToken', token);
///   localStorage.setItem('tenantId', tenantId);
/// }
/// ```
#[post("/register")]
pub async fn post_register(
    req: web::Json<RegisterRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let auth = services::auth::register(pg_pool, &config.jwt_config, req.into_inner()).await?;
    Success::created(auth)
}

/// Authenticates an admin by email and password.
///
/// The tenant is looked up from the email, so the client does not send
/// `x-tenant-id` here; it receives it in the response.
///
/// # Output
/// - Success: `{ user, tenantId, token }`
/// - Error: 401 `Invalid credentials` for any unknown email or wrong password
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let auth =
        services::auth::login(pg_pool, &config.jwt_config, login_data.into_inner()).await?;
    Success::ok(auth)
}
