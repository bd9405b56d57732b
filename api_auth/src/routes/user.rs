use std::sync::Arc;

use actix_web::{Responder, get, put, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;
use tenancy::TenantContext;

use crate::dtos::user::{PasswordChangeRequest, ProfileUpdateRequest, UserResponse};
use crate::services;

/// Endpoint to retrieve the current authenticated user's information.
///
/// # Output
/// - Success: `{ id, email, firstName, lastName, createdAt }`
/// - Error: 401 without a valid token, 404 if the user row is gone
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/users/me', {
///   headers: {
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`,
///     'x-tenant-id': localStorage.getItem('tenantId')
///   }
/// });
/// ```
#[get("/me")]
pub async fn get_me(
    claims: web::ReqData<JwtClaims>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let mut scope = tenant.scope(&pool).await?;
    let user = services::user::get_user_by_id(&mut scope, claims.user_id).await?;
    Success::ok(UserResponse::from(user))
}

#[put("/me")]
pub async fn put_me(
    req: web::Json<ProfileUpdateRequest>,
    claims: web::ReqData<JwtClaims>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let mut scope = tenant.scope(&pool).await?;
    let user =
        services::user::update_profile(&mut scope, claims.user_id, req.into_inner()).await?;
    Success::ok(UserResponse::from(user))
}

/// Changes the password. `currentPassword` must match.
#[put("/password")]
pub async fn put_password(
    req: web::Json<PasswordChangeRequest>,
    claims: web::ReqData<JwtClaims>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let mut scope = tenant.scope(&pool).await?;
    services::user::change_password(&mut scope, claims.user_id, req.into_inner()).await?;
    Success::message("Password updated")
}
