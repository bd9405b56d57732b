use common::{
    error::{AppError, Res},
    password,
};
use db::{models::user::User, scope::TenantScope};

use crate::dtos::{
    auth::MIN_PASSWORD_LEN,
    user::{PasswordChangeRequest, ProfileUpdateRequest},
};

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

pub async fn get_user_by_id(scope: &mut TenantScope, user_id: i32) -> Res<User> {
    let (conn, schema) = scope.split();
    db::user::get_user_by_id(conn, schema, user_id)
        .await?
        .ok_or_else(user_not_found)
}

pub async fn update_profile(
    scope: &mut TenantScope,
    user_id: i32,
    req: ProfileUpdateRequest,
) -> Res<User> {
    let update = req.validated()?;
    let (conn, schema) = scope.split();
    db::user::update_profile(conn, schema, user_id, update)
        .await?
        .ok_or_else(user_not_found)
}

/// Replaces the password after checking the current one.
pub async fn change_password(
    scope: &mut TenantScope,
    user_id: i32,
    req: PasswordChangeRequest,
) -> Res<()> {
    if req.current_password.is_empty() || req.new_password.is_empty() {
        return Err(AppError::BadRequest(
            "Current and new password are required".to_string(),
        ));
    }
    if req.new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let user = get_user_by_id(scope, user_id).await?;
    if !password::verify_password(&req.current_password, &user.password_hash) {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let hash = password::hash_password(&req.new_password)?;
    let (conn, schema) = scope.split();
    if !db::user::update_password_hash(conn, schema, user_id, &hash).await? {
        return Err(user_not_found());
    }
    Ok(())
}
