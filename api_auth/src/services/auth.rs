use common::{
    env_config::JwtConfig,
    error::{AppError, Res},
    jwt::{self, NewClaims},
    password,
};
use db::{dtos::tenant::ProvisionRequest, scope::TenantScope};
use sqlx::PgPool;

use crate::dtos::auth::{AuthResponse, LoginRequest, RegisterRequest};

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

/// Creates a tenant with its admin user and signs the admin in.
pub async fn register(
    pool: &PgPool,
    jwt_config: &JwtConfig,
    req: RegisterRequest,
) -> Res<AuthResponse> {
    let req = req.validated()?;

    if db::tenant::exists_tenant_user_by_email(pool, &req.email).await? {
        return Err(AppError::BadRequest("Email already registered".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;
    let provisioned = db::provision::provision_tenant(
        pool,
        ProvisionRequest {
            name: req.name,
            domain: req.domain,
            email: req.email,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
        },
    )
    .await?;

    let tenant_id = provisioned.tenant.id;
    let token = jwt::generate_jwt(
        NewClaims {
            user_id: provisioned.admin.id,
            email: provisioned.admin.email.clone(),
            tenant_id,
        },
        jwt_config,
    )?;

    log::info!("Registered tenant {} ({})", tenant_id, provisioned.schema);
    Ok(AuthResponse {
        user: provisioned.admin.into(),
        tenant_id,
        token,
    })
}

/// Every failure past input validation is the same `Invalid credentials`,
/// and an unknown email still pays for one argon2 verify, so callers cannot
/// tell an unknown email from a wrong password.
pub async fn login(
    pool: &PgPool,
    jwt_config: &JwtConfig,
    req: LoginRequest,
) -> Res<AuthResponse> {
    let req = req.validated()?;

    let Some(tenant) = db::tenant::resolve_tenant_by_email(pool, &req.email).await? else {
        password::verify_decoy(&req.password);
        return Err(invalid_credentials());
    };

    let mut scope = TenantScope::acquire(pool, tenant.schema).await?;
    let (conn, schema) = scope.split();
    let Some(user) = db::user::get_user_by_email(conn, schema, &req.email).await? else {
        log::warn!(
            "Catalog maps {} to tenant {} but the user row is missing",
            req.email,
            tenant.tenant_id
        );
        password::verify_decoy(&req.password);
        return Err(invalid_credentials());
    };

    if !password::verify_password(&req.password, &user.password_hash) {
        return Err(invalid_credentials());
    }

    let token = jwt::generate_jwt(
        NewClaims {
            user_id: user.id,
            email: user.email.clone(),
            tenant_id: tenant.tenant_id,
        },
        jwt_config,
    )?;

    Ok(AuthResponse {
        user: user.into(),
        tenant_id: tenant.tenant_id,
        token,
    })
}
