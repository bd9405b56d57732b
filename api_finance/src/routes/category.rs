use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::{error::Res, http::Success};
use sqlx::PgPool;
use tenancy::TenantContext;

use crate::{dtos::category::CategoryRequest, services};

/// Lists the tenant's categories ordered by name, seeded defaults included.
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/categories', {
///   headers: {
///     'Authorization': `Bearer ${token}`,
///     'x-tenant-id': tenantId
///   }
/// });
/// const categories = await response.json();
/// // [{ id: 1, name: "Alimentación", type: "expense", color: "#FF9800", is_default: true, ... }]
/// ```
#[get("")]
pub async fn get_categories(
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let mut scope = tenant.scope(&pool).await?;
    let categories = services::category::list_categories(&mut scope).await?;
    Success::ok(categories)
}

/// Creates a category. Body: `{ name, type: "income" | "expense", color? }`.
#[post("")]
pub async fn post_category(
    req: web::Json<CategoryRequest>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let mut scope = tenant.scope(&pool).await?;
    let category = services::category::create_category(&mut scope, req.into_inner()).await?;
    Success::created(category)
}

#[put("/{id}")]
pub async fn put_category(
    path: web::Path<i32>,
    req: web::Json<CategoryRequest>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let mut scope = tenant.scope(&pool).await?;
    let category =
        services::category::update_category(&mut scope, path.into_inner(), req.into_inner())
            .await?;
    Success::ok(category)
}

#[delete("/{id}")]
pub async fn delete_category(
    path: web::Path<i32>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let mut scope = tenant.scope(&pool).await?;
    services::category::delete_category(&mut scope, path.into_inner()).await?;
    Success::message("Category deleted")
}
