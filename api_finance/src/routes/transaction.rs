use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::{error::Res, http::Success};
use sqlx::PgPool;
use tenancy::TenantContext;

use crate::{dtos::transaction::TransactionRequest, services};

/// Lists the tenant's transactions, newest first.
///
/// # Output
/// Each row carries the stored fields plus `category_name` and `category_color`.
/// Amounts are signed: income positive, expense negative.
#[get("")]
pub async fn get_transactions(
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let mut scope = tenant.scope(&pool).await?;
    Success::ok(services::transaction::list_transactions(&mut scope).await?)
}

/// Books a transaction.
///
/// # Input
/// `{ amount, date: "YYYY-MM-DD", category_id, type: "income" | "expense", description? }`.
/// The sign of `amount` is ignored; it is derived from `type`.
///
/// # Output
/// - Success: 201 with the stored row
/// - Error: 400 on missing fields, 404 when `category_id` is not in the ledger for `type`
///
/// # Frontend Example
/// ```javascript
/// await fetch('/api/transactions', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${token}`,
///     'x-tenant-id': tenantId
///   },
///   body: JSON.stringify({ amount: 50, date: '2024-01-01', category_id: 17, type: 'expense' })
/// });
/// ```
#[post("")]
pub async fn post_transaction(
    req: web::Json<TransactionRequest>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let mut scope = tenant.scope(&pool).await?;
    let created =
        services::transaction::create_transaction(&mut scope, req.into_inner()).await?;
    Success::created(created)
}

#[put("/{id}")]
pub async fn put_transaction(
    path: web::Path<i32>,
    req: web::Json<TransactionRequest>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let mut scope = tenant.scope(&pool).await?;
    let updated = services::transaction::update_transaction(
        &mut scope,
        path.into_inner(),
        req.into_inner(),
    )
    .await?;
    Success::ok(updated)
}

#[delete("/{id}")]
pub async fn delete_transaction(
    path: web::Path<i32>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let mut scope = tenant.scope(&pool).await?;
    services::transaction::delete_transaction(&mut scope, path.into_inner()).await?;
    Success::message("Transaction deleted")
}
