use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::{error::Res, http::Success};
use sqlx::PgPool;
use tenancy::TenantContext;

use crate::{
    dtos::category::{LedgerRequest, ledger_kind},
    services,
};

/// Lists the income (`/categorias/ingresos`) or expense (`/categorias/egresos`)
/// categories that transactions are booked against.
#[get("/{ledger}")]
pub async fn get_ledger(
    path: web::Path<String>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let kind = ledger_kind(&path)?;
    let mut scope = tenant.scope(&pool).await?;
    Success::ok(services::ledger::list(&mut scope, kind).await?)
}

#[post("/{ledger}")]
pub async fn post_ledger(
    path: web::Path<String>,
    req: web::Json<LedgerRequest>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let kind = ledger_kind(&path)?;
    let mut scope = tenant.scope(&pool).await?;
    let category = services::ledger::create(&mut scope, kind, req.into_inner()).await?;
    Success::created(category)
}

#[put("/{ledger}/{id}")]
pub async fn put_ledger(
    path: web::Path<(String, i32)>,
    req: web::Json<LedgerRequest>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let (ledger, id) = path.into_inner();
    let kind = ledger_kind(&ledger)?;
    let mut scope = tenant.scope(&pool).await?;
    let category = services::ledger::update(&mut scope, kind, id, req.into_inner()).await?;
    Success::ok(category)
}

#[delete("/{ledger}/{id}")]
pub async fn delete_ledger(
    path: web::Path<(String, i32)>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let (ledger, id) = path.into_inner();
    let kind = ledger_kind(&ledger)?;
    let mut scope = tenant.scope(&pool).await?;
    services::ledger::delete(&mut scope, kind, id).await?;
    Success::message("Category deleted")
}
