use common::error::Res;
use db::{schema::SchemaName, scope::TenantScope};
use middleware::tenant::TenantMiddleware;
use sqlx::PgPool;
use uuid::Uuid;

pub mod middleware {
    pub mod tenant;
}

/// The tenant a request has been resolved to. Handlers receive it as
/// `web::ReqData<TenantContext>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantContext {
    pub tenant_id: Uuid,
    pub schema: SchemaName,
}

impl TenantContext {
    /// Opens the request's own connection against this tenant's schema.
    pub async fn scope(&self, pool: &PgPool) -> Res<TenantScope> {
        TenantScope::acquire(pool, self.schema.clone()).await
    }
}

pub fn middleware() -> TenantMiddleware {
    TenantMiddleware::new()
}
