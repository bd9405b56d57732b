use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::tenant::{TenantCreateRequest, TenantRef, TenantUserCreateRequest},
    models::tenant::{Tenant, TenantUser},
    schema::SchemaName,
};

pub async fn insert_tenant<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: TenantCreateRequest,
) -> Res<Tenant> {
    sqlx::query_as::<_, Tenant>(
        r#"
        INSERT INTO public.tenants (name, schema_name, domain, plan)
        VALUES ($1, $2, $3, 'basic')
        RETURNING *
        "#,
    )
    .bind(data.name)
    .bind(data.schema_name.as_str())
    .bind(data.domain)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_tenant_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: TenantUserCreateRequest,
) -> Res<TenantUser> {
    sqlx::query_as::<_, TenantUser>(
        r#"
        INSERT INTO public.tenant_users (tenant_id, email, role)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(data.tenant_id)
    .bind(data.email)
    .bind(data.role)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn exists_tenant_user_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM public.tenant_users WHERE email = $1)",
    )
    .bind(email)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn exists_schema_name<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM public.tenants WHERE schema_name = $1)",
    )
    .bind(schema.as_str())
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Finds the tenant a login email belongs to.
/// `None` must be reported to the client as bad credentials, never as a 404.
pub async fn resolve_tenant_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<Option<TenantRef>> {
    let row = sqlx::query_as::<_, (Uuid, String)>(
        r#"
        SELECT t.id, t.schema_name
        FROM public.tenants t
        JOIN public.tenant_users tu ON t.id = tu.tenant_id
        WHERE tu.email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await?;

    row.map(|(tenant_id, schema_name)| {
        Ok(TenantRef {
            tenant_id,
            schema: SchemaName::parse(&schema_name)?,
        })
    })
    .transpose()
}

pub async fn resolve_schema_by_tenant_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    tenant_id: Uuid,
) -> Res<Option<SchemaName>> {
    let schema_name = sqlx::query_scalar::<_, String>(
        "SELECT schema_name FROM public.tenants WHERE id = $1",
    )
    .bind(tenant_id)
    .fetch_optional(executor)
    .await?;

    schema_name.as_deref().map(SchemaName::parse).transpose()
}

pub async fn get_tenant_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    tenant_id: Uuid,
) -> Res<Option<Tenant>> {
    sqlx::query_as::<_, Tenant>("SELECT * FROM public.tenants WHERE id = $1")
        .bind(tenant_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn update_stripe_customer<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    tenant_id: Uuid,
    customer_id: &str,
) -> Res<()> {
    sqlx::query(
        "UPDATE public.tenants SET stripe_customer_id = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2",
    )
    .bind(customer_id)
    .bind(tenant_id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Sets the tenant's plan. `subscription_id = None` clears the subscription.
pub async fn update_plan<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    tenant_id: Uuid,
    plan: &str,
    subscription_id: Option<&str>,
) -> Res<Tenant> {
    sqlx::query_as::<_, Tenant>(
        r#"
        UPDATE public.tenants
        SET plan = $1, subscription_id = $2, updated_at = CURRENT_TIMESTAMP
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(plan)
    .bind(subscription_id)
    .bind(tenant_id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| AppError::NotFound("Tenant not found".to_string()))
}
