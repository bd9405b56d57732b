use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{env_config::Config, error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;
use tenancy::TenantContext;

use crate::{dtos::sub::SubscriptionCreateRequest, services};

/// Returns the subscription state of the current tenant.
///
/// # Output
/// - `{ status: "inactive", plan }` when the tenant never subscribed
/// - `{ status, plan, currentPeriodEnd, cancelAtPeriodEnd }` otherwise
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/subscriptions/status', {
///   headers: {
///     'Authorization': `Bearer ${token}`,
///     'x-tenant-id': tenantId
///   }
/// });
/// const { status, plan } = await response.json();
/// ```
#[get("/status")]
pub async fn get_status(
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let tenant = services::sub::get_tenant(pg_pool, tenant.tenant_id).await?;
    let client = common::stripe::create_client(&config.stripe.secret_key);
    let status = services::sub::get_subscription_status(&client, tenant).await?;
    Success::ok(status)
}

/// Subscribes the tenant to the `monthly` or `annual` plan.
///
/// # Input
/// - `paymentMethodId`: Stripe payment method collected by the frontend
/// - `plan`: `monthly` or `annual`
///
/// # Output
/// - Success: `{ subscriptionId, clientSecret }`; the client secret confirms the first payment
/// - Error: Stripe failures keep their status and message
#[post("")]
pub async fn post_subscribe(
    req: web::Json<SubscriptionCreateRequest>,
    claims: web::ReqData<JwtClaims>,
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let tenant = services::sub::get_tenant(pg_pool, tenant.tenant_id).await?;
    let client = common::stripe::create_client(&config.stripe.secret_key);
    let created = services::sub::create_subscription(
        pg_pool,
        &client,
        &config.stripe,
        tenant,
        &claims.email,
        req.into_inner(),
    )
    .await?;
    Success::ok(created)
}

#[post("/cancel")]
pub async fn post_cancel(
    tenant: web::ReqData<TenantContext>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let tenant = services::sub::get_tenant(pg_pool, tenant.tenant_id).await?;
    let client = common::stripe::create_client(&config.stripe.secret_key);
    services::sub::cancel_subscription(pg_pool, &client, tenant).await?;
    Success::message("Subscription cancelled successfully")
}
