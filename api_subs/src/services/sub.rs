use chrono::{DateTime, Utc};
use common::{
    env_config::StripeConfig,
    error::{AppError, Res},
};
use db::models::tenant::Tenant;
use sqlx::PgPool;
use stripe::{
    CancelSubscription, Client, CreateSubscription, CreateSubscriptionItems, CustomerId,
    Expandable, Subscription, SubscriptionId,
};

use crate::dtos::sub::{
    SubscriptionCreateRequest, SubscriptionCreatedResponse, SubscriptionStatusResponse,
};

fn parse_subscription_id(raw: &str) -> Res<SubscriptionId> {
    raw.parse::<SubscriptionId>()
        .map_err(|e| AppError::Internal(format!("Invalid subscription ID {}: {}", raw, e)))
}

pub async fn get_tenant(pool: &PgPool, tenant_id: uuid::Uuid) -> Res<Tenant> {
    db::tenant::get_tenant_by_id(pool, tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tenant not found".to_string()))
}

/// Current plan of the tenant plus, when subscribed, the live Stripe state.
pub async fn get_subscription_status(
    client: &Client,
    tenant: Tenant,
) -> Res<SubscriptionStatusResponse> {
    let Some(subscription_id) = tenant.subscription_id.as_deref() else {
        return Ok(SubscriptionStatusResponse::inactive(tenant.plan));
    };

    let subscription =
        Subscription::retrieve(client, &parse_subscription_id(subscription_id)?, &[]).await?;

    Ok(SubscriptionStatusResponse {
        status: subscription.status.to_string(),
        plan: tenant.plan,
        current_period_end: DateTime::<Utc>::from_timestamp(subscription.current_period_end, 0),
        cancel_at_period_end: Some(subscription.cancel_at_period_end),
    })
}

/// Subscribes the tenant to a plan. The Stripe customer is created on first
/// use and remembered on the tenant row.
pub async fn create_subscription(
    pool: &PgPool,
    client: &Client,
    config: &StripeConfig,
    tenant: Tenant,
    email: &str,
    req: SubscriptionCreateRequest,
) -> Res<SubscriptionCreatedResponse> {
    let price_id = req
        .plan
        .price_id(config)
        .ok_or_else(|| AppError::Internal(format!("No price configured for {}", req.plan.as_str())))?;

    let customer_id = match tenant.stripe_customer_id {
        Some(id) => id,
        None => {
            let customer = common::stripe::create_customer(
                client,
                email,
                &tenant.name,
                &req.payment_method_id,
            )
            .await?;
            let id = customer.id.to_string();
            db::tenant::update_stripe_customer(pool, tenant.id, &id).await?;
            log::info!("Created Stripe customer {} for tenant {}", id, tenant.id);
            id
        }
    };
    let customer_id = customer_id
        .parse::<CustomerId>()
        .map_err(|e| AppError::Internal(format!("Invalid customer ID: {}", e)))?;

    let mut params = CreateSubscription::new(customer_id);
    params.items = Some(vec![CreateSubscriptionItems {
        price: Some(price_id.to_string()),
        ..Default::default()
    }]);
    params.default_payment_method = Some(req.payment_method_id.as_str());
    params.expand = &["latest_invoice.payment_intent"];

    let subscription = Subscription::create(client, params).await?;

    db::tenant::update_plan(
        pool,
        tenant.id,
        req.plan.as_str(),
        Some(subscription.id.as_str()),
    )
    .await?;
    log::info!(
        "Tenant {} subscribed to {} ({})",
        tenant.id,
        req.plan.as_str(),
        subscription.id
    );

    Ok(SubscriptionCreatedResponse {
        subscription_id: subscription.id.to_string(),
        client_secret: client_secret_of(&subscription),
    })
}

fn client_secret_of(subscription: &Subscription) -> Option<String> {
    match subscription.latest_invoice.as_ref()? {
        Expandable::Object(invoice) => match invoice.payment_intent.as_ref()? {
            Expandable::Object(intent) => intent.client_secret.clone(),
            Expandable::Id(_) => None,
        },
        Expandable::Id(_) => None,
    }
}

/// Cancels immediately and drops the tenant back to the free plan.
pub async fn cancel_subscription(pool: &PgPool, client: &Client, tenant: Tenant) -> Res<()> {
    let subscription_id = tenant
        .subscription_id
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("No active subscription found".to_string()))?;

    Subscription::cancel(
        client,
        &parse_subscription_id(subscription_id)?,
        CancelSubscription::default(),
    )
    .await?;

    db::tenant::update_plan(pool, tenant.id, "free", None).await?;
    log::info!("Tenant {} cancelled subscription {}", tenant.id, subscription_id);
    Ok(())
}
