use serde::{Deserialize, Serialize};

use common::env_config::StripeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPlan {
    Monthly,
    Annual,
}

impl BillingPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPlan::Monthly => "monthly",
            BillingPlan::Annual => "annual",
        }
    }

    /// Configured Stripe price for this plan, `None` when it is not set.
    pub fn price_id<'a>(&self, config: &'a StripeConfig) -> Option<&'a str> {
        let price = match self {
            BillingPlan::Monthly => config.monthly_price_id.as_str(),
            BillingPlan::Annual => config.annual_price_id.as_str(),
        };
        Some(price).filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionCreateRequest {
    pub payment_method_id: String,
    pub plan: BillingPlan,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionCreatedResponse {
    pub subscription_id: String,
    pub client_secret: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatusResponse {
    pub status: String,
    pub plan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_period_end: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_at_period_end: Option<bool>,
}

impl SubscriptionStatusResponse {
    pub fn inactive(plan: String) -> Self {
        SubscriptionStatusResponse {
            status: "inactive".to_string(),
            plan,
            current_period_end: None,
            cancel_at_period_end: None,
        }
    }
}
