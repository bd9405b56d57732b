use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub schema_name: String,
    pub domain: Option<String>,
    pub plan: String,
    pub stripe_customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct TenantUser {
    pub id: i32,
    pub tenant_id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}
