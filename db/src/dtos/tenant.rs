use uuid::Uuid;

use crate::schema::SchemaName;

#[derive(Debug)]
pub struct TenantCreateRequest {
    pub name: String,
    pub schema_name: SchemaName,
    pub domain: Option<String>,
}

#[derive(Debug)]
pub struct TenantUserCreateRequest {
    pub tenant_id: Uuid,
    pub email: String,
    pub role: String,
}

/// Result of resolving a login email against the catalog.
#[derive(Debug, Clone)]
pub struct TenantRef {
    pub tenant_id: Uuid,
    pub schema: SchemaName,
}

/// Everything the provisioner needs to stand up a tenant and its admin user.
#[derive(Debug)]
pub struct ProvisionRequest {
    pub name: String,
    pub domain: Option<String>,
    pub email: String,
    /// Already hashed; the provisioner never sees the plain password.
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
