pub mod env_config;
pub mod error;
pub mod http;
pub mod jwt;
pub mod password;
pub mod stripe;
pub mod validate;

/// Header carrying the tenant identifier on every tenant-scoped request.
pub const TENANT_HEADER: &str = "x-tenant-id";
