use common::error::Res;
use sqlx::{Connection, PgConnection, PgPool, Postgres, Transaction, pool::PoolConnection};

use crate::schema::SchemaName;

/// Data-access handle for one request against one tenant.
///
/// Owns a dedicated pool connection for the lifetime of the request. Queries
/// issued through it are qualified with the tenant schema, so no session state
/// (`search_path`) is ever touched. The connection goes back to the pool when the
/// scope is dropped, on success and error paths alike.
pub struct TenantScope {
    conn: PoolConnection<Postgres>,
    schema: SchemaName,
}

impl TenantScope {
    pub async fn acquire(pool: &PgPool, schema: SchemaName) -> Res<Self> {
        let conn = pool.acquire().await?;
        Ok(TenantScope { conn, schema })
    }

    /// Connection and schema together, for single-statement calls.
    pub fn split(&mut self) -> (&mut PgConnection, &SchemaName) {
        (&mut *self.conn, &self.schema)
    }

    /// Starts a transaction on the scope's own connection.
    /// Returns the schema alongside so callers can keep using it while the
    /// transaction borrows the connection.
    pub async fn begin(&mut self) -> Res<(Transaction<'_, Postgres>, &SchemaName)> {
        let tx = (*self.conn).begin().await?;
        Ok((tx, &self.schema))
    }
}
