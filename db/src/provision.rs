use common::error::{AppError, Res};
use log::{error, info};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::{
    dtos::{
        tenant::{ProvisionRequest, TenantCreateRequest, TenantUserCreateRequest},
        user::UserCreateRequest,
    },
    models::{
        category::CategoryKind,
        tenant::Tenant,
        user::User,
    },
    schema::SchemaName,
    tenant, user,
};

pub const INCOME_LEDGER_DEFAULTS: &[&str] = &[
    "Sueldo",
    "Negocio",
    "Ingreso residual",
    "Freelance",
    "Comisiones",
    "Inversiones",
    "Subsidios",
    "Donaciones",
];

pub const EXPENSE_LEDGER_DEFAULTS: &[&str] = &[
    "Ahorros",
    "Caridad",
    "Celular",
    "Comida por fuera",
    "Créditos",
    "Cuidado personal",
    "Deudas",
    "Donaciones",
    "Educación",
    "Entretenimiento",
    "Gasolina",
    "Personales",
    "Imprevistos",
    "Inversiones",
    "Gimnasio",
    "Mantenimiento hogar",
    "Mercado",
    "Salud",
    "Seguros",
    "Servicios agua",
    "Servicios gas",
    "Servicios internet",
    "Servicios luz",
    "TV Streaming",
    "Tarjeta de crédito",
    "Transporte público",
    "Vestuario",
    "Vicash Suscripción",
    "Vivienda alquiler",
    "Vivienda hipoteca",
];

/// `(name, kind, color)` rows seeded into `categories`.
pub const CATEGORY_DEFAULTS: &[(&str, CategoryKind, &str)] = &[
    ("Salario", CategoryKind::Income, "#4CAF50"),
    ("Inversiones", CategoryKind::Income, "#2196F3"),
    ("Freelance", CategoryKind::Income, "#9C27B0"),
    ("Vivienda", CategoryKind::Expense, "#F44336"),
    ("Alimentación", CategoryKind::Expense, "#FF9800"),
    ("Transporte", CategoryKind::Expense, "#795548"),
    ("Servicios", CategoryKind::Expense, "#607D8B"),
    ("Ocio", CategoryKind::Expense, "#E91E63"),
];

pub struct ProvisionedTenant {
    pub tenant: Tenant,
    pub schema: SchemaName,
    pub admin: User,
}

/// Creates a tenant end to end: catalog rows, schema, tables, default
/// categories and the admin user. Everything happens in one transaction, so a
/// failure at any step leaves neither catalog rows nor a schema behind.
pub async fn provision_tenant(pool: &PgPool, req: ProvisionRequest) -> Res<ProvisionedTenant> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Tenant name is required".to_string()));
    }

    let schema = SchemaName::derive(&name);
    if !schema.fits() {
        return Err(AppError::BadRequest("Tenant name is too long".to_string()));
    }
    if tenant::exists_schema_name(pool, &schema).await? {
        return Err(AppError::BadRequest(
            "A tenant with this name already exists".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    match provision_in(&mut tx, &schema, name, req).await {
        Ok((tenant, admin)) => {
            tx.commit().await.map_err(provisioning_error)?;
            info!("Provisioned tenant {} in schema {}", tenant.id, schema);
            Ok(ProvisionedTenant {
                tenant,
                schema,
                admin,
            })
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                error!("Rollback of schema {} failed: {}", schema, rollback_err);
            }
            error!("Provisioning of schema {} failed: {}", schema, err);
            Err(provisioning_error(err))
        }
    }
}

async fn provision_in(
    conn: &mut PgConnection,
    schema: &SchemaName,
    name: String,
    req: ProvisionRequest,
) -> Res<(Tenant, User)> {
    let tenant = tenant::insert_tenant(
        &mut *conn,
        TenantCreateRequest {
            name,
            schema_name: schema.clone(),
            domain: req.domain,
        },
    )
    .await?;

    tenant::insert_tenant_user(
        &mut *conn,
        TenantUserCreateRequest {
            tenant_id: tenant.id,
            email: req.email.clone(),
            role: "admin".to_string(),
        },
    )
    .await?;

    sqlx::raw_sql(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema.quoted()))
        .execute(&mut *conn)
        .await?;
    sqlx::raw_sql(&schema_ddl(schema))
        .execute(&mut *conn)
        .await?;

    seed_ledger(&mut *conn, schema, CategoryKind::Income, INCOME_LEDGER_DEFAULTS).await?;
    seed_ledger(&mut *conn, schema, CategoryKind::Expense, EXPENSE_LEDGER_DEFAULTS).await?;
    seed_categories(&mut *conn, schema).await?;

    let admin = user::insert_user(
        &mut *conn,
        schema,
        UserCreateRequest {
            email: req.email,
            password_hash: req.password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
        },
    )
    .await?;

    Ok((tenant, admin))
}

/// Table layout of a tenant schema.
fn schema_ddl(schema: &SchemaName) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {users} (
            id SERIAL PRIMARY KEY,
            email VARCHAR(255) UNIQUE NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            first_name VARCHAR(100),
            last_name VARCHAR(100),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS {categories} (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            type VARCHAR(20) NOT NULL CHECK (type IN ('income', 'expense')),
            color VARCHAR(7) NOT NULL DEFAULT '#FFD700',
            is_default BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS {ingresos} (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            description TEXT,
            is_default BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS {egresos} (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            description TEXT,
            is_default BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS {transactions} (
            id SERIAL PRIMARY KEY,
            amount NUMERIC(12, 2) NOT NULL,
            description TEXT,
            date DATE NOT NULL,
            category_id INTEGER NOT NULL,
            category_type VARCHAR(20) NOT NULL CHECK (category_type IN ('income', 'expense')),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS transactions_date_idx ON {transactions} (date);
        "#,
        users = schema.table("users"),
        categories = schema.table("categories"),
        ingresos = schema.table(CategoryKind::Income.ledger_table()),
        egresos = schema.table(CategoryKind::Expense.ledger_table()),
        transactions = schema.table("transactions"),
    )
}

async fn seed_ledger(
    conn: &mut PgConnection,
    schema: &SchemaName,
    kind: CategoryKind,
    names: &[&'static str],
) -> Res<()> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
        "INSERT INTO {} (name, is_default) ",
        schema.table(kind.ledger_table())
    ));
    builder.push_values(names.iter(), |mut row, name| {
        row.push_bind(*name).push_bind(true);
    });
    builder.build().execute(conn).await?;
    Ok(())
}

async fn seed_categories(conn: &mut PgConnection, schema: &SchemaName) -> Res<()> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
        "INSERT INTO {} (name, type, color, is_default) ",
        schema.table("categories")
    ));
    builder.push_values(CATEGORY_DEFAULTS.iter(), |mut row, (name, kind, color)| {
        row.push_bind(*name)
            .push_bind(*kind)
            .push_bind(*color)
            .push_bind(true);
    });
    builder.build().execute(conn).await?;
    Ok(())
}

/// Unique violations mean the tenant or email raced in after the pre-checks.
fn provisioning_error(err: impl Into<AppError>) -> AppError {
    match err.into() {
        AppError::Database(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            AppError::BadRequest("Tenant or email already registered".to_string())
        }
        AppError::BadRequest(message) => AppError::BadRequest(message),
        other => AppError::Provisioning(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seeds_have_the_expected_sizes() {
        assert_eq!(INCOME_LEDGER_DEFAULTS.len(), 8);
        assert_eq!(EXPENSE_LEDGER_DEFAULTS.len(), 30);
        assert_eq!(CATEGORY_DEFAULTS.len(), 8);
    }

    #[test]
    fn default_categories_carry_hex_colors() {
        for (_, _, color) in CATEGORY_DEFAULTS {
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
        }
    }

    #[test]
    fn ddl_only_references_the_tenant_schema() {
        let schema = SchemaName::derive("Acme");
        let ddl = schema_ddl(&schema);
        for table in [
            "users",
            "categories",
            "categorias_ingresos",
            "categorias_egresos",
            "transactions",
        ] {
            assert!(ddl.contains(&format!("\"tenant_acme\".{} (", table)));
        }
        assert!(!ddl.contains("public."));
    }

    #[test]
    fn unique_violations_are_not_reported_as_server_errors() {
        let err = provisioning_error(AppError::Internal("boom".to_string()));
        assert!(matches!(err, AppError::Provisioning(_)));

        let err = provisioning_error(AppError::BadRequest("taken".to_string()));
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
