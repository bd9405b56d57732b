use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::{
    dtos::category::LedgerCategoryRequest,
    models::category::{CategoryKind, LedgerCategory},
    schema::SchemaName,
};

pub async fn list_ledger_categories<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    kind: CategoryKind,
) -> Res<Vec<LedgerCategory>> {
    let sql = format!(
        "SELECT * FROM {} ORDER BY name",
        schema.table(kind.ledger_table())
    );
    sqlx::query_as::<_, LedgerCategory>(&sql)
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_ledger_category<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    kind: CategoryKind,
    category_id: i32,
) -> Res<Option<LedgerCategory>> {
    let sql = format!(
        "SELECT * FROM {} WHERE id = $1",
        schema.table(kind.ledger_table())
    );
    sqlx::query_as::<_, LedgerCategory>(&sql)
        .bind(category_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_ledger_category<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    kind: CategoryKind,
    data: LedgerCategoryRequest,
) -> Res<LedgerCategory> {
    let sql = format!(
        r#"
        INSERT INTO {} (name, description, is_default)
        VALUES ($1, $2, FALSE)
        RETURNING *
        "#,
        schema.table(kind.ledger_table())
    );
    sqlx::query_as::<_, LedgerCategory>(&sql)
        .bind(data.name)
        .bind(data.description)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn update_ledger_category<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    kind: CategoryKind,
    category_id: i32,
    data: LedgerCategoryRequest,
) -> Res<Option<LedgerCategory>> {
    let sql = format!(
        r#"
        UPDATE {}
        SET name = $1, description = $2
        WHERE id = $3 AND is_default = FALSE
        RETURNING *
        "#,
        schema.table(kind.ledger_table())
    );
    sqlx::query_as::<_, LedgerCategory>(&sql)
        .bind(data.name)
        .bind(data.description)
        .bind(category_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn delete_ledger_category<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    kind: CategoryKind,
    category_id: i32,
) -> Res<bool> {
    let sql = format!(
        "DELETE FROM {} WHERE id = $1 AND is_default = FALSE",
        schema.table(kind.ledger_table())
    );
    let result = sqlx::query(&sql).bind(category_id).execute(executor).await?;
    Ok(result.rows_affected() == 1)
}

/// Number of transactions booked against a ledger category.
pub async fn count_transactions_for<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    kind: CategoryKind,
    category_id: i32,
) -> Res<i64> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE category_type = $1 AND category_id = $2",
        schema.table("transactions")
    );
    sqlx::query_scalar::<_, i64>(&sql)
        .bind(kind)
        .bind(category_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}
