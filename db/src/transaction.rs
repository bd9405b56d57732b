use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::{
    dtos::transaction::TransactionWriteRequest,
    models::transaction::{Transaction, TransactionWithCategory},
    schema::SchemaName,
};

/// All transactions of the tenant, newest first, with the name of their ledger
/// category. Rows whose category no longer exists come back with `None`.
pub async fn list_transactions<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
) -> Res<Vec<TransactionWithCategory>> {
    let sql = format!(
        r#"
        SELECT t.*, COALESCE(ci.name, ce.name) AS category_name
        FROM {transactions} t
        LEFT JOIN {ingresos} ci ON t.category_type = 'income' AND ci.id = t.category_id
        LEFT JOIN {egresos} ce ON t.category_type = 'expense' AND ce.id = t.category_id
        ORDER BY t.date DESC, t.id DESC
        "#,
        transactions = schema.table("transactions"),
        ingresos = schema.table("categorias_ingresos"),
        egresos = schema.table("categorias_egresos"),
    );
    sqlx::query_as::<_, TransactionWithCategory>(&sql)
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_transaction<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    transaction_id: i32,
) -> Res<Option<Transaction>> {
    let sql = format!(
        "SELECT * FROM {} WHERE id = $1",
        schema.table("transactions")
    );
    sqlx::query_as::<_, Transaction>(&sql)
        .bind(transaction_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_transaction<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    data: TransactionWriteRequest,
) -> Res<Transaction> {
    let sql = format!(
        r#"
        INSERT INTO {} (amount, description, date, category_id, category_type)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
        schema.table("transactions")
    );
    sqlx::query_as::<_, Transaction>(&sql)
        .bind(data.amount)
        .bind(data.description)
        .bind(data.date)
        .bind(data.category_id)
        .bind(data.category_type)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn update_transaction<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    transaction_id: i32,
    data: TransactionWriteRequest,
) -> Res<Option<Transaction>> {
    let sql = format!(
        r#"
        UPDATE {}
        SET amount = $1, description = $2, date = $3, category_id = $4,
            category_type = $5, updated_at = CURRENT_TIMESTAMP
        WHERE id = $6
        RETURNING *
        "#,
        schema.table("transactions")
    );
    sqlx::query_as::<_, Transaction>(&sql)
        .bind(data.amount)
        .bind(data.description)
        .bind(data.date)
        .bind(data.category_id)
        .bind(data.category_type)
        .bind(transaction_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn delete_transaction<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    transaction_id: i32,
) -> Res<bool> {
    let sql = format!("DELETE FROM {} WHERE id = $1", schema.table("transactions"));
    let result = sqlx::query(&sql)
        .bind(transaction_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() == 1)
}
