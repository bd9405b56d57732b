use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::{
    dtos::category::{CategoryCreateRequest, CategoryUpdateRequest},
    models::category::Category,
    schema::SchemaName,
};

pub async fn list_categories<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
) -> Res<Vec<Category>> {
    let sql = format!("SELECT * FROM {} ORDER BY name", schema.table("categories"));
    sqlx::query_as::<_, Category>(&sql)
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_category_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    category_id: i32,
) -> Res<Option<Category>> {
    let sql = format!("SELECT * FROM {} WHERE id = $1", schema.table("categories"));
    sqlx::query_as::<_, Category>(&sql)
        .bind(category_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_category<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    data: CategoryCreateRequest,
) -> Res<Category> {
    let sql = format!(
        r#"
        INSERT INTO {} (name, type, color, is_default)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
        schema.table("categories")
    );
    sqlx::query_as::<_, Category>(&sql)
        .bind(data.name)
        .bind(data.kind)
        .bind(data.color)
        .bind(data.is_default)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

/// Only user-created rows are touched; defaults are filtered out in SQL too.
pub async fn update_category<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    category_id: i32,
    data: CategoryUpdateRequest,
) -> Res<Option<Category>> {
    let sql = format!(
        r#"
        UPDATE {}
        SET name = $1, type = $2, color = $3, updated_at = CURRENT_TIMESTAMP
        WHERE id = $4 AND is_default = FALSE
        RETURNING *
        "#,
        schema.table("categories")
    );
    sqlx::query_as::<_, Category>(&sql)
        .bind(data.name)
        .bind(data.kind)
        .bind(data.color)
        .bind(category_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn delete_category<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    category_id: i32,
) -> Res<bool> {
    let sql = format!(
        "DELETE FROM {} WHERE id = $1 AND is_default = FALSE",
        schema.table("categories")
    );
    let result = sqlx::query(&sql).bind(category_id).execute(executor).await?;
    Ok(result.rows_affected() == 1)
}
