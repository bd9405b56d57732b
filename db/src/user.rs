use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::{
    dtos::user::{UserCreateRequest, UserProfileUpdate},
    models::user::User,
    schema::SchemaName,
};

pub async fn insert_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    data: UserCreateRequest,
) -> Res<User> {
    let sql = format!(
        r#"
        INSERT INTO {} (email, password_hash, first_name, last_name)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
        schema.table("users")
    );
    sqlx::query_as::<_, User>(&sql)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.first_name)
        .bind(data.last_name)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    email: &str,
) -> Res<Option<User>> {
    let sql = format!("SELECT * FROM {} WHERE email = $1", schema.table("users"));
    sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    user_id: i32,
) -> Res<Option<User>> {
    let sql = format!("SELECT * FROM {} WHERE id = $1", schema.table("users"));
    sqlx::query_as::<_, User>(&sql)
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Updates only the fields that are `Some`.
pub async fn update_profile<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    user_id: i32,
    data: UserProfileUpdate,
) -> Res<Option<User>> {
    let sql = format!(
        r#"
        UPDATE {}
        SET first_name = COALESCE($1, first_name),
            last_name = COALESCE($2, last_name),
            updated_at = CURRENT_TIMESTAMP
        WHERE id = $3
        RETURNING *
        "#,
        schema.table("users")
    );
    sqlx::query_as::<_, User>(&sql)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn update_password_hash<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    schema: &SchemaName,
    user_id: i32,
    password_hash: &str,
) -> Res<bool> {
    let sql = format!(
        "UPDATE {} SET password_hash = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2",
        schema.table("users")
    );
    let result = sqlx::query(&sql)
        .bind(password_hash)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() == 1)
}
