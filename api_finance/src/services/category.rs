use common::error::{AppError, Res};
use db::{models::category::Category, scope::TenantScope};

use crate::dtos::category::CategoryRequest;

fn category_not_found() -> AppError {
    AppError::NotFound("Category not found".to_string())
}

pub async fn list_categories(scope: &mut TenantScope) -> Res<Vec<Category>> {
    let (conn, schema) = scope.split();
    db::category::list_categories(conn, schema).await
}

pub async fn create_category(scope: &mut TenantScope, req: CategoryRequest) -> Res<Category> {
    let data = req.into_create()?;
    let (conn, schema) = scope.split();
    db::category::insert_category(conn, schema, data).await
}

/// Loads a user-created category, refusing the seeded ones.
async fn get_mutable(scope: &mut TenantScope, category_id: i32, action: &str) -> Res<Category> {
    let (conn, schema) = scope.split();
    let category = db::category::get_category_by_id(conn, schema, category_id)
        .await?
        .ok_or_else(category_not_found)?;
    if category.is_default {
        return Err(AppError::BadRequest(format!(
            "Default categories cannot be {}",
            action
        )));
    }
    Ok(category)
}

pub async fn update_category(
    scope: &mut TenantScope,
    category_id: i32,
    req: CategoryRequest,
) -> Res<Category> {
    let current = get_mutable(scope, category_id, "modified").await?;
    let data = req.into_update(&current)?;
    let (conn, schema) = scope.split();
    db::category::update_category(conn, schema, category_id, data)
        .await?
        .ok_or_else(category_not_found)
}

pub async fn delete_category(scope: &mut TenantScope, category_id: i32) -> Res<()> {
    get_mutable(scope, category_id, "deleted").await?;
    let (conn, schema) = scope.split();
    if !db::category::delete_category(conn, schema, category_id).await? {
        return Err(category_not_found());
    }
    log::info!("Deleted category {} from {}", category_id, schema);
    Ok(())
}
