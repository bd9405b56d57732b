use common::error::{AppError, Res};
use db::{
    models::category::{CategoryKind, LedgerCategory},
    scope::TenantScope,
};

use crate::dtos::category::LedgerRequest;

fn category_not_found() -> AppError {
    AppError::NotFound("Category not found".to_string())
}

pub async fn list(scope: &mut TenantScope, kind: CategoryKind) -> Res<Vec<LedgerCategory>> {
    let (conn, schema) = scope.split();
    db::ledger::list_ledger_categories(conn, schema, kind).await
}

pub async fn create(
    scope: &mut TenantScope,
    kind: CategoryKind,
    req: LedgerRequest,
) -> Res<LedgerCategory> {
    let data = req.validated()?;
    let (conn, schema) = scope.split();
    db::ledger::insert_ledger_category(conn, schema, kind, data).await
}

async fn get_mutable(
    scope: &mut TenantScope,
    kind: CategoryKind,
    category_id: i32,
    action: &str,
) -> Res<LedgerCategory> {
    let (conn, schema) = scope.split();
    let category = db::ledger::get_ledger_category(conn, schema, kind, category_id)
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

pub async fn update(
    scope: &mut TenantScope,
    kind: CategoryKind,
    category_id: i32,
    req: LedgerRequest,
) -> Res<LedgerCategory> {
    let data = req.validated()?;
    get_mutable(scope, kind, category_id, "modified").await?;
    let (conn, schema) = scope.split();
    db::ledger::update_ledger_category(conn, schema, kind, category_id, data)
        .await?
        .ok_or_else(category_not_found)
}

/// Categories still referenced by transactions are kept.
pub async fn delete(scope: &mut TenantScope, kind: CategoryKind, category_id: i32) -> Res<()> {
    get_mutable(scope, kind, category_id, "deleted").await?;

    let (mut tx, schema) = scope.begin().await?;
    let in_use = db::ledger::count_transactions_for(&mut *tx, schema, kind, category_id).await?;
    if in_use > 0 {
        log::debug!("Refusing to delete {} category {} still in use", kind, category_id);
        return Err(AppError::BadRequest(format!(
            "Category is used by {} transaction(s)",
            in_use
        )));
    }
    if !db::ledger::delete_ledger_category(&mut *tx, schema, kind, category_id).await? {
        return Err(category_not_found());
    }
    tx.commit().await?;
    Ok(())
}
