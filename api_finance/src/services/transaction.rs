use common::error::{AppError, Res};
use db::{
    models::{category::CategoryKind, transaction::Transaction},
    schema::SchemaName,
    scope::TenantScope,
};
use sqlx::PgConnection;

use crate::dtos::transaction::{TransactionRequest, TransactionView};

fn transaction_not_found() -> AppError {
    AppError::NotFound("Transaction not found".to_string())
}

/// The category must live in the ledger matching the transaction type.
async fn ensure_category(
    conn: &mut PgConnection,
    schema: &SchemaName,
    kind: CategoryKind,
    category_id: i32,
) -> Res<()> {
    match db::ledger::get_ledger_category(conn, schema, kind, category_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!(
            "Category {} not found among {} categories",
            category_id, kind
        ))),
    }
}

pub async fn list_transactions(scope: &mut TenantScope) -> Res<Vec<TransactionView>> {
    let (conn, schema) = scope.split();
    let rows = db::transaction::list_transactions(conn, schema).await?;
    Ok(rows.into_iter().map(TransactionView::from).collect())
}

pub async fn create_transaction(
    scope: &mut TenantScope,
    req: TransactionRequest,
) -> Res<Transaction> {
    let data = req.validated()?;

    let (mut tx, schema) = scope.begin().await?;
    ensure_category(&mut tx, schema, data.category_type, data.category_id).await?;
    let created = db::transaction::insert_transaction(&mut *tx, schema, data).await?;
    tx.commit().await?;
    Ok(created)
}

pub async fn update_transaction(
    scope: &mut TenantScope,
    transaction_id: i32,
    req: TransactionRequest,
) -> Res<Transaction> {
    let data = req.validated()?;

    let (mut tx, schema) = scope.begin().await?;
    if db::transaction::get_transaction(&mut *tx, schema, transaction_id)
        .await?
        .is_none()
    {
        return Err(transaction_not_found());
    }
    ensure_category(&mut tx, schema, data.category_type, data.category_id).await?;
    let updated = db::transaction::update_transaction(&mut *tx, schema, transaction_id, data)
        .await?
        .ok_or_else(transaction_not_found)?;
    tx.commit().await?;
    Ok(updated)
}

/// Deleting an id that is already gone is a 404 every time.
pub async fn delete_transaction(scope: &mut TenantScope, transaction_id: i32) -> Res<()> {
    let (conn, schema) = scope.split();
    if !db::transaction::delete_transaction(conn, schema, transaction_id).await? {
        return Err(transaction_not_found());
    }
    log::debug!("Deleted transaction {} from {}", transaction_id, schema);
    Ok(())
}
