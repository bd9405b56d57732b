use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::models::category::CategoryKind;

/// Row values for insert and update. `amount` must already carry its canonical sign.
#[derive(Debug)]
pub struct TransactionWriteRequest {
    pub amount: BigDecimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub category_id: i32,
    pub category_type: CategoryKind,
}
