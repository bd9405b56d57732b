use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

use super::category::CategoryKind;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Transaction {
    pub id: i32,
    /// Signed: income positive, expense negative.
    #[serde(serialize_with = "two_places")]
    pub amount: BigDecimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub category_id: i32,
    pub category_type: CategoryKind,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A transaction joined with the name of its ledger category.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransactionWithCategory {
    #[sqlx(flatten)]
    pub transaction: Transaction,
    pub category_name: Option<String>,
}

/// Money always goes out with two decimals, e.g. `"-50.00"`.
fn two_places<S: Serializer>(amount: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&amount.with_scale(2).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn transaction(amount: &str) -> Transaction {
        let now = chrono::Utc::now().naive_utc();
        Transaction {
            id: 1,
            amount: BigDecimal::from_str(amount).unwrap(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category_id: 17,
            category_type: CategoryKind::Expense,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn amount_serializes_with_two_decimals() {
        for (stored, shown) in [("-50", "-50.00"), ("12.3", "12.30"), ("-5e1", "-50.00"), ("0.07", "0.07")] {
            let json = serde_json::to_value(transaction(stored)).unwrap();
            assert_eq!(json["amount"], shown);
        }
    }
}
