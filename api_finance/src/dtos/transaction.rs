use bigdecimal::{BigDecimal, RoundingMode, Zero};
use chrono::NaiveDate;
use common::error::{AppError, Res};
use db::{
    dtos::transaction::TransactionWriteRequest,
    models::{
        category::CategoryKind,
        transaction::{Transaction, TransactionWithCategory},
    },
};
use serde::{Deserialize, Serialize};

/// Shown when a transaction points at a category that no longer exists.
pub const UNKNOWN_CATEGORY: &str = "Desconocido";

/// Integer digits a `NUMERIC(12, 2)` column holds.
const AMOUNT_INTEGER_DIGITS: i64 = 10;

/// Decimal places accepted before rounding.
const AMOUNT_MAX_SCALE: i64 = 32;

#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub amount: Option<BigDecimal>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<i32>,
    #[serde(rename = "type", alias = "category_type")]
    pub kind: Option<CategoryKind>,
}

impl TransactionRequest {
    pub fn validated(self) -> Res<TransactionWriteRequest> {
        let (Some(amount), Some(date), Some(category_id), Some(kind)) =
            (self.amount, self.date, self.category_id, self.kind)
        else {
            return Err(AppError::BadRequest(
                "Amount, date, category and type are required".to_string(),
            ));
        };

        Ok(TransactionWriteRequest {
            amount: signed_amount(amount, kind)?,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            date,
            category_id,
            category_type: kind,
        })
    }
}

/// Income is stored positive and expense negative, whatever sign the client sent.
/// The magnitude is bounded from the digit count and scale before any arithmetic.
pub fn signed_amount(amount: BigDecimal, kind: CategoryKind) -> Res<BigDecimal> {
    let out_of_range = || AppError::BadRequest("Amount is out of range".to_string());
    let zero = || AppError::BadRequest("Amount must not be zero".to_string());

    if amount.is_zero() {
        return Err(zero());
    }
    let (_, scale) = amount.as_bigint_and_exponent();
    // |amount| lies in [10^(n-1), 10^n) for n integer digits.
    let integer_digits = amount.digits() as i64 - scale;
    if integer_digits > AMOUNT_INTEGER_DIGITS {
        return Err(out_of_range());
    }
    if integer_digits < -2 {
        return Err(zero());
    }
    if scale > AMOUNT_MAX_SCALE {
        return Err(out_of_range());
    }

    let magnitude = amount.abs().with_scale_round(2, RoundingMode::HalfEven);
    if magnitude.is_zero() {
        return Err(zero());
    }
    if magnitude.digits() as i64 - 2 > AMOUNT_INTEGER_DIGITS {
        return Err(out_of_range());
    }
    Ok(match kind {
        CategoryKind::Income => magnitude,
        CategoryKind::Expense => -magnitude,
    })
}

/// Listing row: the transaction plus how to display its category.
#[derive(Debug, Serialize)]
pub struct TransactionView {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category_name: String,
    pub category_color: &'static str,
}

impl From<TransactionWithCategory> for TransactionView {
    fn from(row: TransactionWithCategory) -> Self {
        let category_color = row.transaction.category_type.color();
        TransactionView {
            transaction: row.transaction,
            category_name: row
                .category_name
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
            category_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        str::FromStr,
        time::{Duration, Instant},
    };

    fn dec(raw: &str) -> BigDecimal {
        BigDecimal::from_str(raw).unwrap()
    }

    #[test]
    fn expenses_are_negative_and_income_positive() {
        assert_eq!(signed_amount(dec("50"), CategoryKind::Expense).unwrap(), dec("-50"));
        assert_eq!(signed_amount(dec("-50"), CategoryKind::Expense).unwrap(), dec("-50"));
        assert_eq!(signed_amount(dec("-20.5"), CategoryKind::Income).unwrap(), dec("20.5"));
        assert_eq!(signed_amount(dec("1.004"), CategoryKind::Income).unwrap(), dec("1"));
    }

    #[test]
    fn zero_and_oversized_amounts_are_rejected() {
        assert!(signed_amount(dec("0.00"), CategoryKind::Income).is_err());
        assert!(signed_amount(dec("10000000000"), CategoryKind::Expense).is_err());
        assert!(signed_amount(dec("9999999999.995"), CategoryKind::Expense).is_err());
        assert!(signed_amount(dec("9999999999.99"), CategoryKind::Expense).is_ok());
    }

    #[test]
    fn amounts_that_round_to_zero_are_rejected() {
        for raw in ["0.004", "-0.004", "1e-100000"] {
            let err = signed_amount(dec(raw), CategoryKind::Income).unwrap_err();
            assert_eq!(err.to_string(), "Amount must not be zero");
        }
        assert_eq!(signed_amount(dec("0.006"), CategoryKind::Income).unwrap(), dec("0.01"));
    }

    #[test]
    fn huge_exponents_are_rejected_without_expanding_them() {
        let started = Instant::now();
        for raw in ["1e100000000", "-1e100000000", "1e11"] {
            let err = signed_amount(dec(raw), CategoryKind::Expense).unwrap_err();
            assert_eq!(err.to_string(), "Amount is out of range");
        }
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn amounts_keep_two_decimal_places() {
        let amount = signed_amount(dec("50"), CategoryKind::Expense).unwrap();
        assert_eq!(amount.to_string(), "-50.00");
        let amount = signed_amount(dec("5e1"), CategoryKind::Income).unwrap();
        assert_eq!(amount.to_string(), "50.00");
    }

    #[test]
    fn request_accepts_numbers_and_type_alias() {
        let req: TransactionRequest = serde_json::from_str(
            r#"{"amount":50,"date":"2024-01-01","category_id":3,"type":"expense"}"#,
        )
        .unwrap();
        let data = req.validated().unwrap();
        assert_eq!(data.amount, dec("-50"));
        assert_eq!(data.category_type, CategoryKind::Expense);
        assert_eq!(data.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let req: TransactionRequest = serde_json::from_str(
            r#"{"amount":"12.30","date":"2024-02-01","category_id":1,"category_type":"income"}"#,
        )
        .unwrap();
        assert_eq!(req.validated().unwrap().amount, dec("12.3"));
    }

    #[test]
    fn missing_fields_are_a_validation_error() {
        let req: TransactionRequest =
            serde_json::from_str(r#"{"amount":50,"date":"2024-01-01"}"#).unwrap();
        let err = req.validated().unwrap_err();
        assert_eq!(err.to_string(), "Amount, date, category and type are required");
    }
}
