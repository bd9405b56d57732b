use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Whether a category (and the transactions booked against it) is money in or out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
        }
    }

    /// Per-tenant table holding the ledger categories of this kind.
    pub fn ledger_table(&self) -> &'static str {
        match self {
            CategoryKind::Income => "categorias_ingresos",
            CategoryKind::Expense => "categorias_egresos",
        }
    }

    /// Display color used for transactions of this kind.
    pub fn color(&self) -> &'static str {
        match self {
            CategoryKind::Income => "#4CAF50",
            CategoryKind::Expense => "#F44336",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            other => Err(format!("Unknown category type: {}", other)),
        }
    }
}

/// Row of the tenant's `categories` table.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    pub color: String,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Row of `categorias_ingresos` or `categorias_egresos`.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct LedgerCategory {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_text() {
        for kind in [CategoryKind::Income, CategoryKind::Expense] {
            assert_eq!(kind.as_str().parse::<CategoryKind>().unwrap(), kind);
        }
        assert!("Income".parse::<CategoryKind>().is_err());
    }

    #[test]
    fn kind_selects_its_ledger_table() {
        assert_eq!(CategoryKind::Income.ledger_table(), "categorias_ingresos");
        assert_eq!(CategoryKind::Expense.ledger_table(), "categorias_egresos");
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&CategoryKind::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
    }
}
