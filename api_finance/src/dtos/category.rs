use common::{
    error::{AppError, Res},
    validate::{self, NAME_MAX_LEN},
};
use db::{
    dtos::category::{CategoryCreateRequest, CategoryUpdateRequest, LedgerCategoryRequest},
    models::category::{Category, CategoryKind},
};
use serde::Deserialize;

pub const DEFAULT_COLOR: &str = "#FFD700";

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<CategoryKind>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LedgerRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

fn required_name(name: Option<String>) -> Res<String> {
    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("Name is required".to_string()))?;
    validate::max_len("Name", &name, NAME_MAX_LEN)?;
    Ok(name)
}

fn checked_color(color: String) -> Res<String> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(color.to_uppercase())
    } else {
        Err(AppError::BadRequest(
            "Color must be a hex value like #A1B2C3".to_string(),
        ))
    }
}

impl CategoryRequest {
    pub fn into_create(self) -> Res<CategoryCreateRequest> {
        let name = required_name(self.name)?;
        let kind = self
            .kind
            .ok_or_else(|| AppError::BadRequest("Type must be income or expense".to_string()))?;
        let color = checked_color(self.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()))?;
        Ok(CategoryCreateRequest {
            name,
            kind,
            color,
            is_default: false,
        })
    }

    /// Fields left out keep their current value.
    pub fn into_update(self, current: &Category) -> Res<CategoryUpdateRequest> {
        let name = match self.name {
            Some(name) => required_name(Some(name))?,
            None => current.name.clone(),
        };
        let color = match self.color {
            Some(color) => checked_color(color)?,
            None => current.color.clone(),
        };
        Ok(CategoryUpdateRequest {
            name,
            kind: self.kind.unwrap_or(current.kind),
            color,
        })
    }
}

impl LedgerRequest {
    pub fn validated(self) -> Res<LedgerCategoryRequest> {
        Ok(LedgerCategoryRequest {
            name: required_name(self.name)?,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        })
    }
}

/// Maps the `/categorias/{ledger}` path segment to its kind.
pub fn ledger_kind(segment: &str) -> Res<CategoryKind> {
    match segment {
        "ingresos" => Ok(CategoryKind::Income),
        "egresos" => Ok(CategoryKind::Expense),
        _ => Err(AppError::NotFound("Ledger not found".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn existing() -> Category {
        let now = Utc::now().naive_utc();
        Category {
            id: 9,
            name: "Gym".to_string(),
            kind: CategoryKind::Expense,
            color: "#123456".to_string(),
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn create_defaults_the_color_and_is_never_default() {
        let req: CategoryRequest =
            serde_json::from_str(r#"{"name":" Viajes ","type":"expense"}"#).unwrap();
        let create = req.into_create().unwrap();
        assert_eq!(create.name, "Viajes");
        assert_eq!(create.kind, CategoryKind::Expense);
        assert_eq!(create.color, DEFAULT_COLOR);
        assert!(!create.is_default);
    }

    #[test]
    fn create_requires_name_and_type() {
        let req: CategoryRequest = serde_json::from_str(r#"{"type":"income"}"#).unwrap();
        assert!(req.into_create().is_err());
        let req: CategoryRequest = serde_json::from_str(r#"{"name":"Bonus"}"#).unwrap();
        assert!(req.into_create().is_err());
        assert!(serde_json::from_str::<CategoryRequest>(r#"{"name":"x","type":"other"}"#).is_err());
    }

    #[test]
    fn colors_must_be_hex() {
        assert_eq!(checked_color("#a1b2c3".to_string()).unwrap(), "#A1B2C3");
        assert!(checked_color("red".to_string()).is_err());
        assert!(checked_color("#12345G".to_string()).is_err());
        assert!(checked_color("#1234567".to_string()).is_err());
    }

    #[test]
    fn update_keeps_omitted_fields() {
        let req: CategoryRequest = serde_json::from_str(r#"{"name":"Gimnasio"}"#).unwrap();
        let update = req.into_update(&existing()).unwrap();
        assert_eq!(update.name, "Gimnasio");
        assert_eq!(update.kind, CategoryKind::Expense);
        assert_eq!(update.color, "#123456");
    }

    #[test]
    fn ledger_segments_map_to_kinds() {
        assert_eq!(ledger_kind("ingresos").unwrap(), CategoryKind::Income);
        assert_eq!(ledger_kind("egresos").unwrap(), CategoryKind::Expense);
        assert!(matches!(ledger_kind("otros"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn overlong_names_are_a_validation_error() {
        let long = "x".repeat(NAME_MAX_LEN + 1);
        let req = CategoryRequest {
            name: Some(long.clone()),
            kind: Some(CategoryKind::Income),
            color: None,
        };
        assert!(matches!(req.into_create(), Err(AppError::BadRequest(_))));

        let req = CategoryRequest {
            name: Some(long.clone()),
            kind: None,
            color: None,
        };
        assert!(matches!(req.into_update(&existing()), Err(AppError::BadRequest(_))));

        let req = LedgerRequest {
            name: Some(long),
            description: None,
        };
        assert!(matches!(req.validated(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn ledger_request_drops_blank_description() {
        let req = LedgerRequest {
            name: Some("Bonos".to_string()),
            description: Some("  ".to_string()),
        };
        let data = req.validated().unwrap();
        assert_eq!(data.name, "Bonos");
        assert!(data.description.is_none());
    }
}
