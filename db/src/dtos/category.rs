use crate::models::category::CategoryKind;

#[derive(Debug)]
pub struct CategoryCreateRequest {
    pub name: String,
    pub kind: CategoryKind,
    pub color: String,
    pub is_default: bool,
}

#[derive(Debug)]
pub struct CategoryUpdateRequest {
    pub name: String,
    pub kind: CategoryKind,
    pub color: String,
}

#[derive(Debug)]
pub struct LedgerCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}
