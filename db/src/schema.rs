use std::fmt;

use common::error::{AppError, Res};

/// Every tenant schema starts with this namespace token.
pub const SCHEMA_PREFIX: &str = "tenant_";

/// PostgreSQL silently truncates identifiers past this many bytes.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// A validated tenant schema identifier.
///
/// This is the only value ever interpolated into SQL text. It can only be built
/// through [`SchemaName::derive`] or [`SchemaName::parse`], so its contents are
/// always `tenant_` followed by `[a-z0-9_]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaName(String);

impl SchemaName {
    /// Derives the schema name for a tenant: lowercase, every character outside
    /// `[a-z0-9]` becomes `_`, and the result is prefixed with [`SCHEMA_PREFIX`].
    ///
    /// Deterministic and unsalted, so two names that differ only in punctuation or
    /// case derive the same schema. Registration checks the catalog for that.
    pub fn derive(source: &str) -> Self {
        let body: String = source
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        SchemaName(format!("{}{}", SCHEMA_PREFIX, body))
    }

    /// Re-validates an identifier read back from the catalog.
    pub fn parse(raw: &str) -> Res<Self> {
        if Self::is_valid(raw) {
            Ok(SchemaName(raw.to_string()))
        } else {
            Err(AppError::Internal(format!(
                "Catalog holds an invalid schema name: {:?}",
                raw
            )))
        }
    }

    pub fn is_valid(raw: &str) -> bool {
        raw.len() <= MAX_IDENTIFIER_LEN
            && raw
                .strip_prefix(SCHEMA_PREFIX)
                .map(|body| {
                    body.chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
                })
                .unwrap_or(false)
    }

    /// Whether the identifier fits PostgreSQL's limit without truncation.
    pub fn fits(&self) -> bool {
        self.0.len() <= MAX_IDENTIFIER_LEN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }

    /// Schema-qualified table reference, e.g. `"tenant_acme".transactions`.
    pub fn table(&self, table: &str) -> String {
        format!("{}.{}", self.quoted(), table)
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
