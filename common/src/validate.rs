use crate::error::{AppError, Res};

/// Column widths of the text fields clients can set.
pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 255;
pub const DOMAIN_MAX_LEN: usize = 255;

/// Rejects `value` when it would not fit a `VARCHAR(max)` column.
pub fn max_len(field: &str, value: &str, max: usize) -> Res<()> {
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}
