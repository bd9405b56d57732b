use chrono::NaiveDateTime;
use common::{
    error::Res,
    validate::{self, NAME_MAX_LEN},
};
use db::{dtos::user::UserProfileUpdate, models::user::User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ProfileUpdateRequest {
    pub fn validated(self) -> Res<UserProfileUpdate> {
        let first_name = self.first_name.map(|v| v.trim().to_string());
        let last_name = self.last_name.map(|v| v.trim().to_string());
        if let Some(first_name) = &first_name {
            validate::max_len("First name", first_name, NAME_MAX_LEN)?;
        }
        if let Some(last_name) = &last_name {
            validate::max_len("Last name", last_name, NAME_MAX_LEN)?;
        }
        Ok(UserProfileUpdate {
            first_name,
            last_name,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::AppError;

    #[test]
    fn profile_update_trims_and_bounds_names() {
        let req: ProfileUpdateRequest =
            serde_json::from_str(r#"{"firstName":"  Ana "}"#).unwrap();
        let update = req.validated().unwrap();
        assert_eq!(update.first_name.as_deref(), Some("Ana"));
        assert!(update.last_name.is_none());

        let req = ProfileUpdateRequest {
            first_name: Some("f".repeat(150)),
            last_name: None,
        };
        assert!(matches!(req.validated(), Err(AppError::BadRequest(_))));
    }
}
