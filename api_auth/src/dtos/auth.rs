use common::{
    error::{AppError, Res},
    validate::{self, DOMAIN_MAX_LEN, EMAIL_MAX_LEN, NAME_MAX_LEN},
};
use db::models::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Tenant (household or company) name; also used as the admin's first name
    /// when `firstName` is not given.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub domain: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body returned by both register and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: AuthUser,
    pub tenant_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        AuthUser {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RegisterRequest {
    /// Trims and lowercases what needs it, and rejects incomplete input.
    pub fn validated(self) -> Res<RegisterRequest> {
        let name = self.name.trim().to_string();
        let email = normalize_email(&self.email);
        if name.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err(AppError::BadRequest(
                "Name, email and password are required".to_string(),
            ));
        }
        validate::max_len("Email", &email, EMAIL_MAX_LEN)?;
        if !is_plausible_email(&email) {
            return Err(AppError::BadRequest("Invalid email address".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let first_name = non_blank(self.first_name).or_else(|| Some(name.clone()));
        let last_name = non_blank(self.last_name);
        let domain = non_blank(self.domain);
        validate::max_len("Name", &name, NAME_MAX_LEN)?;
        for (field, value) in [("First name", &first_name), ("Last name", &last_name)] {
            if let Some(value) = value {
                validate::max_len(field, value, NAME_MAX_LEN)?;
            }
        }
        if let Some(domain) = &domain {
            validate::max_len("Domain", domain, DOMAIN_MAX_LEN)?;
        }

        Ok(RegisterRequest {
            name,
            email,
            password: self.password,
            domain,
            first_name,
            last_name,
        })
    }
}

impl LoginRequest {
    pub fn validated(self) -> Res<LoginRequest> {
        let email = normalize_email(&self.email);
        if email.is_empty() || self.password.is_empty() {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }
        Ok(LoginRequest {
            email,
            password: self.password,
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}
