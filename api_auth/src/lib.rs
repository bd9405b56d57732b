use actix_web::web;
use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod auth;
}
pub mod routes {
    pub mod auth;
    pub mod user;
}
mod services {
    pub(crate) mod auth;
    pub(crate) mod user;
}
mod dtos {
    pub(crate) mod auth;
    pub(crate) mod user;
}

/// Requires a valid bearer token on every route it wraps.
pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}

pub fn mount_auth() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::post_register)
        .service(routes::auth::post_login)
}

pub fn mount_user() -> actix_web::Scope {
    web::scope("/users")
        .service(routes::user::get_me)
        .service(routes::user::put_me)
        .service(routes::user::put_password)
}
