use actix_web::{Responder, get, web};
use common::{
    error::{AppError, Res},
    http::Success,
};

pub mod cors;

#[get("/")]
async fn health() -> Res<impl Responder> {
    Success::message("Finance API running")
}

/// Malformed JSON bodies get the same `{ message }` envelope as every other error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {}", err)).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Not found".to_string()).into())
}

/// Registers every route. The `/api` scope needs a bearer token and a tenant
/// header; the token is checked first.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(health)
        .service(api_auth::mount_auth())
        .service(
            web::scope("/api")
                .wrap(tenancy::middleware()) // 2nd
                .wrap(api_auth::auth_middleware()) // 1st
                .service(api_auth::mount_user())
                .service(api_finance::mount_categories())
                .service(api_finance::mount_ledgers())
                .service(api_finance::mount_transactions())
                .service(api_subs::mount_subs()),
        );
}
