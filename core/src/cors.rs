use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};
use common::TENANT_HEADER;

pub fn middleware(origin: &str) -> Cors {
    Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(TENANT_HEADER),
        ])
        .allowed_origin(origin)
        .max_age(3600)
}
