use actix_web::{HttpResponse, Responder};
use serde::Serialize;
use serde_json::json;

use super::error::Res;

pub struct Success;
impl Success {
    pub fn created<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Created().json(body))
    }
    pub fn ok<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Ok().json(body))
    }
    /// `200 { "message": ... }`, used by endpoints with nothing else to return.
    pub fn message(message: &str) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Ok().json(json!({ "message": message })))
    }
}
