use actix_web::web::{self};

pub mod routes {
    pub mod sub;
}

mod services {
    pub(crate) mod sub;
}

mod dtos {
    pub(crate) mod sub;
}

pub fn mount_subs() -> actix_web::Scope {
    web::scope("/subscriptions")
        .service(routes::sub::get_status)
        .service(routes::sub::post_cancel)
        .service(routes::sub::post_subscribe)
}
