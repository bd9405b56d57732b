use actix_web::web;

pub mod routes {
    pub mod category;
    pub mod ledger;
    pub mod transaction;
}
mod services {
    pub(crate) mod category;
    pub(crate) mod ledger;
    pub(crate) mod transaction;
}
mod dtos {
    pub(crate) mod category;
    pub(crate) mod transaction;
}

pub fn mount_categories() -> actix_web::Scope {
    web::scope("/categories")
        .service(routes::category::get_categories)
        .service(routes::category::post_category)
        .service(routes::category::put_category)
        .service(routes::category::delete_category)
}

/// Income and expense ledgers under `/categorias/ingresos` and `/categorias/egresos`.
pub fn mount_ledgers() -> actix_web::Scope {
    web::scope("/categorias")
        .service(routes::ledger::get_ledger)
        .service(routes::ledger::post_ledger)
        .service(routes::ledger::put_ledger)
        .service(routes::ledger::delete_ledger)
}

pub fn mount_transactions() -> actix_web::Scope {
    web::scope("/transactions")
        .service(routes::transaction::get_transactions)
        .service(routes::transaction::post_transaction)
        .service(routes::transaction::put_transaction)
        .service(routes::transaction::delete_transaction)
}
