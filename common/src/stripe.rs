use stripe::{Client, CreateCustomer, Customer, PaymentMethodId};

use crate::error::{AppError, Res};

pub fn create_client(secret_key: &str) -> Client {
    Client::new(secret_key)
}

/// Creates a billing customer for a tenant and attaches the given payment method.
pub async fn create_customer(
    client: &Client,
    email: &str,
    name: &str,
    payment_method_id: &str,
) -> Res<Customer> {
    let payment_method = payment_method_id
        .parse::<PaymentMethodId>()
        .map_err(|e| AppError::BadRequest(format!("Invalid payment method: {}", e)))?;

    let params = CreateCustomer {
        email: Some(email),
        name: Some(name),
        payment_method: Some(payment_method),
        ..Default::default()
    };

    Customer::create(client, params)
        .await
        .map_err(AppError::from)
}
