use rust_decimal::Decimal;
use shared::{AppError, ErrorCode};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Invalid quantity for product {product_id}")]
    InvalidQuantity { product_id: String },

    #[error("Negative price for product {product_id}")]
    InvalidPrice { product_id: String },

    #[error("Unit {unit} not found for product {product_id}")]
    UnitNotFound { product_id: String, unit: String },

    #[error("Insufficient payment: total {total}, paid {paid}")]
    InsufficientPayment { total: Decimal, paid: Decimal },

    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    #[error("Credit sale requires a customer")]
    CustomerRequired,

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart => AppError::new(ErrorCode::EmptyCart),
            CheckoutError::InvalidQuantity { product_id } => {
                AppError::new(ErrorCode::InvalidQuantity).with_detail("product_id", product_id)
            }
            CheckoutError::InvalidPrice { product_id } => {
                AppError::new(ErrorCode::InvalidAmount).with_detail("product_id", product_id)
            }
            CheckoutError::UnitNotFound { product_id, unit } => {
                AppError::new(ErrorCode::UnitNotFound)
                    .with_detail("product_id", product_id)
                    .with_detail("unit", unit)
            }
            CheckoutError::InsufficientPayment { total, paid } => {
                AppError::new(ErrorCode::InsufficientPayment)
                    .with_detail("total", total.to_string())
                    .with_detail("paid", paid.to_string())
            }
            CheckoutError::InvalidAmount(amount) => {
                AppError::new(ErrorCode::InvalidAmount).with_detail("amount", amount.to_string())
            }
            CheckoutError::CustomerRequired => AppError::new(ErrorCode::CustomerRequired),
            CheckoutError::CustomerNotFound(id) => {
                AppError::new(ErrorCode::CustomerNotFound).with_detail("customer_id", id)
            }
            CheckoutError::Store(e) => e.into(),
        }
    }
}
