//! Unified error codes for Kasir
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Checkout errors
//! - 5xxx: Payment errors
//! - 6xxx: Product / stock errors
//! - 7xxx: Customer / debt errors
//! - 8xxx: Supplier errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    ValidationFailed = 2,
    NotFound = 3,

    // ==================== 1xxx: Auth ====================
    InvalidPin = 1008,
    PinNotConfigured = 1009,

    // ==================== 2xxx: Permission ====================
    PermissionDenied = 2001,

    // ==================== 4xxx: Checkout ====================
    EmptyCart = 4001,
    InvalidQuantity = 4002,

    // ==================== 5xxx: Payment ====================
    InsufficientPayment = 5001,
    InvalidAmount = 5002,
    CustomerRequired = 5003,

    // ==================== 6xxx: Product ====================
    ProductNotFound = 6001,
    UnitNotFound = 6002,

    // ==================== 7xxx: Customer / Debt ====================
    CustomerNotFound = 7001,
    Overpayment = 7002,

    // ==================== 8xxx: Supplier ====================
    SupplierNotFound = 8001,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
    PrintFailed = 9003,
    PrinterNotConnected = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the category derived from the code range
    pub const fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",

            ErrorCode::InvalidPin => "PIN is incorrect",
            ErrorCode::PinNotConfigured => "No PIN has been configured",

            ErrorCode::PermissionDenied => "Permission denied",

            ErrorCode::EmptyCart => "Cart is empty",
            ErrorCode::InvalidQuantity => "Quantity must be positive",

            ErrorCode::InsufficientPayment => "Amount paid is less than the total",
            ErrorCode::InvalidAmount => "Amount is invalid",
            ErrorCode::CustomerRequired => "A customer is required for credit sales",

            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::UnitNotFound => "Selling unit not found",

            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::Overpayment => "Payment exceeds outstanding debt",

            ErrorCode::SupplierNotFound => "Supplier not found",

            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::PrintFailed => "Print operation failed",
            ErrorCode::PrinterNotConnected => "Printer is not connected",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),

            1008 => Ok(ErrorCode::InvalidPin),
            1009 => Ok(ErrorCode::PinNotConfigured),

            2001 => Ok(ErrorCode::PermissionDenied),

            4001 => Ok(ErrorCode::EmptyCart),
            4002 => Ok(ErrorCode::InvalidQuantity),

            5001 => Ok(ErrorCode::InsufficientPayment),
            5002 => Ok(ErrorCode::InvalidAmount),
            5003 => Ok(ErrorCode::CustomerRequired),

            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::UnitNotFound),

            7001 => Ok(ErrorCode::CustomerNotFound),
            7002 => Ok(ErrorCode::Overpayment),

            8001 => Ok(ErrorCode::SupplierNotFound),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::PrintFailed),
            9004 => Ok(ErrorCode::PrinterNotConnected),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error category classification based on error code ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Checkout,
    Payment,
    Product,
    Customer,
    Supplier,
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub const fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            4000..5000 => Self::Checkout,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Product,
            7000..8000 => Self::Customer,
            8000..9000 => Self::Supplier,
            _ => Self::System,
        }
    }
}
