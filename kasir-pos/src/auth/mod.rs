//! Local PIN Access Module
//!
//! Owner and staff each have one numeric PIN, stored as an argon2 hash.
//! Permissions per role come from [`Role::can`].

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use shared::models::{Permission, Role};
use shared::{AppError, ErrorCode};
use thiserror::Error;
use tracing::info;

use crate::store::{Store, StoreError};
use crate::{audit_log, security_log};

const PIN_MIN_LEN: usize = 4;
const PIN_MAX_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("PIN must be 4-6 digits")]
    InvalidPinFormat,

    #[error("PIN is incorrect")]
    InvalidPin,

    #[error("No owner PIN configured")]
    NotConfigured,

    #[error("{role:?} may not {permission:?}")]
    PermissionDenied { role: Role, permission: Permission },

    #[error("Password hash error: {0}")]
    Hash(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AuthError::Hash(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidPinFormat => AppError::validation("PIN must be 4-6 digits"),
            AuthError::InvalidPin => AppError::new(ErrorCode::InvalidPin),
            AuthError::NotConfigured => AppError::new(ErrorCode::PinNotConfigured),
            AuthError::PermissionDenied { role, permission } => {
                AppError::permission_denied(format!("{:?} may not {:?}", role, permission))
                    .with_detail("role", role.key())
            }
            AuthError::Hash(msg) => AppError::internal(msg),
            AuthError::Store(e) => e.into(),
        }
    }
}

/// PIN format: 4-6 ASCII digits
pub fn validate_pin(pin: &str) -> Result<(), AuthError> {
    let len_ok = (PIN_MIN_LEN..=PIN_MAX_LEN).contains(&pin.len());
    if !len_ok || !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AuthError::InvalidPinFormat);
    }
    Ok(())
}

/// Hash a PIN using argon2
pub fn hash_pin(pin: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(pin.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a PIN against a stored argon2 hash
pub fn verify_pin(pin: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(pin.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Fail unless `role` holds `permission`
pub fn authorize(role: Role, permission: Permission) -> Result<(), AuthError> {
    if role.can(permission) {
        Ok(())
    } else {
        security_log!(
            WARN,
            "permission_denied",
            role = role.key(),
            permission = ?permission
        );
        Err(AuthError::PermissionDenied { role, permission })
    }
}

#[derive(Clone)]
pub struct PinAuth {
    store: Store,
}

impl PinAuth {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Whether an owner PIN exists
    pub fn is_configured(&self) -> Result<bool, AuthError> {
        Ok(self.store.get_pin_hash(Role::Owner)?.is_some())
    }

    /// Set or replace the PIN for `role`
    pub fn set_pin(&self, role: Role, pin: &str) -> Result<(), AuthError> {
        validate_pin(pin)?;
        let hash = hash_pin(pin)?;
        self.store.set_pin_hash(role, &hash)?;

        info!(role = role.key(), "PIN updated");
        audit_log!("owner", "set_pin", format!("role:{}", role.key()));
        Ok(())
    }

    /// Resolve a PIN to a role, checking owner before staff
    pub fn verify(&self, pin: &str) -> Result<Role, AuthError> {
        if !self.is_configured()? {
            return Err(AuthError::NotConfigured);
        }

        for role in [Role::Owner, Role::Staff] {
            if let Some(hash) = self.store.get_pin_hash(role)?
                && verify_pin(pin, &hash)?
            {
                return Ok(role);
            }
        }

        security_log!(WARN, "pin_failed", reason = "no matching role");
        Err(AuthError::InvalidPin)
    }
}
