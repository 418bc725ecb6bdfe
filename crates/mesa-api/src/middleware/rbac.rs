//! Role checks for management routes.

use mesa_core::error::AppError;

use crate::extractors::AuthIdentity;

/// Checks that the caller is the owner.
pub fn require_owner(auth: &AuthIdentity) -> Result<(), AppError> {
    if !auth.role.is_owner() {
        return Err(AppError::authorization("Owner access required"));
    }
    Ok(())
}

/// Checks that the caller is staff (owner or employee).
pub fn require_staff(auth: &AuthIdentity) -> Result<(), AppError> {
    if !auth.role.is_staff() {
        return Err(AppError::authorization("Staff access required"));
    }
    Ok(())
}
