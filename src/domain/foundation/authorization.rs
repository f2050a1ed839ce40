//! Role-based authorization.
//!
//! Role checks are coarse capability gates applied before any resource is
//! loaded. Ownership checks are separate (see `ownership`) and always run
//! inside the operation, after the resource has been read.

use super::{AuthenticatedUser, DomainError, Role};

/// Fails with `Forbidden` unless the caller's role is in `allowed`.
pub fn require_role(user: &AuthenticatedUser, allowed: &[Role]) -> Result<(), DomainError> {
    if allowed.contains(&user.role) {
        return Ok(());
    }

    tracing::warn!(
        user_email = %user.email,
        role = %user.role,
        "Role not permitted for operation"
    );

    let allowed_list = allowed
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    Err(DomainError::forbidden("Access denied. Insufficient permissions.")
        .with_detail("required_roles", allowed_list)
        .with_detail("role", user.role.as_str()))
}
