//! User handlers.
//!
//! ## Commands
//! - Registering after identity-provider sign-up
//! - Changing a user's role (admin)
//! - Deleting a user (admin)
//!
//! ## Queries
//! - Current user, all users (admin)

mod change_user_role;
mod delete_user;
mod queries;
mod register_user;

pub use change_user_role::{ChangeUserRoleCommand, ChangeUserRoleHandler};
pub use delete_user::{DeleteUserCommand, DeleteUserHandler};
pub use queries::UserQueryHandler;
pub use register_user::{RegisterUserCommand, RegisterUserHandler};
