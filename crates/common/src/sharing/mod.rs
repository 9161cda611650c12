//! The sharing engine.
//!
//! [`FileService`] enforces the owner/editor/viewer hierarchy on every file
//! operation and [`UserService`] manages the principals files are shared
//! with. Both are thin over the store traits and keep no state of their own.

mod error;
mod files;
mod resolver;
mod users;

pub use error::SharingError;
pub use files::{DeleteSummary, FileService, FileUser, FileView, NewFile};
pub use resolver::{Access, RoleResolver};
pub use users::{NewUser, User, UserService};
