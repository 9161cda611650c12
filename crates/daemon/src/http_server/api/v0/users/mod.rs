use axum::routing::{get, post};
use axum::Router;

use crate::ServiceState;

pub mod create;
pub mod delete_user;
pub mod get_user;
pub mod list;

// Re-export for convenience
pub use create::CreateUserRequest;
pub use delete_user::DeleteUserRequest;
pub use get_user::GetUserRequest;
pub use list::ListUsersRequest;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", post(create::handler).get(list::handler))
        .route("/:user", get(get_user::handler).delete(delete_user::handler))
        .with_state(state)
}
