use axum::routing::{delete, get, post};
use axum::Router;

use crate::ServiceState;

pub mod create;
pub mod delete_file;
pub mod get_file;
pub mod list;
pub mod share;
pub mod unshare;
pub mod users;

// Re-export for convenience
pub use create::CreateFileRequest;
pub use delete_file::DeleteFileRequest;
pub use get_file::GetFileRequest;
pub use list::ListFilesRequest;
pub use share::ShareRequest;
pub use unshare::UnshareRequest;
pub use users::FileUsersRequest;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", post(create::handler).get(list::handler))
        .route("/:file", get(get_file::handler).delete(delete_file::handler))
        .route("/:file/users", get(users::handler).post(share::handler))
        .route("/:file/users/:user", delete(unshare::handler))
        .with_state(state)
}
