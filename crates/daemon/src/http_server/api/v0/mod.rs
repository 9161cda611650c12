use axum::Router;

pub mod files;
pub mod users;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/files", files::router(state.clone()))
        .nest("/users", users::router(state.clone()))
        .with_state(state)
}
