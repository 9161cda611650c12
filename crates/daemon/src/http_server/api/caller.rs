use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::request::Parts;

use common::prelude::RequestContext;

use super::USER_ID_HEADER;
use crate::ServiceState;

/// The authenticated caller of a request, taken from the `user-id` header.
///
/// Requests without the header, or with an empty one, are rejected with 401
/// before any handler runs.
#[derive(Debug, Clone)]
pub struct Caller(pub RequestContext);

#[async_trait]
impl FromRequestParts<ServiceState> for Caller {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match user {
            Some(user) => Ok(Caller(state.request_context(user))),
            None => {
                tracing::debug!(path = %parts.uri.path(), "rejecting request without caller");
                let msg = serde_json::json!({"msg": "missing user-id header"});
                Err((StatusCode::UNAUTHORIZED, Json(msg)).into_response())
            }
        }
    }
}
