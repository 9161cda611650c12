use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::PrincipalId;

use crate::http_server::api::client::{api_url, ApiError, ApiRequest};
use crate::http_server::api::{Caller, HandlerError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct DeleteUserRequest {
    /// User ID
    #[arg(long)]
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub id: PrincipalId,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(ctx): Caller,
    Path(user): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = PrincipalId::from(user);
    state.users().delete(&ctx, &id).await?;
    Ok(Json(DeleteUserResponse { id }))
}

impl ApiRequest for DeleteUserRequest {
    type Response = DeleteUserResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = api_url(base_url, &["users", &self.id])?;
        Ok(client.delete(full_url))
    }
}
