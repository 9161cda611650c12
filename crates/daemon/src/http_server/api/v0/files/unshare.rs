use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{PrincipalId, ResourceId};

use crate::http_server::api::client::{api_url, ApiError, ApiRequest};
use crate::http_server::api::{Caller, HandlerError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct UnshareRequest {
    /// File ID
    #[arg(long)]
    pub file: String,

    /// User whose access is removed
    #[arg(long)]
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnshareResponse {
    pub file: ResourceId,
    pub id: PrincipalId,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(ctx): Caller,
    Path((file, user)): Path<(String, String)>,
) -> Result<impl IntoResponse, HandlerError> {
    let file = ResourceId::from(file);
    let user = PrincipalId::from(user);

    state.files().unshare(&ctx, &file, &user).await?;

    Ok(Json(UnshareResponse { file, id: user }))
}

impl ApiRequest for UnshareRequest {
    type Response = UnshareResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = api_url(base_url, &["files", &self.file, "users", &self.id])?;
        Ok(client.delete(full_url))
    }
}
