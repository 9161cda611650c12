use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::ResourceId;

use crate::http_server::api::client::{api_url, ApiError, ApiRequest};
use crate::http_server::api::{Caller, HandlerError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct DeleteFileRequest {
    /// File ID
    #[arg(long)]
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFileResponse {
    pub id: ResourceId,
    /// Number of grants revoked
    pub revoked: usize,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(ctx): Caller,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ResourceId::from(file);
    let summary = state.files().delete(&ctx, &id).await?;

    Ok(Json(DeleteFileResponse {
        id,
        revoked: summary.revoked,
    }))
}

impl ApiRequest for DeleteFileRequest {
    type Response = DeleteFileResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = api_url(base_url, &["files", &self.file])?;
        Ok(client.delete(full_url))
    }
}
