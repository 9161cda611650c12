use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{FileView, ResourceId};

use crate::http_server::api::client::{api_url, ApiError, ApiRequest};
use crate::http_server::api::{Caller, HandlerError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct GetFileRequest {
    /// File ID
    #[arg(long)]
    pub file: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(ctx): Caller,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let file = state.files().get(&ctx, &ResourceId::from(file)).await?;
    Ok(Json(file))
}

impl ApiRequest for GetFileRequest {
    type Response = FileView;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = api_url(base_url, &["files", &self.file])?;
        Ok(client.get(full_url))
    }
}
