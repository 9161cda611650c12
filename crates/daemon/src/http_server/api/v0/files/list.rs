use axum::extract::{Json, Query, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{Cursor, FileView, PageRequest};

use crate::http_server::api::client::{api_url, ApiError, ApiRequest};
use crate::http_server::api::{Caller, HandlerError};
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Args)]
pub struct ListFilesRequest {
    /// Maximum number of files to return
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination_limit: Option<u32>,

    /// Token from a previous page to continue from
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFilesResponse {
    pub files: Vec<FileView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination_token: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(ctx): Caller,
    Query(req): Query<ListFilesRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let page = PageRequest::from_parts(req.pagination_limit, req.pagination_token);
    let files = state.files().list(&ctx, &page).await?;

    Ok(Json(ListFilesResponse {
        files: files.entries,
        pagination_token: files.next.map(Cursor::into_inner),
    }))
}

impl ApiRequest for ListFilesRequest {
    type Response = ListFilesResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = api_url(base_url, &["files"])?;
        Ok(client.get(full_url).query(&self))
    }
}
