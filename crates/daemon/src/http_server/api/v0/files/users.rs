use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{Cursor, FileUser, PageRequest, ResourceId};

use crate::http_server::api::client::{api_url, ApiError, ApiRequest};
use crate::http_server::api::{Caller, HandlerError};
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Args)]
pub struct FileUsersRequest {
    /// File ID
    #[arg(long)]
    #[serde(skip)]
    pub file: String,

    /// Maximum number of users to return
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination_limit: Option<u32>,

    /// Token from a previous page to continue from
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUsersResponse {
    pub users: Vec<FileUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination_token: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(ctx): Caller,
    Path(file): Path<String>,
    Query(req): Query<FileUsersRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let page = PageRequest::from_parts(req.pagination_limit, req.pagination_token);
    let users = state
        .files()
        .list_users(&ctx, &ResourceId::from(file), &page)
        .await?;

    Ok(Json(FileUsersResponse {
        users: users.entries,
        pagination_token: users.next.map(Cursor::into_inner),
    }))
}

impl ApiRequest for FileUsersRequest {
    type Response = FileUsersResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = api_url(base_url, &["files", &self.file, "users"])?;
        Ok(client.get(full_url).query(&self))
    }
}
