use axum::extract::{Json, Query, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{Cursor, PageRequest, User};

use crate::http_server::api::client::{api_url, ApiError, ApiRequest};
use crate::http_server::api::{Caller, HandlerError};
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Args)]
pub struct ListUsersRequest {
    /// Only list users in this segment (users without a segment otherwise)
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,

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
pub struct ListUsersResponse {
    pub users: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination_token: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(ctx): Caller,
    Query(req): Query<ListUsersRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let page = PageRequest::from_parts(req.pagination_limit, req.pagination_token);
    let segment = req.segment.as_deref().filter(|s| !s.is_empty());
    let users = state.users().list(&ctx, segment, &page).await?;

    Ok(Json(ListUsersResponse {
        users: users.entries,
        pagination_token: users.next.map(Cursor::into_inner),
    }))
}

impl ApiRequest for ListUsersRequest {
    type Response = ListUsersResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = api_url(base_url, &["users"])?;
        Ok(client.get(full_url).query(&self))
    }
}
