use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{FileUser, PrincipalId, ResourceId, Role};

use crate::http_server::api::client::{api_url, ApiError, ApiRequest};
use crate::http_server::api::{Caller, HandlerError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct ShareRequest {
    /// File ID
    #[arg(long)]
    #[serde(skip)]
    pub file: String,

    /// User to share the file with
    #[arg(long)]
    pub id: String,

    /// Role to grant (owner, editor, viewer)
    #[arg(long)]
    pub role: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(ctx): Caller,
    Path(file): Path<String>,
    Json(req): Json<ShareRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let role: Role = req
        .role
        .parse()
        .map_err(|e| HandlerError::InvalidRequest(format!("{}", e)))?;
    let target = PrincipalId::from(req.id);

    state
        .files()
        .share(&ctx, &ResourceId::from(file), &target, role)
        .await?;

    Ok(Json(FileUser { id: target, role }))
}

impl ApiRequest for ShareRequest {
    type Response = FileUser;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = api_url(base_url, &["files", &self.file, "users"])?;
        Ok(client.post(full_url).json(&self))
    }
}
