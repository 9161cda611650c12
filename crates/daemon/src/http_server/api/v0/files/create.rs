use axum::extract::{Json, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{FileView, NewFile};

use crate::http_server::api::client::{api_url, ApiError, ApiRequest};
use crate::http_server::api::{Caller, HandlerError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct CreateFileRequest {
    /// Display name of the file
    #[arg(long)]
    pub name: String,

    /// Free-form file type label
    #[arg(long = "type")]
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(ctx): Caller,
    Json(req): Json<CreateFileRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let file = state
        .files()
        .create(
            &ctx,
            NewFile {
                name: req.name,
                kind: req.kind,
            },
        )
        .await?;

    Ok((http::StatusCode::CREATED, Json(file)))
}

impl ApiRequest for CreateFileRequest {
    type Response = FileView;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = api_url(base_url, &["files"])?;
        Ok(client.post(full_url).json(&self))
    }
}
