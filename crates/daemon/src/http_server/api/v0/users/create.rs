use axum::extract::{Json, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{NewUser, User};

use crate::http_server::api::client::{api_url, ApiError, ApiRequest};
use crate::http_server::api::{Caller, HandlerError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct CreateUserRequest {
    /// Display name of the user
    #[arg(long)]
    pub name: String,

    /// Segment to place the user in
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(ctx): Caller,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let user = state
        .users()
        .create(
            &ctx,
            NewUser {
                name: req.name,
                segment: req.segment,
            },
        )
        .await?;

    Ok((http::StatusCode::CREATED, Json(user)))
}

impl ApiRequest for CreateUserRequest {
    type Response = User;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = api_url(base_url, &["users"])?;
        Ok(client.post(full_url).json(&self))
    }
}
