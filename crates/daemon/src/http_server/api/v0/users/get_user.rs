use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{PrincipalId, User};

use crate::http_server::api::client::{api_url, ApiError, ApiRequest};
use crate::http_server::api::{Caller, HandlerError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct GetUserRequest {
    /// User ID
    #[arg(long)]
    pub id: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Caller(ctx): Caller,
    Path(user): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let user = state.users().get(&ctx, &PrincipalId::from(user)).await?;
    Ok(Json(user))
}

impl ApiRequest for GetUserRequest {
    type Response = User;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = api_url(base_url, &["users", &self.id])?;
        Ok(client.get(full_url))
    }
}
