use fileshare_daemon::http_server::api::client::ApiError;
use fileshare_daemon::http_server::api::v0::users::list::{ListUsersRequest, ListUsersResponse};

use super::format_user;
use crate::cli::ops::file::format_next_page;

#[derive(Debug, thiserror::Error)]
pub enum UserListError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for ListUsersRequest {
    type Error = UserListError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response: ListUsersResponse = client.call(self.clone()).await?;

        if response.users.is_empty() {
            return Ok("No users found".to_string());
        }

        let mut lines: Vec<String> = response.users.iter().map(format_user).collect();
        lines.extend(format_next_page(response.pagination_token.as_deref()));
        Ok(lines.join("\n"))
    }
}
