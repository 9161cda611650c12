use fileshare_daemon::http_server::api::client::ApiError;
use fileshare_daemon::http_server::api::v0::files::users::{FileUsersRequest, FileUsersResponse};

use super::format_next_page;

#[derive(Debug, thiserror::Error)]
pub enum FileUsersError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for FileUsersRequest {
    type Error = FileUsersError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response: FileUsersResponse = client.call(self.clone()).await?;

        if response.users.is_empty() {
            return Ok(format!("No users for file {}", self.file));
        }

        let mut lines = Vec::new();
        lines.push(format!("Users of file {}:", self.file));
        for user in &response.users {
            let marker = if ctx.client.user() == Some(user.id.as_str()) {
                " (you)"
            } else {
                ""
            };
            lines.push(format!("  {}  {}{marker}", user.id, user.role));
        }
        lines.extend(format_next_page(response.pagination_token.as_deref()));
        Ok(lines.join("\n"))
    }
}
