use fileshare_daemon::http_server::api::client::ApiError;
use fileshare_daemon::http_server::api::v0::files::list::{ListFilesRequest, ListFilesResponse};

use super::{format_file, format_next_page};

#[derive(Debug, thiserror::Error)]
pub enum FileListError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for ListFilesRequest {
    type Error = FileListError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response: ListFilesResponse = client.call(self.clone()).await?;

        if response.files.is_empty() {
            return Ok("No files found".to_string());
        }

        let mut lines: Vec<String> = response.files.iter().map(format_file).collect();
        lines.extend(format_next_page(response.pagination_token.as_deref()));
        Ok(lines.join("\n"))
    }
}
