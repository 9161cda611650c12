use fileshare_daemon::http_server::api::client::ApiError;
use fileshare_daemon::http_server::api::v0::files::delete_file::{
    DeleteFileRequest, DeleteFileResponse,
};

#[derive(Debug, thiserror::Error)]
pub enum FileDeleteError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for DeleteFileRequest {
    type Error = FileDeleteError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response: DeleteFileResponse = client.call(self.clone()).await?;

        Ok(format!(
            "Deleted file {}, revoked {} grant(s)",
            response.id, response.revoked
        ))
    }
}
