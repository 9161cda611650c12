use fileshare_daemon::http_server::api::client::ApiError;
use fileshare_daemon::http_server::api::v0::files::CreateFileRequest;

#[derive(Debug, thiserror::Error)]
pub enum FileCreateError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for CreateFileRequest {
    type Error = FileCreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let file = client.call(self.clone()).await?;

        Ok(format!("Created file {} ({})", file.name, file.id))
    }
}
