use fileshare_daemon::http_server::api::client::ApiError;
use fileshare_daemon::http_server::api::v0::files::ShareRequest;

#[derive(Debug, thiserror::Error)]
pub enum FileShareError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for ShareRequest {
    type Error = FileShareError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let grant = client.call(self.clone()).await?;

        Ok(format!(
            "File {} shared with {} as {}",
            self.file, grant.id, grant.role
        ))
    }
}
