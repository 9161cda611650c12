use fileshare_daemon::http_server::api::client::ApiError;
use fileshare_daemon::http_server::api::v0::files::unshare::{UnshareRequest, UnshareResponse};

#[derive(Debug, thiserror::Error)]
pub enum FileUnshareError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for UnshareRequest {
    type Error = FileUnshareError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response: UnshareResponse = client.call(self.clone()).await?;

        Ok(format!("{} no longer has access to file {}", response.id, response.file))
    }
}
