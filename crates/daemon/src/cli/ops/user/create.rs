use fileshare_daemon::http_server::api::client::ApiError;
use fileshare_daemon::http_server::api::v0::users::CreateUserRequest;

#[derive(Debug, thiserror::Error)]
pub enum UserCreateError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for CreateUserRequest {
    type Error = UserCreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let user = client.call(self.clone()).await?;

        Ok(format!("Created user {} ({})", user.name, user.id))
    }
}
