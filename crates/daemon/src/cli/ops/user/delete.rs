use fileshare_daemon::http_server::api::client::ApiError;
use fileshare_daemon::http_server::api::v0::users::delete_user::{
    DeleteUserRequest, DeleteUserResponse,
};

#[derive(Debug, thiserror::Error)]
pub enum UserDeleteError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for DeleteUserRequest {
    type Error = UserDeleteError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response: DeleteUserResponse = client.call(self.clone()).await?;
        Ok(format!("Deleted user {}", response.id))
    }
}
