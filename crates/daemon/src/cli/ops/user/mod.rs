use clap::{Args, Subcommand};

pub mod create;
pub mod delete;
pub mod get;
pub mod list;

use crate::cli::op::Op;
use fileshare_daemon::http_server::api::v0::users::{
    CreateUserRequest, DeleteUserRequest, GetUserRequest, ListUsersRequest,
};

crate::command_enum! {
    (Create, CreateUserRequest),
    (List, ListUsersRequest),
    (Get, GetUserRequest),
    (Delete, DeleteUserRequest),
}

// Rename the generated Command to UserCommand for clarity
pub type UserCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct User {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[async_trait::async_trait]
impl Op for User {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

pub(crate) fn format_user(user: &common::prelude::User) -> String {
    match &user.segment {
        Some(segment) => format!("{}  {}  [{}]", user.id, user.name, segment),
        None => format!("{}  {}", user.id, user.name),
    }
}
