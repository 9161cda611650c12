use clap::{Args, Subcommand};

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod share;
pub mod unshare;
pub mod users;

use crate::cli::op::Op;
use fileshare_daemon::http_server::api::v0::files::{
    CreateFileRequest, DeleteFileRequest, FileUsersRequest, GetFileRequest, ListFilesRequest,
    ShareRequest, UnshareRequest,
};

crate::command_enum! {
    (Create, CreateFileRequest),
    (List, ListFilesRequest),
    (Get, GetFileRequest),
    (Delete, DeleteFileRequest),
    (Share, ShareRequest),
    (Unshare, UnshareRequest),
    (Users, FileUsersRequest),
}

// Rename the generated Command to FileCommand for clarity
pub type FileCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct File {
    #[command(subcommand)]
    pub command: FileCommand,
}

#[async_trait::async_trait]
impl Op for File {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

/// One line per file: id, name, type and the caller's role.
pub(crate) fn format_file(file: &common::prelude::FileView) -> String {
    match &file.kind {
        Some(kind) => format!("{}  {} ({})  {}", file.id, file.name, kind, file.role),
        None => format!("{}  {}  {}", file.id, file.name, file.role),
    }
}

pub(crate) fn format_next_page(token: Option<&str>) -> Option<String> {
    token.map(|t| format!("next page: --pagination-token {}", t))
}
