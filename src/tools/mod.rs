//! MCP tools implementation

pub mod create_post;
pub mod note;
pub mod post;
pub mod profile;

#[cfg(test)]
mod tools_argument_tests;

use crate::config::Config;
use crate::error::AppError;
use crate::substack::client::SubstackClient;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Enumerated tool surface; dispatch is exhaustive over these variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    GetOwnProfile,
    GetProfilePosts,
    CreateNote,
    CreateNoteWithLink,
    GetPost,
    GetPostComments,
    GetNotes,
    CreatePost,
}

impl ToolName {
    /// Resolve a wire-level tool name
    pub fn parse(name: &str) -> Result<Self, AppError> {
        match name {
            "get_own_profile" => Ok(ToolName::GetOwnProfile),
            "get_profile_posts" => Ok(ToolName::GetProfilePosts),
            "create_note" => Ok(ToolName::CreateNote),
            "create_note_with_link" => Ok(ToolName::CreateNoteWithLink),
            "get_post" => Ok(ToolName::GetPost),
            "get_post_comments" => Ok(ToolName::GetPostComments),
            "get_notes" => Ok(ToolName::GetNotes),
            "create_post" => Ok(ToolName::CreatePost),
            other => Err(AppError::UnknownTool(other.to_string())),
        }
    }
}

/// Run a named tool against a fresh client built from the environment.
///
/// Tool resolution happens before configuration so an unknown name reports as
/// such even when no credential is set.
pub async fn run_tool(name: &str, arguments: Value) -> Result<Value, AppError> {
    let tool = ToolName::parse(name)?;

    let config = Config::from_env()?;
    let client = SubstackClient::new(&config);

    // Hosts may send null instead of an empty arguments object
    let arguments = if arguments.is_null() {
        Value::Object(Default::default())
    } else {
        arguments
    };

    match tool {
        ToolName::GetOwnProfile => profile::execute_own_profile(&client).await,
        ToolName::GetProfilePosts => {
            profile::execute_profile_posts(&client, parse_args(arguments)?).await
        }
        ToolName::CreateNote => note::execute_create_note(&client, parse_args(arguments)?).await,
        ToolName::CreateNoteWithLink => {
            note::execute_create_note_with_link(&client, parse_args(arguments)?).await
        }
        ToolName::GetPost => post::execute_post(&client, parse_args(arguments)?).await,
        ToolName::GetPostComments => {
            post::execute_post_comments(&client, parse_args(arguments)?).await
        }
        ToolName::GetNotes => profile::execute_notes(&client, parse_args(arguments)?).await,
        ToolName::CreatePost => {
            create_post::execute_create_post(&client, &config, parse_args(arguments)?).await
        }
    }
}

/// Deserialize tool arguments into their typed struct
fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, AppError> {
    serde_json::from_value(arguments)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))
}
