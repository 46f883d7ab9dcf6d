//! CLI mode implementation
//!
//! Provides command-line interface for the Substack tools. The same argument
//! structs back the MCP tool schemas via schemars.

use clap::{Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Substack MCP CLI
#[derive(Parser)]
#[command(name = "substack-mcp")]
#[command(about = "Substack profile, note and post publishing utility", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show your own Substack profile
    GetOwnProfile(OwnProfileArgs),
    /// List your recent posts
    GetProfilePosts(ProfilePostsArgs),
    /// Publish a short-form note
    CreateNote(NoteArgs),
    /// Publish a short-form note with a link attachment
    CreateNoteWithLink(NoteWithLinkArgs),
    /// Fetch a post by id with full content
    GetPost(PostArgs),
    /// List comments on a post
    GetPostComments(PostCommentsArgs),
    /// List your recent notes
    GetNotes(NotesArgs),
    /// Create a draft post with optional cover image
    CreatePost(CreatePostArgs),
}

fn default_posts_limit() -> usize {
    10
}

fn default_comments_limit() -> usize {
    20
}

fn default_notes_limit() -> usize {
    10
}

fn default_true() -> bool {
    true
}

/// get_own_profile tool arguments (none)
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug, Default)]
pub struct OwnProfileArgs {}

/// get_profile_posts tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct ProfilePostsArgs {
    /// Number of posts to retrieve (default: 10)
    #[arg(short = 'l', long, default_value_t = 10)]
    #[serde(default = "default_posts_limit")]
    #[schemars(description = "Number of posts to retrieve (default: 10)")]
    pub limit: usize,
}

/// create_note tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct NoteArgs {
    /// The text content of the note
    #[arg(short = 't', long)]
    #[schemars(description = "The text content of the note")]
    pub text: String,
}

/// create_note_with_link tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct NoteWithLinkArgs {
    /// The text content of the note
    #[arg(short = 't', long)]
    #[schemars(description = "The text content of the note")]
    pub text: String,

    /// URL to attach to the note
    #[arg(short = 'k', long)]
    #[schemars(description = "URL to attach to the note")]
    pub link: String,
}

/// get_post tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct PostArgs {
    /// The ID of the post to retrieve
    #[arg(short = 'p', long)]
    #[schemars(description = "The ID of the post to retrieve")]
    pub post_id: u64,
}

/// get_post_comments tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct PostCommentsArgs {
    /// The ID of the post
    #[arg(short = 'p', long)]
    #[schemars(description = "The ID of the post")]
    pub post_id: u64,

    /// Number of comments to retrieve (default: 20)
    #[arg(short = 'l', long, default_value_t = 20)]
    #[serde(default = "default_comments_limit")]
    #[schemars(description = "Number of comments to retrieve (default: 20)")]
    pub limit: usize,
}

/// get_notes tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct NotesArgs {
    /// Number of notes to retrieve (default: 10)
    #[arg(short = 'l', long, default_value_t = 10)]
    #[serde(default = "default_notes_limit")]
    #[schemars(description = "Number of notes to retrieve (default: 10)")]
    pub limit: usize,
}

/// create_post tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct CreatePostArgs {
    /// The title of the post
    #[arg(short = 't', long)]
    #[schemars(description = "The title of the post")]
    pub title: String,

    /// The subtitle of the post (optional)
    #[arg(short = 's', long, default_value = "")]
    #[serde(default)]
    #[schemars(description = "The subtitle of the post (optional)")]
    pub subtitle: String,

    /// The body content of the post (plain text, blank lines separate paragraphs)
    #[arg(short = 'b', long)]
    #[schemars(description = "The body content of the post")]
    pub body: String,

    /// Path to cover image file (optional, will be uploaded to Substack)
    #[arg(short = 'c', long)]
    #[schemars(description = "Path to cover image file (optional, will be uploaded to Substack)")]
    pub cover_image: Option<String>,

    /// Save as draft instead of publishing (default: true)
    #[arg(short = 'd', long, default_value_t = true, action = clap::ArgAction::Set)]
    #[serde(default = "default_true")]
    #[schemars(description = "Save as draft instead of publishing (default: true)")]
    pub draft: bool,
}
