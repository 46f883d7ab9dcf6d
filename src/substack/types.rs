//! Substack API resource types
//!
//! Transient read-only views over API responses. Nothing here is cached or
//! persisted; every tool invocation re-fetches what it needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Own-subscription lookup, used to resolve the acting user's id
#[derive(Debug, Deserialize)]
pub struct Subscription {
    pub user_id: u64,
}

/// User profile fields as returned by the profile endpoint
#[derive(Debug, Deserialize, Serialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: Option<String>,
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl UserProfile {
    /// Public profile URL derived from the handle
    pub fn url(&self) -> Option<String> {
        self.handle
            .as_ref()
            .map(|h| format!("https://substack.com/@{}", h))
    }
}

/// Paginated posts listing
#[derive(Debug, Deserialize)]
pub struct PostsPage {
    pub posts: Vec<Post>,
}

/// Post resource, full or listing view depending on the endpoint
#[derive(Debug, Deserialize, Serialize)]
pub struct Post {
    pub id: u64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_date: Option<DateTime<Utc>>,
    /// Full HTML body, present only on the by-id endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    /// Reaction counts keyed by emoji, platform-defined shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restacks: Option<u64>,
}

/// Comments listing for a post
#[derive(Debug, Deserialize)]
pub struct CommentsPage {
    pub comments: Vec<Comment>,
}

/// Comment resource
#[derive(Debug, Deserialize, Serialize)]
pub struct Comment {
    pub id: u64,
    pub body: Option<String>,
    /// Author display name
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// Paginated notes feed
#[derive(Debug, Deserialize)]
pub struct NotesPage {
    pub items: Vec<NoteItem>,
    #[serde(rename = "nextCursor")]
    pub next_cursor: Option<String>,
}

/// Feed item wrapping a note; non-note items carry no comment
#[derive(Debug, Deserialize)]
pub struct NoteItem {
    pub comment: Option<Note>,
}

/// Note resource (short-form post)
#[derive(Debug, Deserialize, Serialize)]
pub struct Note {
    pub id: u64,
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_count: Option<u64>,
    /// Author display name
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// Publication user listing from /api/v1/publication_user
#[derive(Debug, Deserialize)]
pub struct PublicationUsers {
    pub pub_users: Vec<PubUser>,
}

#[derive(Debug, Deserialize)]
pub struct PubUser {
    pub user_id: u64,
}

/// Newly created draft; only the server-assigned id is threaded onward
#[derive(Debug, Deserialize)]
pub struct Draft {
    pub id: u64,
}

/// Hosted image returned by the upload endpoint
#[derive(Debug, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

/// Link attachment created for a note
#[derive(Debug, Deserialize)]
pub struct Attachment {
    pub id: String,
}

/// Published note response
#[derive(Debug, Deserialize)]
pub struct PublishedNote {
    pub id: u64,
}
