//! Profile tools implementation
//!
//! Implements `get_own_profile`, `get_profile_posts` and `get_notes`

use crate::cli::{NotesArgs, ProfilePostsArgs};
use crate::error::AppError;
use crate::substack::client::SubstackClient;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Execute get_own_profile
pub async fn execute_own_profile(client: &SubstackClient) -> Result<Value, AppError> {
    info!("Fetching own profile");
    let profile = client.own_profile().await?;

    Ok(json!({
        "name": profile.name,
        "slug": profile.handle,
        "bio": profile.bio,
        "url": profile.url(),
    }))
}

/// Execute get_profile_posts
pub async fn execute_profile_posts(
    client: &SubstackClient,
    args: ProfilePostsArgs,
) -> Result<Value, AppError> {
    info!("Fetching own posts, limit {}", args.limit);

    let user_id = client.own_user_id().await?;
    let posts = client.profile_posts(user_id, args.limit).await?;
    debug!("Collected {} posts", posts.len());

    let posts: Vec<Value> = posts
        .iter()
        .map(|post| {
            json!({
                "id": post.id,
                "title": post.title,
                "subtitle": post.subtitle,
                "publishedAt": post.post_date,
            })
        })
        .collect();

    Ok(json!({ "count": posts.len(), "posts": posts }))
}

/// Execute get_notes
pub async fn execute_notes(client: &SubstackClient, args: NotesArgs) -> Result<Value, AppError> {
    info!("Fetching own notes, limit {}", args.limit);

    let notes = client.notes(args.limit).await?;
    debug!("Collected {} notes", notes.len());

    let notes: Vec<Value> = notes
        .iter()
        .map(|note| {
            json!({
                "id": note.id,
                "body": note.body,
                "likesCount": note.reaction_count,
                "author": note.name,
                "publishedAt": note.date,
            })
        })
        .collect();

    Ok(json!({ "count": notes.len(), "notes": notes }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substack::types::{Note, Post};

    #[test]
    fn test_post_listing_shape() {
        let post = Post {
            id: 11,
            title: Some("Title".to_string()),
            subtitle: Some("Sub".to_string()),
            slug: None,
            post_date: None,
            body_html: None,
            reactions: None,
            restacks: None,
        };
        let entry = json!({
            "id": post.id,
            "title": post.title,
            "subtitle": post.subtitle,
            "publishedAt": post.post_date,
        });
        assert_eq!(entry["id"], 11);
        assert_eq!(entry["title"], "Title");
        assert!(entry["publishedAt"].is_null());
    }

    #[test]
    fn test_note_listing_shape() {
        let note = Note {
            id: 5,
            body: Some("short thought".to_string()),
            reaction_count: Some(2),
            name: Some("Alice".to_string()),
            date: None,
        };
        let entry = json!({
            "id": note.id,
            "body": note.body,
            "likesCount": note.reaction_count,
            "author": note.name,
        });
        assert_eq!(entry["likesCount"], 2);
        assert_eq!(entry["author"], "Alice");
    }
}
