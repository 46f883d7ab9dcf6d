//! Post retrieval tools implementation
//!
//! Implements `get_post` and `get_post_comments`

use crate::cli::{PostArgs, PostCommentsArgs};
use crate::error::AppError;
use crate::substack::client::SubstackClient;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Execute get_post
pub async fn execute_post(client: &SubstackClient, args: PostArgs) -> Result<Value, AppError> {
    info!("Fetching post {}", args.post_id);
    let post = client.post_by_id(args.post_id).await?;

    Ok(json!({
        "id": post.id,
        "title": post.title,
        "subtitle": post.subtitle,
        "body": post.body_html,
        "slug": post.slug,
        "publishedAt": post.post_date,
        "reactions": post.reactions,
        "restacks": post.restacks,
    }))
}

/// Execute get_post_comments
pub async fn execute_post_comments(
    client: &SubstackClient,
    args: PostCommentsArgs,
) -> Result<Value, AppError> {
    info!("Fetching comments for post {}, limit {}", args.post_id, args.limit);

    let comments = client.post_comments(args.post_id, args.limit).await?;
    debug!("Collected {} comments", comments.len());

    let comments: Vec<Value> = comments
        .iter()
        .map(|comment| {
            json!({
                "id": comment.id,
                "body": comment.body,
                "author_name": comment.name,
                "created_at": comment.date,
            })
        })
        .collect();

    Ok(json!({
        "post_id": args.post_id,
        "count": comments.len(),
        "comments": comments,
    }))
}
