//! Substack API client
//!
//! Thin authenticated adapter over the Substack REST endpoints. Every request
//! carries the session credential as a `connect.sid` cookie; non-success
//! statuses map to `AppError::Api` with the status line and response body
//! text. No retries and no backoff: a failed call fails the enclosing tool
//! invocation.

use crate::config::Config;
use crate::error::AppError;
use crate::substack::page::{collect_limited, Cursor, Page};
use crate::substack::prosemirror;
use crate::substack::types::*;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Posts endpoint page size for offset pagination
const POSTS_PAGE_SIZE: u64 = 25;

/// Authenticated Substack API client, constructed per invocation
pub struct SubstackClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SubstackClient {
    /// Create a client from per-invocation configuration
    pub fn new(config: &Config) -> Self {
        let client = crate::http::client_with_timeout(Duration::from_secs(30));
        Self {
            client,
            base_url: config.base_url(),
            api_key: config.api_key.clone(),
        }
    }

    /// Point the client at an explicit base URL, used to drive tests against
    /// a local stub listener
    #[cfg(test)]
    pub(crate) fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            client: crate::http::client_with_timeout(Duration::from_secs(5)),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Resolve a host-relative path against the configured base URL
    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| AppError::Internal(format!("Invalid URL for {}: {}", path, e)))
    }

    /// Issue a request and decode the JSON response body
    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<T, AppError> {
        let path = url.path().to_string();
        let value = self.request_value(method, url, body).await?;
        serde_json::from_value(value)
            .map_err(|e| AppError::Parse(format!("Unexpected response from {}: {}", path, e)))
    }

    /// Issue a request, map non-2xx to an API error, return the raw JSON value
    async fn request_value(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Value, AppError> {
        let path = url.path().to_string();
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .header("Cookie", format!("connect.sid={}", self.api_key));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Request to {} failed: {}", path, e)))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(api_error(&path, status, &text));
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| AppError::Parse(format!("Invalid JSON from {}: {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request_json(Method::GET, self.endpoint(path)?, None).await
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T, AppError> {
        self.request_json(Method::POST, self.endpoint(path)?, Some(body))
            .await
    }

    /// Resolve the acting user's id from the own-subscription endpoint
    pub async fn own_user_id(&self) -> Result<u64, AppError> {
        let subscription: Subscription = self.get_json("/api/v1/subscription").await?;
        Ok(subscription.user_id)
    }

    /// Fetch the acting user's profile
    pub async fn own_profile(&self) -> Result<UserProfile, AppError> {
        let user_id = self.own_user_id().await?;
        self.get_json(&format!("/api/v1/user/{}/profile", user_id))
            .await
    }

    /// Fetch up to `limit` posts for a profile, newest first (platform order)
    pub async fn profile_posts(&self, user_id: u64, limit: usize) -> Result<Vec<Post>, AppError> {
        collect_limited(limit, |cursor| self.posts_page(user_id, cursor)).await
    }

    async fn posts_page(&self, user_id: u64, cursor: Option<Cursor>) -> Result<Page<Post>, AppError> {
        let offset = match cursor {
            Some(Cursor::Offset(o)) => o,
            _ => 0,
        };
        let page: PostsPage = self
            .get_json(&format!(
                "/api/v1/profile/posts?profile_user_id={}&offset={}&limit={}",
                user_id, offset, POSTS_PAGE_SIZE
            ))
            .await?;

        let fetched = page.posts.len() as u64;
        let next_cursor = if fetched == POSTS_PAGE_SIZE {
            Some(Cursor::Offset(offset + fetched))
        } else {
            None
        };
        Ok(Page {
            items: page.posts,
            next_cursor,
        })
    }

    /// Fetch a single post with full content by id
    pub async fn post_by_id(&self, post_id: u64) -> Result<Post, AppError> {
        self.get_json(&format!("/api/v1/posts/by-id/{}", post_id))
            .await
    }

    /// Fetch up to `limit` comments for a post
    pub async fn post_comments(&self, post_id: u64, limit: usize) -> Result<Vec<Comment>, AppError> {
        collect_limited(limit, |_cursor| async move {
            let page: CommentsPage = self
                .get_json(&format!("/api/v1/post/{}/comments", post_id))
                .await?;
            Ok(Page::last(page.comments))
        })
        .await
    }

    /// Fetch up to `limit` of the acting user's notes
    pub async fn notes(&self, limit: usize) -> Result<Vec<Note>, AppError> {
        collect_limited(limit, |cursor| self.notes_page(cursor)).await
    }

    /// Notes endpoint URL; the opaque continuation token is percent-encoded
    fn notes_url(&self, cursor: Option<&Cursor>) -> Result<Url, AppError> {
        let mut url = self.endpoint("/api/v1/notes")?;
        if let Some(Cursor::Token(token)) = cursor {
            url.query_pairs_mut().append_pair("cursor", token);
        }
        Ok(url)
    }

    async fn notes_page(&self, cursor: Option<Cursor>) -> Result<Page<Note>, AppError> {
        let url = self.notes_url(cursor.as_ref())?;
        let page: NotesPage = self.request_json(Method::GET, url, None).await?;
        let items = page.items.into_iter().filter_map(|i| i.comment).collect();
        Ok(Page {
            items,
            next_cursor: page.next_cursor.map(Cursor::Token),
        })
    }

    /// Publish a single-paragraph note, optionally carrying attachments.
    /// The note text is not reshaped; it goes out verbatim in one paragraph.
    pub async fn publish_note(
        &self,
        text: &str,
        attachment_ids: Vec<String>,
    ) -> Result<PublishedNote, AppError> {
        let doc = prosemirror::single_paragraph_document(text);
        let mut body = json!({ "bodyJson": doc });
        if !attachment_ids.is_empty() {
            body["attachmentIds"] = json!(attachment_ids);
        }
        self.post_json("/api/v1/comment/feed", &body).await
    }

    /// Create a link attachment for a note
    pub async fn create_link_attachment(&self, url: &str) -> Result<Attachment, AppError> {
        self.post_json(
            "/api/v1/comment/attachment",
            &json!({ "type": "link", "url": url }),
        )
        .await
    }

    /// Resolve the publication user id (post workflow step 1)
    pub async fn publication_user_id(&self) -> Result<u64, AppError> {
        let users: PublicationUsers = self.get_json("/api/v1/publication_user").await?;
        users
            .pub_users
            .first()
            .map(|u| u.user_id)
            .ok_or_else(|| AppError::Api("No publication user found for this account".to_string()))
    }

    /// Create an empty draft with the acting user as byline (step 2)
    pub async fn create_draft(&self, user_id: u64) -> Result<u64, AppError> {
        let draft: Draft = self
            .post_json(
                "/api/v1/drafts",
                &json!({ "draft_bylines": [{ "id": user_id, "user_id": user_id }] }),
            )
            .await?;
        Ok(draft.id)
    }

    /// Upload a base64 data-URI image against a draft (step 3)
    pub async fn upload_image(&self, data_uri: &str, post_id: u64) -> Result<String, AppError> {
        let image: UploadedImage = self
            .post_json(
                "/api/v1/image",
                &json!({ "image": data_uri, "postId": post_id }),
            )
            .await?;
        Ok(image.url)
    }

    /// Update a draft's title, subtitle, body and cover image (step 5)
    pub async fn update_draft(&self, post_id: u64, payload: &Value) -> Result<(), AppError> {
        let url = self.endpoint(&format!("/api/v1/drafts/{}", post_id))?;
        self.request_value(Method::PUT, url, Some(payload)).await?;
        Ok(())
    }
}

/// Descriptive API failure: status line plus response body excerpt
fn api_error(path: &str, status: StatusCode, body: &str) -> AppError {
    let excerpt: String = body.chars().take(500).collect();
    AppError::Api(format!("{} returned {}: {}", path, status, excerpt))
}
