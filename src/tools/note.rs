//! Note creation tools implementation
//!
//! Implements `create_note` and `create_note_with_link`

use crate::cli::{NoteArgs, NoteWithLinkArgs};
use crate::error::AppError;
use crate::substack::client::SubstackClient;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Execute create_note
pub async fn execute_create_note(
    client: &SubstackClient,
    args: NoteArgs,
) -> Result<Value, AppError> {
    if args.text.trim().is_empty() {
        return Err(AppError::InvalidInput("Note text cannot be empty".to_string()));
    }

    info!("Publishing note ({} chars)", args.text.len());
    let note = client.publish_note(&args.text, Vec::new()).await?;
    debug!("Published note {}", note.id);

    Ok(json!({
        "success": true,
        "note_id": note.id,
        "message": "Note created successfully",
    }))
}

/// Execute create_note_with_link
pub async fn execute_create_note_with_link(
    client: &SubstackClient,
    args: NoteWithLinkArgs,
) -> Result<Value, AppError> {
    if args.text.trim().is_empty() {
        return Err(AppError::InvalidInput("Note text cannot be empty".to_string()));
    }
    if args.link.trim().is_empty() {
        return Err(AppError::InvalidInput("Link cannot be empty".to_string()));
    }

    info!("Publishing note with link {}", args.link);
    let attachment = client.create_link_attachment(&args.link).await?;
    debug!("Created link attachment {}", attachment.id);

    let note = client.publish_note(&args.text, vec![attachment.id]).await?;
    debug!("Published note {}", note.id);

    Ok(json!({
        "success": true,
        "note_id": note.id,
        "link": args.link,
        "message": "Note with link created successfully",
    }))
}
