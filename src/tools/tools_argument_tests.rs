//! Tests for tool argument parsing and response envelope behavior

#[cfg(test)]
mod tool_argument_parsing_tests {
    use crate::cli::{CreatePostArgs, NotesArgs, PostCommentsArgs, ProfilePostsArgs};
    use serde_json::json;

    #[test]
    fn test_profile_posts_limit_variations() {
        for limit in [0usize, 1, 10, 100] {
            let args: ProfilePostsArgs =
                serde_json::from_value(json!({ "limit": limit })).unwrap();
            assert_eq!(args.limit, limit);
        }
    }

    #[test]
    fn test_post_comments_args_full() {
        let args: PostCommentsArgs = serde_json::from_value(json!({
            "post_id": 12345,
            "limit": 5
        }))
        .unwrap();
        assert_eq!(args.post_id, 12345);
        assert_eq!(args.limit, 5);
    }

    #[test]
    fn test_notes_args_default() {
        let args: NotesArgs = serde_json::from_value(json!({})).unwrap();
        assert_eq!(args.limit, 10);
    }

    #[test]
    fn test_create_post_full_arguments() {
        let args: CreatePostArgs = serde_json::from_value(json!({
            "title": "My Post",
            "subtitle": "a subtitle",
            "body": "First\n\nSecond",
            "cover_image": "/tmp/cover.jpg",
            "draft": false
        }))
        .unwrap();
        assert_eq!(args.title, "My Post");
        assert_eq!(args.subtitle, "a subtitle");
        assert_eq!(args.cover_image.as_deref(), Some("/tmp/cover.jpg"));
        assert!(!args.draft);
    }

    #[test]
    fn test_create_post_rejects_missing_body() {
        let result = serde_json::from_value::<CreatePostArgs>(json!({"title": "No body"}));
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod tool_envelope_tests {
    use crate::error::AppError;
    use crate::mcp::ToolResult;
    use serde_json::{json, Value};

    #[test]
    fn test_failure_envelope_shape() {
        let err = AppError::Api("POST /api/v1/drafts returned 500: oops".to_string());
        let envelope = serde_json::to_value(ToolResult::failure(&err)).unwrap();

        assert_eq!(envelope["isError"], true);
        assert_eq!(envelope["content"][0]["type"], "text");

        let payload: Value =
            serde_json::from_str(envelope["content"][0]["text"].as_str().unwrap()).unwrap();
        assert!(payload["error"].as_str().unwrap().contains("oops"));
    }

    #[test]
    fn test_success_envelope_text_is_pretty_json() {
        let envelope =
            serde_json::to_value(ToolResult::json(&json!({"posts": [], "count": 0}))).unwrap();
        let text = envelope["content"][0]["text"].as_str().unwrap();
        // Pretty-printed output spans multiple lines
        assert!(text.contains('\n'));
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["count"], 0);
    }
}
