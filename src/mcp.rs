//! MCP (Model Context Protocol) handling module
//!
//! Implements the JSON-RPC 2.0 protocol for MCP communication over stdio.
//! Tool handler failures of every kind are normalized into a tool-result
//! envelope with `isError` set; they never surface as JSON-RPC faults and
//! never terminate the process.

use crate::error::AppError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tracing::{debug, error, info};

/// MCP JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    /// JSON-RPC version field - required by spec but not accessed in code
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// MCP JSON-RPC 2.0 response structure
#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP Error structure
#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: String,
    pub message: String,
}

/// MCP Tool call arguments
#[derive(Debug, Deserialize)]
pub struct ToolCallArgs {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// MCP Content item
#[derive(Debug, Serialize)]
pub struct ContentItem {
    pub r#type: String,
    pub text: String,
}

/// MCP Tool result envelope
#[derive(Debug, Serialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl McpResponse {
    /// Create a successful response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: &str, message: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

impl ToolResult {
    /// Wrap a JSON payload as a pretty-printed text envelope
    pub fn json(value: &Value) -> Self {
        Self {
            content: vec![ContentItem {
                r#type: "text".to_string(),
                text: serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
            }],
            is_error: None,
        }
    }

    /// Wrap a handler failure as an error envelope
    pub fn failure(err: &AppError) -> Self {
        let payload = serde_json::json!({ "error": err.message() });
        Self {
            content: vec![ContentItem {
                r#type: "text".to_string(),
                text: serde_json::to_string_pretty(&payload)
                    .unwrap_or_else(|_| payload.to_string()),
            }],
            is_error: Some(true),
        }
    }
}

/// Parse MCP request from JSON string
pub fn parse_request(json: &str) -> Result<McpRequest> {
    let request: McpRequest = serde_json::from_str(json)?;
    Ok(request)
}

/// Serialize MCP response to JSON string
pub fn serialize_response(response: &McpResponse) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}

/// Handle stdio MCP communication
pub async fn handle_stdio() -> Result<()> {
    info!("Starting substack-mcp server on stdio");

    let stdin = tokio::io::stdin();
    let mut reader = AsyncBufReader::new(stdin).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = reader.next_line().await? {
        debug!("Received request: {}", line);

        let response = match parse_request(&line) {
            Ok(request) => handle_request(request).await,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                McpResponse::error(None, "parse_error", &format!("Invalid JSON: {}", e))
            }
        };

        let response_json = serialize_response(&response)?;
        debug!("Sending response: {}", response_json);

        stdout.write_all(response_json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// Handle a single MCP request
async fn handle_request(request: McpRequest) -> McpResponse {
    match request.method.as_str() {
        "initialize" => handle_initialize(request),
        "tools/call" => handle_tool_call(request).await,
        "tools/list" => handle_tools_list(request),
        _ => McpResponse::error(
            request.id,
            "method_not_found",
            &format!("Method '{}' not found", request.method),
        ),
    }
}

/// Handle tools/call method
async fn handle_tool_call(request: McpRequest) -> McpResponse {
    let args: ToolCallArgs = match serde_json::from_value(request.params.unwrap_or_default()) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(
                request.id,
                "invalid_params",
                &format!("Invalid parameters: {}", e),
            )
        }
    };

    let result = match crate::tools::run_tool(&args.name, args.arguments).await {
        Ok(value) => ToolResult::json(&value),
        Err(e) => {
            error!("Tool '{}' failed: {}", args.name, e);
            ToolResult::failure(&e)
        }
    };

    match serde_json::to_value(&result) {
        Ok(value) => McpResponse::success(request.id, value),
        Err(e) => McpResponse::error(request.id, "internal_error", &e.to_string()),
    }
}

/// Handle tools/list method
fn handle_tools_list(request: McpRequest) -> McpResponse {
    McpResponse::success(request.id, serde_json::json!({ "tools": build_tools_array() }))
}

/// Handle initialize method
fn handle_initialize(request: McpRequest) -> McpResponse {
    let result = serde_json::json!({
        "serverInfo": {
            "name": "substack-mcp",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": { "list": true, "call": true }
        },
        "tools": build_tools_array()
    });
    McpResponse::success(request.id, result)
}

/// Build the tools array returned from tools/list and initialize
fn build_tools_array() -> Value {
    use crate::cli::{
        CreatePostArgs, NoteArgs, NoteWithLinkArgs, NotesArgs, OwnProfileArgs, PostArgs,
        PostCommentsArgs, ProfilePostsArgs,
    };
    use schemars::schema_for;

    serde_json::json!([
        {
            "name": "get_own_profile",
            "description": "Get your own Substack profile information",
            "inputSchema": schema_for!(OwnProfileArgs)
        },
        {
            "name": "get_profile_posts",
            "description": "Get your recent Substack posts",
            "inputSchema": schema_for!(ProfilePostsArgs)
        },
        {
            "name": "create_note",
            "description": "Create a new Substack note (short-form post)",
            "inputSchema": schema_for!(NoteArgs)
        },
        {
            "name": "create_note_with_link",
            "description": "Create a new Substack note with a link attachment",
            "inputSchema": schema_for!(NoteWithLinkArgs)
        },
        {
            "name": "get_post",
            "description": "Get a specific Substack post by ID with full content",
            "inputSchema": schema_for!(PostArgs)
        },
        {
            "name": "get_post_comments",
            "description": "Get comments for a specific Substack post",
            "inputSchema": schema_for!(PostCommentsArgs)
        },
        {
            "name": "get_notes",
            "description": "Get your recent Substack notes (short-form posts)",
            "inputSchema": schema_for!(NotesArgs)
        },
        {
            "name": "create_post",
            "description": "Create a Substack draft post with optional cover image",
            "inputSchema": schema_for!(CreatePostArgs)
        }
    ])
}
