//! Integration tests for the MCP server.
//!
//! Tool calls are dispatched against a local stub HTTP server that records the
//! request and answers with a canned status and body.

use std::sync::{Arc, Mutex};

use serde_json::{json, Map, Value as JsonValue};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use xano_mcp::{McpError, ToolRegistry, XanoConfig, XanoSession};

// =============================================================================
// Stub upstream
// =============================================================================

/// A request captured by the stub server.
#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    target: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl RecordedRequest {
    /// Request path without the query string.
    fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn json_body(&self) -> JsonValue {
        serde_json::from_str(&self.body).expect("stub captured a non-JSON body")
    }
}

/// Minimal HTTP stub: accepts connections, records each request, and answers
/// every one with the same status and JSON body.
struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind stub");
        let addr = listener.local_addr().expect("Failed to get stub address");
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let body = body.to_string();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let request = read_request(&mut socket).await;
                // Record before responding so the request is visible as soon
                // as the client sees the response.
                recorded.lock().unwrap().push(request);

                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    500 => "Internal Server Error",
                    _ => "Error",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{}/api:meta", addr),
            requests,
        }
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The single recorded request; panics if there were zero or several.
    fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one upstream request");
        requests.into_iter().next().unwrap()
    }

    /// A session pointed at this stub.
    fn session(&self) -> XanoSession {
        XanoSession::new(
            XanoConfig::new("test-token")
                .with_default_instance("test-instance")
                .with_base_url(self.base_url.clone()),
        )
        .expect("Failed to create session")
    }
}

async fn read_request(socket: &mut TcpStream) -> RecordedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(end) = find_header_end(&buf) {
            break end;
        }
        let n = socket.read(&mut chunk).await.expect("Failed to read stub request");
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.expect("Failed to read stub body");
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|i| i + 4)
}

// =============================================================================
// Helpers
// =============================================================================

/// Create a session with no stub behind it (for local-only tools).
fn offline_session() -> XanoSession {
    XanoSession::new(XanoConfig::new("test-token").with_default_instance("xnwv-v1z6-dvnr"))
        .expect("Failed to create session")
}

/// Helper to dispatch a tool call.
async fn call_tool(
    session: &XanoSession,
    registry: &ToolRegistry,
    name: &str,
    args: JsonValue,
) -> JsonValue {
    let args_map: Map<String, JsonValue> = match args {
        JsonValue::Object(m) => m,
        _ => Map::new(),
    };
    registry
        .dispatch(session, name, args_map)
        .await
        .unwrap_or_else(|e| panic!("Tool {} failed: {}", name, e))
}

/// Helper to dispatch a tool call and expect an error.
async fn call_tool_err(
    session: &XanoSession,
    registry: &ToolRegistry,
    name: &str,
    args: JsonValue,
) -> McpError {
    let args_map: Map<String, JsonValue> = match args {
        JsonValue::Object(m) => m,
        _ => Map::new(),
    };
    registry
        .dispatch(session, name, args_map)
        .await
        .expect_err(&format!("Expected tool {} to fail", name))
}

// =============================================================================
// Instance Tools
// =============================================================================

#[tokio::test]
async fn test_list_instances_passes_payload_through() {
    let stub = StubServer::start(200, r#"{"instances":[{"name":"abc"}]}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    let result = call_tool(&session, &registry, "xano_list_instances", json!({})).await;
    assert_eq!(result, json!({"instances": [{"name": "abc"}]}));

    let request = stub.only_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path(), "/api:meta/auth/me");
}

#[tokio::test]
async fn test_bearer_token_attached_to_every_request() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(&session, &registry, "xano_list_databases", json!({})).await;

    let request = stub.only_request();
    assert_eq!(request.header("authorization"), Some("Bearer test-token"));
    assert_eq!(request.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_get_instance_details_needs_no_network() {
    let session = offline_session();
    let registry = ToolRegistry::new();

    let result = call_tool(&session, &registry, "xano_get_instance_details", json!({})).await;
    assert_eq!(result["name"], "xnwv-v1z6-dvnr");
    assert_eq!(result["display"], "XNWV");
    assert_eq!(result["xano_domain"], "xnwv-v1z6-dvnr.n7c.xano.io");
    assert_eq!(result["meta_api"], "https://xnwv-v1z6-dvnr.n7c.xano.io/api:meta");
}

#[tokio::test]
async fn test_list_databases_wraps_result() {
    let stub = StubServer::start(200, r#"[{"id":1,"name":"crm"}]"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    let result = call_tool(&session, &registry, "xano_list_databases", json!({})).await;
    assert_eq!(result, json!({"databases": [{"id": 1, "name": "crm"}]}));

    let request = stub.only_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path(), "/api:meta/workspace");
}

#[tokio::test]
async fn test_get_workspace_details() {
    let stub = StubServer::start(200, r#"{"id":5,"name":"crm"}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    let result = call_tool(
        &session,
        &registry,
        "xano_get_workspace_details",
        json!({"workspace_id": 5}),
    )
    .await;
    assert_eq!(result["name"], "crm");

    let request = stub.only_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path(), "/api:meta/workspace/5");
}

// =============================================================================
// Table Tools
// =============================================================================

#[tokio::test]
async fn test_list_tables_unwraps_items() {
    let stub = StubServer::start(200, r#"{"items":[{"id":10,"name":"users"}]}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    let result = call_tool(
        &session,
        &registry,
        "xano_list_tables",
        json!({"database_id": "5"}),
    )
    .await;
    assert_eq!(result, json!({"tables": [{"id": 10, "name": "users"}]}));

    let request = stub.only_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path(), "/api:meta/workspace/5/table");
}

#[tokio::test]
async fn test_get_table_details_accepts_string_and_number_ids() {
    let stub = StubServer::start(200, r#"{"id":10,"name":"users"}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    let result = call_tool(
        &session,
        &registry,
        "xano_get_table_details",
        json!({"workspace_id": "5", "table_id": 10}),
    )
    .await;
    assert_eq!(result["id"], 10);

    let request = stub.only_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10");
}

#[tokio::test]
async fn test_create_table_posts_body() {
    let stub = StubServer::start(200, r#"{"id":11}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_create_table",
        json!({"workspace_id": 5, "name": "Users", "description": "Stores user information"}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api:meta/workspace/5/table");
    assert_eq!(
        request.json_body(),
        json!({
            "name": "Users",
            "description": "Stores user information",
            "docs": "",
            "auth": false
        })
    );
}

#[tokio::test]
async fn test_update_table_sends_only_provided_fields() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_update_table",
        json!({"workspace_id": 5, "table_id": 10, "name": "NewName"}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/meta");
    assert_eq!(request.json_body(), json!({"name": "NewName"}));
}

#[tokio::test]
async fn test_delete_table() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_delete_table",
        json!({"workspace_id": 5, "table_id": 10}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10");
}

// =============================================================================
// Schema & Index Tools
// =============================================================================

#[tokio::test]
async fn test_get_table_schema_wraps_result() {
    let stub = StubServer::start(200, r#"[{"name":"id","type":"int"}]"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    let result = call_tool(
        &session,
        &registry,
        "xano_get_table_schema",
        json!({"workspace_id": 5, "table_id": 10}),
    )
    .await;
    assert_eq!(result, json!({"schema": [{"name": "id", "type": "int"}]}));

    let request = stub.only_request();
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/schema");
}

#[tokio::test]
async fn test_add_field_posts_to_type_path() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_add_field",
        json!({"workspace_id": 5, "table_id": 10, "field_name": "email", "field_type": "email"}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/schema/type/email");
    let body = request.json_body();
    assert_eq!(body["name"], "email");
    assert_eq!(body["nullable"], false);
}

#[tokio::test]
async fn test_rename_field() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_rename_field",
        json!({"workspace_id": 5, "table_id": 10, "old_name": "email", "new_name": "contact"}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/schema/rename");
    assert_eq!(
        request.json_body(),
        json!({"old_name": "email", "new_name": "contact"})
    );
}

#[tokio::test]
async fn test_delete_field() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_delete_field",
        json!({"workspace_id": 5, "table_id": 10, "field_name": "email"}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/schema/email");
}

#[tokio::test]
async fn test_create_unique_index() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_create_unique_index",
        json!({"workspace_id": 5, "table_id": 10, "fields": [{"name": "email", "op": "asc"}]}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/index/unique");
    assert_eq!(
        request.json_body(),
        json!({"fields": [{"name": "email", "op": "asc"}]})
    );
}

#[tokio::test]
async fn test_create_search_index_defaults_lang() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_create_search_index",
        json!({
            "workspace_id": 5,
            "table_id": 10,
            "name": "content_search",
            "fields": [{"name": "title", "priority": 1}]
        }),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/index/search");
    let body = request.json_body();
    assert_eq!(body["lang"], "english");
    assert_eq!(body["name"], "content_search");
}

#[tokio::test]
async fn test_delete_index() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_delete_index",
        json!({"workspace_id": 5, "table_id": 10, "index_id": 3}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/index/3");
}

// =============================================================================
// Record Tools
// =============================================================================

#[tokio::test]
async fn test_browse_content_sends_pagination_and_data_source() {
    let stub = StubServer::start(200, r#"{"items":[],"curPage":2}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_browse_table_content",
        json!({"workspace_id": 5, "table_id": 10, "page": 2, "per_page": 10}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/content");
    assert!(request.target.contains("page=2"));
    assert!(request.target.contains("per_page=10"));
    assert_eq!(request.header("x-data-source"), Some("live"));
}

#[tokio::test]
async fn test_search_content_body_defaults() {
    let stub = StubServer::start(200, r#"{"items":[]}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_search_table_content",
        json!({"workspace_id": 5, "table_id": 10}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/content/search");
    assert_eq!(
        request.json_body(),
        json!({"search": [], "sort": {}, "page": 1, "per_page": 50})
    );
}

#[tokio::test]
async fn test_create_record_forwards_record_data() {
    let stub = StubServer::start(200, r#"{"id":42}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_create_table_record",
        json!({
            "workspace_id": 5,
            "table_id": 10,
            "record_data": {"name": "alice", "age": 30}
        }),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/content");
    assert_eq!(request.json_body(), json!({"name": "alice", "age": 30}));
}

#[tokio::test]
async fn test_update_record() {
    let stub = StubServer::start(200, r#"{"id":42}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_update_table_record",
        json!({
            "workspace_id": 5,
            "table_id": 10,
            "record_id": "42",
            "record_data": {"age": 31}
        }),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/content/42");
    assert_eq!(request.json_body(), json!({"age": 31}));
}

#[tokio::test]
async fn test_bulk_create_sends_single_request() {
    let stub = StubServer::start(200, "[]").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_bulk_create_records",
        json!({
            "workspace_id": 5,
            "table_id": 10,
            "records": [{"name": "alice"}, {"name": "bob"}]
        }),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/content/bulk");
    assert_eq!(
        request.json_body(),
        json!({"items": [{"name": "alice"}, {"name": "bob"}]})
    );
}

#[tokio::test]
async fn test_bulk_update_patch_body() {
    let stub = StubServer::start(200, "[]").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_bulk_update_records",
        json!({
            "workspace_id": 5,
            "table_id": 10,
            "updates": [{"row_id": 1, "updates": {"age": 31}}]
        }),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/content/bulk/patch");
    assert_eq!(
        request.json_body(),
        json!({"items": [{"row_id": 1, "updates": {"age": 31}}]})
    );
}

#[tokio::test]
async fn test_bulk_delete_records_body() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_bulk_delete_records",
        json!({"workspace_id": 5, "table_id": 10, "record_ids": [1, 2, 3]}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/content/bulk/delete");
    assert_eq!(request.json_body(), json!({"row_ids": [1, 2, 3]}));
}

#[tokio::test]
async fn test_truncate_table_sends_reset_flag() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_truncate_table",
        json!({"workspace_id": 5, "table_id": 10, "reset": true}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path(), "/api:meta/workspace/5/table/10/truncate");
    assert_eq!(request.json_body(), json!({"reset": true}));
}

// =============================================================================
// File Tools
// =============================================================================

#[tokio::test]
async fn test_list_files_pagination() {
    let stub = StubServer::start(200, r#"{"items":[]}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_list_files",
        json!({"workspace_id": 5, "access": "public"}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path(), "/api:meta/workspace/5/file");
    assert!(request.target.contains("page=1"));
    assert!(request.target.contains("access=public"));
}

#[tokio::test]
async fn test_bulk_delete_files_body() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_bulk_delete_files",
        json!({"workspace_id": 5, "file_ids": [7, 8]}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api:meta/workspace/5/file/bulk_delete");
    assert_eq!(request.json_body(), json!({"ids": [7, 8]}));
}

// =============================================================================
// API Group Tools
// =============================================================================

#[tokio::test]
async fn test_create_api_group() {
    let stub = StubServer::start(200, r#"{"id":3}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_create_api_group",
        json!({"workspace_id": 5, "name": "public"}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api:meta/workspace/5/apigroup");
    let body = request.json_body();
    assert_eq!(body["name"], "public");
    assert_eq!(body["swagger"], true);
}

#[tokio::test]
async fn test_create_api_in_group() {
    let stub = StubServer::start(200, r#"{"id":9}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_create_api",
        json!({"workspace_id": 5, "apigroup_id": 3, "name": "get_users", "verb": "GET"}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api:meta/workspace/5/apigroup/3/api");
    let body = request.json_body();
    assert_eq!(body["name"], "get_users");
    assert_eq!(body["verb"], "GET");
}

#[tokio::test]
async fn test_delete_api() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_delete_api",
        json!({"workspace_id": 5, "apigroup_id": 3, "api_id": 9}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path(), "/api:meta/workspace/5/apigroup/3/api/9");
}

// =============================================================================
// Export Tools
// =============================================================================

#[tokio::test]
async fn test_export_workspace() {
    let stub = StubServer::start(200, r#"{"download_url":"https://example"}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    let result = call_tool(
        &session,
        &registry,
        "xano_export_workspace",
        json!({"workspace_id": 5, "branch": "v2"}),
    )
    .await;
    assert_eq!(result["download_url"], "https://example");

    let request = stub.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api:meta/workspace/5/export");
    assert_eq!(request.json_body(), json!({"branch": "v2"}));
}

#[tokio::test]
async fn test_export_workspace_schema() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    call_tool(
        &session,
        &registry,
        "xano_export_workspace_schema",
        json!({"workspace_id": 5}),
    )
    .await;

    let request = stub.only_request();
    assert_eq!(request.path(), "/api:meta/workspace/5/export-schema");
    assert_eq!(request.json_body(), json!({}));
}

// =============================================================================
// Error Handling
// =============================================================================

#[tokio::test]
async fn test_missing_required_arg_makes_no_network_call() {
    let stub = StubServer::start(200, "{}").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    let err = call_tool_err(
        &session,
        &registry,
        "xano_get_table_details",
        json!({"workspace_id": 5}),
    )
    .await;
    assert!(err.to_string().contains("table_id"));
    assert!(stub.requests().is_empty(), "no request should have been made");
}

#[tokio::test]
async fn test_missing_instance_is_reported_before_network() {
    let stub = StubServer::start(200, "{}").await;
    let session = XanoSession::new(XanoConfig::new("test-token").with_base_url(stub.base_url.clone()))
        .expect("Failed to create session");
    let registry = ToolRegistry::new();

    let err = call_tool_err(
        &session,
        &registry,
        "xano_list_tables",
        json!({"database_id": 5}),
    )
    .await;
    assert!(err.to_string().contains("instance_name"));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_upstream_404_surfaces_status() {
    let stub = StubServer::start(404, r#"{"message":"Not Found"}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    let err = call_tool_err(
        &session,
        &registry,
        "xano_get_table_record",
        json!({"workspace_id": 5, "table_id": 10, "record_id": 999}),
    )
    .await;
    let msg = err.to_string();
    assert!(msg.contains("404"), "expected 404 in: {}", msg);
}

#[tokio::test]
async fn test_upstream_500_surfaces_status() {
    let stub = StubServer::start(500, r#"{"message":"boom"}"#).await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    let err = call_tool_err(&session, &registry, "xano_list_databases", json!({})).await;
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    // Nothing listens on port 9 (discard).
    let session = XanoSession::new(
        XanoConfig::new("test-token")
            .with_default_instance("test-instance")
            .with_base_url("http://127.0.0.1:9/api:meta"),
    )
    .expect("Failed to create session");
    let registry = ToolRegistry::new();

    let err = call_tool_err(&session, &registry, "xano_list_databases", json!({})).await;
    assert!(err.to_string().contains("network error"));
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let stub = StubServer::start(200, "<html>oops</html>").await;
    let session = stub.session();
    let registry = ToolRegistry::new();

    let err = call_tool_err(&session, &registry, "xano_list_databases", json!({})).await;
    assert!(err.to_string().contains("parse"));
}

#[tokio::test]
async fn test_unknown_tool() {
    let session = offline_session();
    let registry = ToolRegistry::new();

    let err = call_tool_err(&session, &registry, "xano_nonexistent", json!({})).await;
    assert!(err.to_string().contains("unknown tool"));
}

// =============================================================================
// Tool Registry
// =============================================================================

#[test]
fn test_tool_count() {
    let registry = ToolRegistry::new();
    let tools = registry.tools();

    assert_eq!(
        tools.len(),
        44,
        "Expected 44 tools, got {}. Tools: {:?}",
        tools.len(),
        tools.iter().map(|t| &t.name).collect::<Vec<_>>()
    );
}

#[test]
fn test_all_tools_have_required_fields() {
    let registry = ToolRegistry::new();

    for tool in registry.tools() {
        assert!(!tool.name.is_empty(), "Tool name should not be empty");
        assert!(!tool.description.is_empty(), "Tool description should not be empty");
        assert!(tool.name.starts_with("xano_"), "Tool name should start with 'xano_'");
        assert!(tool.input_schema.is_object(), "Tool input_schema should be an object");
    }
}

#[test]
fn test_no_duplicate_tool_names() {
    let registry = ToolRegistry::new();
    let tools = registry.tools();
    let mut names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
    let original_count = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), original_count, "Found duplicate tool names");
}
