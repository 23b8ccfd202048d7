//! Tool registry and category definitions.
//!
//! Provides the infrastructure for registering and dispatching MCP tools.

pub mod apigroup;
pub mod export;
pub mod file;
pub mod index;
pub mod instance;
pub mod record;
pub mod schema;
pub mod table;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::args::get_optional_string;
use crate::error::{McpError, Result};
use crate::session::XanoSession;

/// A tool definition for the MCP tools/list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    /// Tool name (e.g., "xano_list_tables")
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonValue,
}

impl ToolDef {
    /// Create a new tool definition.
    pub fn new(name: &str, description: &str, input_schema: JsonValue) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Registry of all available tools.
pub struct ToolRegistry {
    tools: Vec<ToolDef>,
}

impl ToolRegistry {
    /// Create a new registry with all tools registered.
    pub fn new() -> Self {
        let mut tools = Vec::new();

        // Register all tool categories
        tools.extend(instance::tools());
        tools.extend(table::tools());
        tools.extend(schema::tools());
        tools.extend(index::tools());
        tools.extend(record::tools());
        tools.extend(file::tools());
        tools.extend(apigroup::tools());
        tools.extend(export::tools());

        Self { tools }
    }

    /// Get all tool definitions.
    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// The inherited `xano_*` names don't share a per-category prefix, so
    /// routing goes through each module's name table.
    pub async fn dispatch(
        &self,
        session: &XanoSession,
        name: &str,
        args: Map<String, JsonValue>,
    ) -> Result<JsonValue> {
        if instance::NAMES.contains(&name) {
            instance::dispatch(session, name, args).await
        } else if table::NAMES.contains(&name) {
            table::dispatch(session, name, args).await
        } else if schema::NAMES.contains(&name) {
            schema::dispatch(session, name, args).await
        } else if index::NAMES.contains(&name) {
            index::dispatch(session, name, args).await
        } else if record::NAMES.contains(&name) {
            record::dispatch(session, name, args).await
        } else if file::NAMES.contains(&name) {
            file::dispatch(session, name, args).await
        } else if apigroup::NAMES.contains(&name) {
            apigroup::dispatch(session, name, args).await
        } else if export::NAMES.contains(&name) {
            export::dispatch(session, name, args).await
        } else {
            Err(McpError::UnknownTool(name.to_string()))
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the target instance from the arguments (or the session default)
/// and return its Meta API base URL.
pub(crate) fn instance_base(
    session: &XanoSession,
    args: &Map<String, JsonValue>,
) -> Result<String> {
    let instance = session.resolve_instance(get_optional_string(args, "instance_name"))?;
    Ok(session.instance_meta_url(&instance))
}

/// Helper macro for creating JSON Schema for tool input parameters.
#[macro_export]
macro_rules! schema {
    // Object with required and optional properties
    (object {
        required: { $($req_name:literal : $req_type:tt),* $(,)? },
        optional: { $($opt_name:literal : $opt_type:tt),* $(,)? }
    }) => {{
        let mut required = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), schema!(@type $req_type));)*
        $(props.insert($opt_name.to_string(), schema!(@type $opt_type));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Object with only required properties
    (object {
        required: { $($req_name:literal : $req_type:tt),* $(,)? }
    }) => {{
        let mut required = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), schema!(@type $req_type));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Object with only optional properties
    (object {
        optional: { $($opt_name:literal : $opt_type:tt),* $(,)? }
    }) => {{
        let mut props = serde_json::Map::new();
        $(props.insert($opt_name.to_string(), schema!(@type $opt_type));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": []
        })
    }};

    // Empty object (no parameters)
    (object {}) => {{
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }};

    // Type mappings. Ids are "id" (string or number) because hosts send both.
    (@type string) => { serde_json::json!({"type": "string"}) };
    (@type number) => { serde_json::json!({"type": "number"}) };
    (@type integer) => { serde_json::json!({"type": "integer"}) };
    (@type boolean) => { serde_json::json!({"type": "boolean"}) };
    (@type object) => { serde_json::json!({"type": "object"}) };
    (@type any) => { serde_json::json!({}) };
    (@type id) => { serde_json::json!({"type": ["string", "integer"]}) };
    (@type array_string) => { serde_json::json!({"type": "array", "items": {"type": "string"}}) };
    (@type array_object) => { serde_json::json!({"type": "array", "items": {"type": "object"}}) };
    (@type array_any) => { serde_json::json!({"type": "array", "items": {}}) };
}
