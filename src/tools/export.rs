//! Workspace export tools.
//!
//! Tools: xano_export_workspace, xano_export_workspace_schema

use serde_json::{Map, Value as JsonValue};

use crate::args::{get_id_arg, get_optional_string};
use crate::error::{McpError, Result};
use crate::schema;
use crate::session::XanoSession;
use crate::tools::{instance_base, ToolDef};

/// Tool names handled by this module.
pub(crate) const NAMES: &[&str] = &["xano_export_workspace", "xano_export_workspace_schema"];

/// Get all export tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "xano_export_workspace",
            "Export a workspace (schema, content, and media). Returns a download \
             descriptor for the export archive. branch defaults to the live branch; \
             password encrypts the archive.",
            schema!(object {
                required: { "workspace_id": id },
                optional: { "instance_name": string, "branch": string, "password": string }
            }),
        ),
        ToolDef::new(
            "xano_export_workspace_schema",
            "Export only the schema of a workspace (tables, fields, indexes, APIs), \
             without record content.",
            schema!(object {
                required: { "workspace_id": id },
                optional: { "instance_name": string, "branch": string, "password": string }
            }),
        ),
    ]
}

/// Build the export options body from the optional arguments.
fn export_body(args: &Map<String, JsonValue>) -> JsonValue {
    let mut body = Map::new();
    for key in ["branch", "password"] {
        if let Some(value) = get_optional_string(args, key) {
            body.insert(key.to_string(), JsonValue::String(value));
        }
    }
    JsonValue::Object(body)
}

/// Dispatch an export tool call.
pub async fn dispatch(
    session: &XanoSession,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "xano_export_workspace" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;

            let url = format!("{}/workspace/{}/export", base, workspace_id);
            session.post(&url, &export_body(&args)).await
        }

        "xano_export_workspace_schema" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;

            let url = format!("{}/workspace/{}/export-schema", base, workspace_id);
            session.post(&url, &export_body(&args)).await
        }

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
