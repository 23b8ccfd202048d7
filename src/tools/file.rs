//! Workspace file tools.
//!
//! Tools: xano_list_files, xano_get_file_details, xano_delete_file,
//!        xano_bulk_delete_files

use reqwest::Method;
use serde_json::{json, Map, Value as JsonValue};

use crate::args::{get_array_arg, get_id_arg, get_optional_string, get_optional_u64};
use crate::error::{McpError, Result};
use crate::schema;
use crate::session::XanoSession;
use crate::tools::{instance_base, ToolDef};

/// Tool names handled by this module.
pub(crate) const NAMES: &[&str] = &[
    "xano_list_files",
    "xano_get_file_details",
    "xano_delete_file",
    "xano_bulk_delete_files",
];

/// Get all file tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "xano_list_files",
            "List files in a workspace with pagination. access filters by \
             \"public\" or \"private\"; sort accepts created_at, name, size, or mime.",
            schema!(object {
                required: { "workspace_id": id },
                optional: { "instance_name": string, "page": integer, "per_page": integer,
                            "search": string, "access": string, "sort": string, "order": string }
            }),
        ),
        ToolDef::new(
            "xano_get_file_details",
            "Get metadata for a file: name, size, mime type, access level, URL.",
            schema!(object {
                required: { "workspace_id": id, "file_id": id },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_delete_file",
            "Delete a file from a workspace. Use xano_bulk_delete_files for multiple.",
            schema!(object {
                required: { "workspace_id": id, "file_id": id },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_bulk_delete_files",
            "Delete multiple files in a single request. file_ids is an array of file ids.",
            schema!(object {
                required: { "workspace_id": id, "file_ids": array_any },
                optional: { "instance_name": string }
            }),
        ),
    ]
}

/// Dispatch a file tool call.
pub async fn dispatch(
    session: &XanoSession,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "xano_list_files" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;

            let mut query = vec![
                ("page", get_optional_u64(&args, "page").unwrap_or(1).to_string()),
                ("per_page", get_optional_u64(&args, "per_page").unwrap_or(50).to_string()),
            ];
            for key in ["search", "access", "sort", "order"] {
                if let Some(value) = get_optional_string(&args, key) {
                    query.push((key, value));
                }
            }

            let url = format!("{}/workspace/{}/file", base, workspace_id);
            let request = session.request(Method::GET, &url).query(&query);
            session.send(request).await
        }

        "xano_get_file_details" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let file_id = get_id_arg(&args, "file_id")?;

            let url = format!("{}/workspace/{}/file/{}", base, workspace_id, file_id);
            session.get(&url).await
        }

        "xano_delete_file" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let file_id = get_id_arg(&args, "file_id")?;

            let url = format!("{}/workspace/{}/file/{}", base, workspace_id, file_id);
            session.delete(&url).await
        }

        "xano_bulk_delete_files" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let file_ids = get_array_arg(&args, "file_ids")?;

            let url = format!("{}/workspace/{}/file/bulk_delete", base, workspace_id);
            session.post(&url, &json!({ "ids": file_ids })).await
        }

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
