//! Table tools.
//!
//! Tools: xano_list_tables, xano_get_table_details, xano_create_table,
//!        xano_update_table, xano_delete_table

use serde_json::{json, Map, Value as JsonValue};

use crate::args::{get_id_arg, get_optional_bool, get_optional_string, get_string_arg};
use crate::error::{McpError, Result};
use crate::schema;
use crate::session::XanoSession;
use crate::tools::{instance_base, ToolDef};

/// Tool names handled by this module.
pub(crate) const NAMES: &[&str] = &[
    "xano_list_tables",
    "xano_get_table_details",
    "xano_create_table",
    "xano_update_table",
    "xano_delete_table",
];

/// Get all table tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "xano_list_tables",
            "List all tables in a workspace. Returns {\"tables\": [...]}.",
            schema!(object {
                required: { "database_id": id },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_get_table_details",
            "Get details for a specific table: name, description, auth setting, tags.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_create_table",
            "Create a new table in a workspace. Define fields afterwards with \
             xano_add_field.",
            schema!(object {
                required: { "workspace_id": id, "name": string },
                optional: { "instance_name": string, "description": string, "docs": string,
                            "auth": boolean, "tag": array_string }
            }),
        ),
        ToolDef::new(
            "xano_update_table",
            "Update a table's metadata. Only the provided fields are changed.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id },
                optional: { "instance_name": string, "name": string, "description": string,
                            "docs": string, "auth": boolean, "tag": array_string }
            }),
        ),
        ToolDef::new(
            "xano_delete_table",
            "Delete a table from a workspace. This also removes its records and indexes.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id },
                optional: { "instance_name": string }
            }),
        ),
    ]
}

/// Dispatch a table tool call.
pub async fn dispatch(
    session: &XanoSession,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "xano_list_tables" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "database_id")?;

            let url = format!("{}/workspace/{}/table", base, workspace_id);
            let result = session.get(&url).await?;

            // The table listing is paginated under "items" on newer instances.
            match result.get("items") {
                Some(items) => Ok(json!({ "tables": items })),
                None => Ok(json!({ "tables": result })),
            }
        }

        "xano_get_table_details" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;

            let url = format!("{}/workspace/{}/table/{}", base, workspace_id, table_id);
            session.get(&url).await
        }

        "xano_create_table" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_name = get_string_arg(&args, "name")?;

            let mut body = json!({
                "name": table_name,
                "description": get_optional_string(&args, "description").unwrap_or_default(),
                "docs": get_optional_string(&args, "docs").unwrap_or_default(),
                "auth": get_optional_bool(&args, "auth").unwrap_or(false),
            });
            if let Some(tag) = args.get("tag").filter(|v| v.is_array()) {
                body["tag"] = tag.clone();
            }

            let url = format!("{}/workspace/{}/table", base, workspace_id);
            session.post(&url, &body).await
        }

        "xano_update_table" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;

            // Only the provided fields go in the body.
            let mut body = Map::new();
            for key in ["name", "description", "docs", "auth", "tag"] {
                if let Some(value) = args.get(key) {
                    body.insert(key.to_string(), value.clone());
                }
            }

            let url = format!("{}/workspace/{}/table/{}/meta", base, workspace_id, table_id);
            session.put(&url, &JsonValue::Object(body)).await
        }

        "xano_delete_table" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;

            let url = format!("{}/workspace/{}/table/{}", base, workspace_id, table_id);
            session.delete(&url).await
        }

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
