//! Table schema tools.
//!
//! Tools: xano_get_table_schema, xano_add_field, xano_rename_field,
//!        xano_delete_field

use serde_json::{json, Map, Value as JsonValue};

use crate::args::{get_id_arg, get_optional_bool, get_optional_string, get_string_arg};
use crate::error::{McpError, Result};
use crate::schema;
use crate::session::XanoSession;
use crate::tools::{instance_base, ToolDef};

/// Tool names handled by this module.
pub(crate) const NAMES: &[&str] = &[
    "xano_get_table_schema",
    "xano_add_field",
    "xano_rename_field",
    "xano_delete_field",
];

/// Get all schema tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "xano_get_table_schema",
            "Get the schema of a table. Returns {\"schema\": [...]} with one entry \
             per field (name, type, constraints).",
            schema!(object {
                required: { "workspace_id": id, "table_id": id },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_add_field",
            "Add a field to a table schema. field_type is a Xano type such as \
             text, int, decimal, bool, timestamp, date, email, enum, object, or \
             tablerefuuid.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id,
                            "field_name": string, "field_type": string },
                optional: { "instance_name": string, "description": string,
                            "nullable": boolean, "required": boolean,
                            "access": string, "style": string,
                            "default_value": any, "config": object }
            }),
        ),
        ToolDef::new(
            "xano_rename_field",
            "Rename a field in a table schema. Record data is preserved.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id,
                            "old_name": string, "new_name": string },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_delete_field",
            "Delete a field from a table schema, including its stored values.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id, "field_name": string },
                optional: { "instance_name": string }
            }),
        ),
    ]
}

/// Dispatch a schema tool call.
pub async fn dispatch(
    session: &XanoSession,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "xano_get_table_schema" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;

            let url = format!("{}/workspace/{}/table/{}/schema", base, workspace_id, table_id);
            let result = session.get(&url).await?;
            Ok(json!({ "schema": result }))
        }

        "xano_add_field" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let field_name = get_string_arg(&args, "field_name")?;
            let field_type = get_string_arg(&args, "field_type")?;

            let mut body = json!({
                "name": field_name,
                "description": get_optional_string(&args, "description").unwrap_or_default(),
                "nullable": get_optional_bool(&args, "nullable").unwrap_or(false),
                "required": get_optional_bool(&args, "required").unwrap_or(false),
                "access": get_optional_string(&args, "access").unwrap_or_else(|| "public".to_string()),
                "style": get_optional_string(&args, "style").unwrap_or_else(|| "single".to_string()),
            });
            if let Some(default) = args.get("default_value") {
                body["default"] = default.clone();
            }
            if let Some(config) = args.get("config").filter(|v| v.is_object()) {
                body["config"] = config.clone();
            }

            let url = format!(
                "{}/workspace/{}/table/{}/schema/type/{}",
                base, workspace_id, table_id, field_type
            );
            session.post(&url, &body).await
        }

        "xano_rename_field" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let old_name = get_string_arg(&args, "old_name")?;
            let new_name = get_string_arg(&args, "new_name")?;

            let body = json!({ "old_name": old_name, "new_name": new_name });
            let url = format!(
                "{}/workspace/{}/table/{}/schema/rename",
                base, workspace_id, table_id
            );
            session.post(&url, &body).await
        }

        "xano_delete_field" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let field_name = get_string_arg(&args, "field_name")?;

            let url = format!(
                "{}/workspace/{}/table/{}/schema/{}",
                base, workspace_id, table_id, field_name
            );
            session.delete(&url).await
        }

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
