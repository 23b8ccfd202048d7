//! Table index tools.
//!
//! Tools: xano_list_indexes, xano_create_btree_index, xano_create_unique_index,
//!        xano_create_search_index, xano_delete_index

use serde_json::{json, Map, Value as JsonValue};

use crate::args::{get_array_arg, get_id_arg, get_optional_string, get_string_arg};
use crate::error::{McpError, Result};
use crate::schema;
use crate::session::XanoSession;
use crate::tools::{instance_base, ToolDef};

/// Tool names handled by this module.
pub(crate) const NAMES: &[&str] = &[
    "xano_list_indexes",
    "xano_create_btree_index",
    "xano_create_unique_index",
    "xano_create_search_index",
    "xano_delete_index",
];

/// Get all index tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "xano_list_indexes",
            "List all indexes on a table.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_create_btree_index",
            "Create a btree index on a table. fields is an array of \
             {\"name\": field, \"op\": \"asc\"|\"desc\"} entries.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id, "fields": array_object },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_create_unique_index",
            "Create a unique index on a table. Fails if existing records violate \
             uniqueness. fields is an array of {\"name\": field, \"op\": \"asc\"|\"desc\"}.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id, "fields": array_object },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_create_search_index",
            "Create a full-text search index. fields is an array of \
             {\"name\": field, \"priority\": n}; lang defaults to english.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id,
                            "name": string, "fields": array_object },
                optional: { "instance_name": string, "lang": string }
            }),
        ),
        ToolDef::new(
            "xano_delete_index",
            "Delete an index from a table by index id.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id, "index_id": id },
                optional: { "instance_name": string }
            }),
        ),
    ]
}

/// Dispatch an index tool call.
pub async fn dispatch(
    session: &XanoSession,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "xano_list_indexes" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;

            let url = format!("{}/workspace/{}/table/{}/index", base, workspace_id, table_id);
            session.get(&url).await
        }

        "xano_create_btree_index" | "xano_create_unique_index" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let fields = get_array_arg(&args, "fields")?;

            let kind = if name == "xano_create_btree_index" { "btree" } else { "unique" };
            let url = format!(
                "{}/workspace/{}/table/{}/index/{}",
                base, workspace_id, table_id, kind
            );
            session.post(&url, &json!({ "fields": fields })).await
        }

        "xano_create_search_index" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let index_name = get_string_arg(&args, "name")?;
            let fields = get_array_arg(&args, "fields")?;
            let lang = get_optional_string(&args, "lang").unwrap_or_else(|| "english".to_string());

            let url = format!(
                "{}/workspace/{}/table/{}/index/search",
                base, workspace_id, table_id
            );
            session
                .post(&url, &json!({ "name": index_name, "lang": lang, "fields": fields }))
                .await
        }

        "xano_delete_index" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let index_id = get_id_arg(&args, "index_id")?;

            let url = format!(
                "{}/workspace/{}/table/{}/index/{}",
                base, workspace_id, table_id, index_id
            );
            session.delete(&url).await
        }

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
