//! Table content (record) tools.
//!
//! Tools: xano_browse_table_content, xano_search_table_content,
//!        xano_get_table_record, xano_create_table_record,
//!        xano_update_table_record, xano_delete_table_record,
//!        xano_bulk_create_records, xano_bulk_update_records,
//!        xano_bulk_delete_records, xano_truncate_table

use reqwest::Method;
use serde_json::{json, Map, Value as JsonValue};

use crate::args::{get_array_arg, get_id_arg, get_optional_bool, get_optional_u64, get_value_arg};
use crate::error::{McpError, Result};
use crate::schema;
use crate::session::XanoSession;
use crate::tools::{instance_base, ToolDef};

/// Header selecting the live data source for content reads.
const DATA_SOURCE_HEADER: (&str, &str) = ("X-Data-Source", "live");

/// Tool names handled by this module.
pub(crate) const NAMES: &[&str] = &[
    "xano_browse_table_content",
    "xano_search_table_content",
    "xano_get_table_record",
    "xano_create_table_record",
    "xano_update_table_record",
    "xano_delete_table_record",
    "xano_bulk_create_records",
    "xano_bulk_update_records",
    "xano_bulk_delete_records",
    "xano_truncate_table",
];

/// Get all record tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "xano_browse_table_content",
            "Browse records in a table with pagination. Returns records plus \
             paging metadata. Use xano_search_table_content for filtered queries.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id },
                optional: { "instance_name": string, "page": integer, "per_page": integer }
            }),
        ),
        ToolDef::new(
            "xano_search_table_content",
            "Search records with filter conditions and sorting. search_conditions \
             is an array of Xano filter expressions; sort maps field names to \
             \"asc\" or \"desc\".",
            schema!(object {
                required: { "workspace_id": id, "table_id": id },
                optional: { "instance_name": string, "search_conditions": array_object,
                            "sort": object, "page": integer, "per_page": integer }
            }),
        ),
        ToolDef::new(
            "xano_get_table_record",
            "Get a single record by id.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id, "record_id": id },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_create_table_record",
            "Create a record. record_data maps field names to values. Use \
             xano_bulk_create_records for multiple records.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id, "record_data": object },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_update_table_record",
            "Update a record. record_data contains only the fields to change.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id, "record_id": id,
                            "record_data": object },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_delete_table_record",
            "Delete a single record by id. Use xano_bulk_delete_records for multiple.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id, "record_id": id },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_bulk_create_records",
            "Create multiple records in a single request. records is an array of \
             record_data objects.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id, "records": array_object },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_bulk_update_records",
            "Update multiple records in a single request. updates is an array of \
             {\"row_id\": id, \"updates\": {field: value}} entries.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id, "updates": array_object },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_bulk_delete_records",
            "Delete multiple records in a single request. record_ids is an array \
             of record ids.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id, "record_ids": array_any },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_truncate_table",
            "Delete all records in a table. With reset=true the primary key \
             counter restarts at 1.",
            schema!(object {
                required: { "workspace_id": id, "table_id": id },
                optional: { "instance_name": string, "reset": boolean }
            }),
        ),
    ]
}

/// Dispatch a record tool call.
pub async fn dispatch(
    session: &XanoSession,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "xano_browse_table_content" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let page = get_optional_u64(&args, "page").unwrap_or(1);
            let per_page = get_optional_u64(&args, "per_page").unwrap_or(50);

            let url = format!("{}/workspace/{}/table/{}/content", base, workspace_id, table_id);
            let request = session
                .request(Method::GET, &url)
                .query(&[("page", page.to_string()), ("per_page", per_page.to_string())])
                .header(DATA_SOURCE_HEADER.0, DATA_SOURCE_HEADER.1);
            session.send(request).await
        }

        "xano_search_table_content" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;

            let body = json!({
                "search": args.get("search_conditions").cloned().unwrap_or_else(|| json!([])),
                "sort": args.get("sort").cloned().unwrap_or_else(|| json!({})),
                "page": get_optional_u64(&args, "page").unwrap_or(1),
                "per_page": get_optional_u64(&args, "per_page").unwrap_or(50),
            });

            let url = format!(
                "{}/workspace/{}/table/{}/content/search",
                base, workspace_id, table_id
            );
            session.post(&url, &body).await
        }

        "xano_get_table_record" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let record_id = get_id_arg(&args, "record_id")?;

            let url = format!(
                "{}/workspace/{}/table/{}/content/{}",
                base, workspace_id, table_id, record_id
            );
            session.get(&url).await
        }

        "xano_create_table_record" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let record_data = get_value_arg(&args, "record_data")?;

            let url = format!("{}/workspace/{}/table/{}/content", base, workspace_id, table_id);
            session.post(&url, &record_data).await
        }

        "xano_update_table_record" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let record_id = get_id_arg(&args, "record_id")?;
            let record_data = get_value_arg(&args, "record_data")?;

            let url = format!(
                "{}/workspace/{}/table/{}/content/{}",
                base, workspace_id, table_id, record_id
            );
            session.put(&url, &record_data).await
        }

        "xano_delete_table_record" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let record_id = get_id_arg(&args, "record_id")?;

            let url = format!(
                "{}/workspace/{}/table/{}/content/{}",
                base, workspace_id, table_id, record_id
            );
            session.delete(&url).await
        }

        "xano_bulk_create_records" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let records = get_array_arg(&args, "records")?;

            let url = format!(
                "{}/workspace/{}/table/{}/content/bulk",
                base, workspace_id, table_id
            );
            session.post(&url, &json!({ "items": records })).await
        }

        "xano_bulk_update_records" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let updates = get_array_arg(&args, "updates")?;

            let url = format!(
                "{}/workspace/{}/table/{}/content/bulk/patch",
                base, workspace_id, table_id
            );
            session.post(&url, &json!({ "items": updates })).await
        }

        "xano_bulk_delete_records" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let record_ids = get_array_arg(&args, "record_ids")?;

            let url = format!(
                "{}/workspace/{}/table/{}/content/bulk/delete",
                base, workspace_id, table_id
            );
            session.post(&url, &json!({ "row_ids": record_ids })).await
        }

        "xano_truncate_table" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let table_id = get_id_arg(&args, "table_id")?;
            let reset = get_optional_bool(&args, "reset").unwrap_or(false);

            let url = format!("{}/workspace/{}/table/{}/truncate", base, workspace_id, table_id);
            session.delete_json(&url, &json!({ "reset": reset })).await
        }

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
