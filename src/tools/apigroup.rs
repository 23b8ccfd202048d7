//! API group and API tools.
//!
//! Tools: xano_browse_api_groups, xano_get_api_group, xano_create_api_group,
//!        xano_update_api_group, xano_delete_api_group,
//!        xano_browse_apis_in_group, xano_get_api, xano_create_api,
//!        xano_update_api, xano_delete_api

use reqwest::Method;
use serde_json::{json, Map, Value as JsonValue};

use crate::args::{get_id_arg, get_optional_bool, get_optional_string, get_optional_u64, get_string_arg};
use crate::error::{McpError, Result};
use crate::schema;
use crate::session::XanoSession;
use crate::tools::{instance_base, ToolDef};

/// Tool names handled by this module.
pub(crate) const NAMES: &[&str] = &[
    "xano_browse_api_groups",
    "xano_get_api_group",
    "xano_create_api_group",
    "xano_update_api_group",
    "xano_delete_api_group",
    "xano_browse_apis_in_group",
    "xano_get_api",
    "xano_create_api",
    "xano_update_api",
    "xano_delete_api",
];

/// Get all API group tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "xano_browse_api_groups",
            "Browse API groups in a workspace with pagination.",
            schema!(object {
                required: { "workspace_id": id },
                optional: { "instance_name": string, "page": integer, "per_page": integer,
                            "search": string, "sort": string, "order": string }
            }),
        ),
        ToolDef::new(
            "xano_get_api_group",
            "Get details for an API group.",
            schema!(object {
                required: { "workspace_id": id, "apigroup_id": id },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_create_api_group",
            "Create a new API group in a workspace.",
            schema!(object {
                required: { "workspace_id": id, "name": string },
                optional: { "instance_name": string, "description": string, "docs": string,
                            "swagger": boolean, "tag": array_string }
            }),
        ),
        ToolDef::new(
            "xano_update_api_group",
            "Update an API group. Only the provided fields are changed.",
            schema!(object {
                required: { "workspace_id": id, "apigroup_id": id },
                optional: { "instance_name": string, "name": string, "description": string,
                            "docs": string, "swagger": boolean, "tag": array_string }
            }),
        ),
        ToolDef::new(
            "xano_delete_api_group",
            "Delete an API group and all APIs it contains.",
            schema!(object {
                required: { "workspace_id": id, "apigroup_id": id },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_browse_apis_in_group",
            "Browse APIs inside an API group with pagination.",
            schema!(object {
                required: { "workspace_id": id, "apigroup_id": id },
                optional: { "instance_name": string, "page": integer, "per_page": integer,
                            "search": string, "sort": string, "order": string }
            }),
        ),
        ToolDef::new(
            "xano_get_api",
            "Get details for a single API endpoint.",
            schema!(object {
                required: { "workspace_id": id, "apigroup_id": id, "api_id": id },
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_create_api",
            "Create an API endpoint in a group. verb is GET, POST, PUT, PATCH, \
             DELETE, or HEAD.",
            schema!(object {
                required: { "workspace_id": id, "apigroup_id": id, "name": string, "verb": string },
                optional: { "instance_name": string, "description": string, "docs": string,
                            "tag": array_string }
            }),
        ),
        ToolDef::new(
            "xano_update_api",
            "Update an API endpoint. Only the provided fields are changed.",
            schema!(object {
                required: { "workspace_id": id, "apigroup_id": id, "api_id": id },
                optional: { "instance_name": string, "name": string, "description": string,
                            "docs": string, "verb": string, "auth": object, "tag": array_string,
                            "cache": object }
            }),
        ),
        ToolDef::new(
            "xano_delete_api",
            "Delete an API endpoint from a group.",
            schema!(object {
                required: { "workspace_id": id, "apigroup_id": id, "api_id": id },
                optional: { "instance_name": string }
            }),
        ),
    ]
}

/// Build a pagination query from the standard browse arguments.
fn browse_query(args: &Map<String, JsonValue>) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("page", get_optional_u64(args, "page").unwrap_or(1).to_string()),
        ("per_page", get_optional_u64(args, "per_page").unwrap_or(50).to_string()),
    ];
    for key in ["search", "sort", "order"] {
        if let Some(value) = get_optional_string(args, key) {
            query.push((key, value));
        }
    }
    query
}

/// Dispatch an API group tool call.
pub async fn dispatch(
    session: &XanoSession,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "xano_browse_api_groups" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;

            let url = format!("{}/workspace/{}/apigroup", base, workspace_id);
            let request = session.request(Method::GET, &url).query(&browse_query(&args));
            session.send(request).await
        }

        "xano_get_api_group" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let apigroup_id = get_id_arg(&args, "apigroup_id")?;

            let url = format!("{}/workspace/{}/apigroup/{}", base, workspace_id, apigroup_id);
            session.get(&url).await
        }

        "xano_create_api_group" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let group_name = get_string_arg(&args, "name")?;

            let mut body = json!({
                "name": group_name,
                "description": get_optional_string(&args, "description").unwrap_or_default(),
                "docs": get_optional_string(&args, "docs").unwrap_or_default(),
                "swagger": get_optional_bool(&args, "swagger").unwrap_or(true),
            });
            if let Some(tag) = args.get("tag").filter(|v| v.is_array()) {
                body["tag"] = tag.clone();
            }

            let url = format!("{}/workspace/{}/apigroup", base, workspace_id);
            session.post(&url, &body).await
        }

        "xano_update_api_group" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let apigroup_id = get_id_arg(&args, "apigroup_id")?;

            let mut body = Map::new();
            for key in ["name", "description", "docs", "swagger", "tag"] {
                if let Some(value) = args.get(key) {
                    body.insert(key.to_string(), value.clone());
                }
            }

            let url = format!("{}/workspace/{}/apigroup/{}", base, workspace_id, apigroup_id);
            session.put(&url, &JsonValue::Object(body)).await
        }

        "xano_delete_api_group" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let apigroup_id = get_id_arg(&args, "apigroup_id")?;

            let url = format!("{}/workspace/{}/apigroup/{}", base, workspace_id, apigroup_id);
            session.delete(&url).await
        }

        "xano_browse_apis_in_group" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let apigroup_id = get_id_arg(&args, "apigroup_id")?;

            let url = format!(
                "{}/workspace/{}/apigroup/{}/api",
                base, workspace_id, apigroup_id
            );
            let request = session.request(Method::GET, &url).query(&browse_query(&args));
            session.send(request).await
        }

        "xano_get_api" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let apigroup_id = get_id_arg(&args, "apigroup_id")?;
            let api_id = get_id_arg(&args, "api_id")?;

            let url = format!(
                "{}/workspace/{}/apigroup/{}/api/{}",
                base, workspace_id, apigroup_id, api_id
            );
            session.get(&url).await
        }

        "xano_create_api" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let apigroup_id = get_id_arg(&args, "apigroup_id")?;
            let api_name = get_string_arg(&args, "name")?;
            let verb = get_string_arg(&args, "verb")?;

            let mut body = json!({
                "name": api_name,
                "description": get_optional_string(&args, "description").unwrap_or_default(),
                "docs": get_optional_string(&args, "docs").unwrap_or_default(),
                "verb": verb,
            });
            if let Some(tag) = args.get("tag").filter(|v| v.is_array()) {
                body["tag"] = tag.clone();
            }

            let url = format!(
                "{}/workspace/{}/apigroup/{}/api",
                base, workspace_id, apigroup_id
            );
            session.post(&url, &body).await
        }

        "xano_update_api" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let apigroup_id = get_id_arg(&args, "apigroup_id")?;
            let api_id = get_id_arg(&args, "api_id")?;

            let mut body = Map::new();
            for key in ["name", "description", "docs", "verb", "auth", "tag", "cache"] {
                if let Some(value) = args.get(key) {
                    body.insert(key.to_string(), value.clone());
                }
            }

            let url = format!(
                "{}/workspace/{}/apigroup/{}/api/{}",
                base, workspace_id, apigroup_id, api_id
            );
            session.put(&url, &JsonValue::Object(body)).await
        }

        "xano_delete_api" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;
            let apigroup_id = get_id_arg(&args, "apigroup_id")?;
            let api_id = get_id_arg(&args, "api_id")?;

            let url = format!(
                "{}/workspace/{}/apigroup/{}/api/{}",
                base, workspace_id, apigroup_id, api_id
            );
            session.delete(&url).await
        }

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
