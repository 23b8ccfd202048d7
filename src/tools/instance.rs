//! Instance and workspace tools.
//!
//! Tools: xano_list_instances, xano_get_instance_details, xano_list_databases,
//!        xano_get_workspace_details

use serde_json::{json, Map, Value as JsonValue};

use crate::args::{get_id_arg, get_optional_string};
use crate::error::{McpError, Result};
use crate::schema;
use crate::session::XanoSession;
use crate::tools::{instance_base, ToolDef};

/// Tool names handled by this module.
pub(crate) const NAMES: &[&str] = &[
    "xano_list_instances",
    "xano_get_instance_details",
    "xano_list_databases",
    "xano_get_workspace_details",
];

/// Get all instance tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "xano_list_instances",
            "List all Xano instances associated with the account. Returns \
             {\"instances\": [...]} with each instance's name and domain.",
            schema!(object {}),
        ),
        ToolDef::new(
            "xano_get_instance_details",
            "Get details for a Xano instance: domain, Meta API base URL, and \
             swagger URL. Derived from the instance name without a network call.",
            schema!(object {
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_list_databases",
            "List all databases (workspaces) in an instance. Returns \
             {\"databases\": [...]}. Use xano_get_workspace_details for one workspace.",
            schema!(object {
                optional: { "instance_name": string }
            }),
        ),
        ToolDef::new(
            "xano_get_workspace_details",
            "Get details for a specific workspace.",
            schema!(object {
                required: { "workspace_id": id },
                optional: { "instance_name": string }
            }),
        ),
    ]
}

/// Dispatch an instance tool call.
pub async fn dispatch(
    session: &XanoSession,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "xano_list_instances" => {
            let url = format!("{}/auth/me", session.global_meta_url());
            let result = session.get(&url).await?;

            // The account endpoint nests instances under "instances"; keep
            // that shape, wrapping flat payloads the same way.
            match result.get("instances") {
                Some(instances) => Ok(json!({ "instances": instances })),
                None => Ok(json!({ "instances": result })),
            }
        }

        "xano_get_instance_details" => {
            let instance = session.resolve_instance(get_optional_string(&args, "instance_name"))?;
            let domain = session.instance_domain(&instance);
            let display = instance.split('-').next().unwrap_or_default().to_uppercase();

            Ok(json!({
                "name": instance,
                "display": display,
                "xano_domain": domain,
                "rate_limit": false,
                "meta_api": session.instance_meta_url(&instance),
                "meta_swagger": format!("https://{}/apispec:meta?type=json", domain),
            }))
        }

        "xano_list_databases" => {
            let base = instance_base(session, &args)?;
            let url = format!("{}/workspace", base);
            let result = session.get(&url).await?;
            Ok(json!({ "databases": result }))
        }

        "xano_get_workspace_details" => {
            let base = instance_base(session, &args)?;
            let workspace_id = get_id_arg(&args, "workspace_id")?;

            let url = format!("{}/workspace/{}", base, workspace_id);
            session.get(&url).await
        }

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
