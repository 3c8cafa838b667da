use serde_json::json;

pub mod contracts;
pub mod errors;

pub fn method_definitions() -> Vec<serde_json::Value> {
    vec![
        json!({
            "name": contracts::METHOD_TOOL_ADD,
            "description": "Append an empty tool definition.",
            "paramsSchema": contracts::empty_schema()
        }),
        json!({
            "name": contracts::METHOD_TOOL_UPDATE,
            "description": "Set one field of a tool.",
            "paramsSchema": contracts::tool_update_schema()
        }),
        json!({
            "name": contracts::METHOD_TOOL_REMOVE,
            "description": "Remove a tool and all of its parameters.",
            "paramsSchema": contracts::tool_id_schema()
        }),
        json!({
            "name": contracts::METHOD_PARAMETER_ADD,
            "description": "Append an empty string parameter to a tool.",
            "paramsSchema": contracts::tool_id_schema()
        }),
        json!({
            "name": contracts::METHOD_PARAMETER_UPDATE,
            "description": "Set one field of a parameter.",
            "paramsSchema": contracts::parameter_update_schema()
        }),
        json!({
            "name": contracts::METHOD_PARAMETER_REMOVE,
            "description": "Remove a parameter from a tool.",
            "paramsSchema": contracts::parameter_id_schema()
        }),
        json!({
            "name": contracts::METHOD_CLEAR_ALL,
            "description": "Remove every tool and restart id numbering. Requires confirmation.",
            "paramsSchema": contracts::clear_all_schema()
        }),
        json!({
            "name": contracts::METHOD_SCHEMA_GET,
            "description": "Return the current function-calling schema.",
            "paramsSchema": contracts::empty_schema()
        }),
        json!({
            "name": contracts::METHOD_SCHEMA_COPY,
            "description": "Copy the schema JSON to the system clipboard.",
            "paramsSchema": contracts::empty_schema()
        }),
        json!({
            "name": contracts::METHOD_SCHEMA_DOWNLOAD,
            "description": "Save the schema JSON to the export directory.",
            "paramsSchema": contracts::empty_schema()
        }),
    ]
}
