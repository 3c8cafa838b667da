use serde_json::json;

pub const METHOD_TOOL_ADD: &str = "tool.add";
pub const METHOD_TOOL_UPDATE: &str = "tool.update";
pub const METHOD_TOOL_REMOVE: &str = "tool.remove";
pub const METHOD_PARAMETER_ADD: &str = "parameter.add";
pub const METHOD_PARAMETER_UPDATE: &str = "parameter.update";
pub const METHOD_PARAMETER_REMOVE: &str = "parameter.remove";
pub const METHOD_CLEAR_ALL: &str = "tools.clear_all";
pub const METHOD_SCHEMA_GET: &str = "schema.get";
pub const METHOD_SCHEMA_COPY: &str = "schema.copy";
pub const METHOD_SCHEMA_DOWNLOAD: &str = "schema.download";

pub fn empty_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {},
        "additionalProperties": false
    })
}

pub fn tool_id_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "tool_id": { "type": "integer", "minimum": 1 }
        },
        "required": ["tool_id"],
        "additionalProperties": false
    })
}

pub fn tool_update_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "tool_id": { "type": "integer", "minimum": 1 },
            "field": { "type": "string", "enum": ["name", "description"] },
            "value": { "type": "string" }
        },
        "required": ["tool_id", "field", "value"],
        "additionalProperties": false
    })
}

pub fn parameter_id_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "tool_id": { "type": "integer", "minimum": 1 },
            "param_id": { "type": "integer", "minimum": 1 }
        },
        "required": ["tool_id", "param_id"],
        "additionalProperties": false
    })
}

pub fn parameter_update_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "tool_id": { "type": "integer", "minimum": 1 },
            "param_id": { "type": "integer", "minimum": 1 },
            "field": {
                "type": "string",
                "enum": ["name", "type", "description", "required"]
            },
            "value": {
                "oneOf": [
                    { "type": "string" },
                    { "type": "boolean" }
                ]
            }
        },
        "required": ["tool_id", "param_id", "field", "value"],
        "additionalProperties": false
    })
}

pub fn clear_all_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "confirm": { "type": "boolean" }
        },
        "additionalProperties": false
    })
}
