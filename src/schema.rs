use crate::store::Tool;
use serde::Serialize;
use serde_json::{Map, Value, json};

pub const UNNAMED_FUNCTION: &str = "unnamed_function";
pub const NO_DESCRIPTION: &str = "No description provided";

/// The exported document: one function-calling entry per tool, in tool order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemaDocument(pub Vec<FunctionTool>);

impl SchemaDocument {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| json!([]))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionTool {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: ParametersSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParametersSchema {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub strict: bool,
    pub properties: Map<String, Value>,
    pub required: Vec<String>,
    pub additional_properties: bool,
}

pub fn generate(tools: &[Tool]) -> SchemaDocument {
    SchemaDocument(tools.iter().map(function_tool).collect())
}

fn function_tool(tool: &Tool) -> FunctionTool {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in tool.parameters.iter().filter(|param| !param.name.is_empty()) {
        let mut property = Map::new();
        property.insert("type".to_string(), json!(param.kind.as_str()));
        if !param.description.is_empty() {
            property.insert("description".to_string(), json!(param.description));
        }
        // A repeated name replaces the earlier entry but keeps its position.
        properties.insert(param.name.clone(), Value::Object(property));

        if param.required {
            required.push(param.name.clone());
        }
    }

    FunctionTool {
        kind: "function",
        function: FunctionSpec {
            name: non_empty_or(&tool.name, UNNAMED_FUNCTION),
            description: non_empty_or(&tool.description, NO_DESCRIPTION),
            parameters: ParametersSchema {
                kind: "object",
                strict: true,
                properties,
                required,
                additional_properties: false,
            },
        },
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
