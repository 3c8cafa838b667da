use crate::schema::{self, SchemaDocument};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub type ToolId = u64;
pub type ParameterId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParamType {
    pub const ALL: [ParamType; 5] = [
        ParamType::String,
        ParamType::Number,
        ParamType::Boolean,
        ParamType::Array,
        ParamType::Object,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ParamType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| {
                format!("type must be one of string, number, boolean, array, object (got {value:?})")
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub id: ParameterId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamType,
    pub description: String,
    pub required: bool,
}

impl Parameter {
    fn new(id: ParameterId) -> Self {
        Self {
            id,
            name: String::new(),
            kind: ParamType::default(),
            description: String::new(),
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tool {
    pub id: ToolId,
    pub name: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
    #[serde(skip)]
    next_param_id: ParameterId,
}

impl Tool {
    fn new(id: ToolId) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            parameters: Vec::new(),
            next_param_id: 0,
        }
    }

    pub fn parameter(&self, param_id: ParameterId) -> Option<&Parameter> {
        self.parameters.iter().find(|param| param.id == param_id)
    }

    fn parameter_mut(&mut self, param_id: ParameterId) -> Option<&mut Parameter> {
        self.parameters.iter_mut().find(|param| param.id == param_id)
    }
}

/// A single-field edit of a [`Tool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolUpdate {
    Name(String),
    Description(String),
}

/// A single-field edit of a [`Parameter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterUpdate {
    Name(String),
    Type(ParamType),
    Description(String),
    Required(bool),
}

/// Ordered, in-memory collection of tool definitions.
///
/// Lookups by id that miss are silent no-ops: a stale id from the UI is an
/// expected race, so the mutators report `false` instead of failing.
#[derive(Debug, Default)]
pub struct ToolSetStore {
    tools: Vec<Tool>,
    tool_counter: ToolId,
}

impl ToolSetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn tool(&self, tool_id: ToolId) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.id == tool_id)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    fn tool_mut(&mut self, tool_id: ToolId) -> Option<&mut Tool> {
        self.tools.iter_mut().find(|tool| tool.id == tool_id)
    }

    pub fn add_tool(&mut self) -> &Tool {
        self.tool_counter += 1;
        let index = self.tools.len();
        self.tools.push(Tool::new(self.tool_counter));
        &self.tools[index]
    }

    pub fn update_tool(&mut self, tool_id: ToolId, update: ToolUpdate) -> bool {
        let Some(tool) = self.tool_mut(tool_id) else {
            return false;
        };
        match update {
            ToolUpdate::Name(name) => tool.name = name,
            ToolUpdate::Description(description) => tool.description = description,
        }
        true
    }

    pub fn remove_tool(&mut self, tool_id: ToolId) -> bool {
        let before = self.tools.len();
        self.tools.retain(|tool| tool.id != tool_id);
        self.tools.len() != before
    }

    pub fn add_parameter(&mut self, tool_id: ToolId) -> Option<&Parameter> {
        let tool = self.tool_mut(tool_id)?;
        tool.next_param_id += 1;
        let index = tool.parameters.len();
        tool.parameters.push(Parameter::new(tool.next_param_id));
        Some(&tool.parameters[index])
    }

    pub fn update_parameter(
        &mut self,
        tool_id: ToolId,
        param_id: ParameterId,
        update: ParameterUpdate,
    ) -> bool {
        let Some(param) = self
            .tool_mut(tool_id)
            .and_then(|tool| tool.parameter_mut(param_id))
        else {
            return false;
        };
        match update {
            ParameterUpdate::Name(name) => param.name = name,
            ParameterUpdate::Type(kind) => param.kind = kind,
            ParameterUpdate::Description(description) => param.description = description,
            ParameterUpdate::Required(required) => param.required = required,
        }
        true
    }

    pub fn remove_parameter(&mut self, tool_id: ToolId, param_id: ParameterId) -> bool {
        let Some(tool) = self.tool_mut(tool_id) else {
            return false;
        };
        let before = tool.parameters.len();
        tool.parameters.retain(|param| param.id != param_id);
        tool.parameters.len() != before
    }

    /// Drops every tool and restarts id assignment from the beginning.
    pub fn clear_all(&mut self) {
        self.tools.clear();
        self.tool_counter = 0;
    }

    pub fn generate_schema(&self) -> SchemaDocument {
        schema::generate(&self.tools)
    }
}
