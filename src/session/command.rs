use crate::protocol::contracts;
use crate::store::{ParamType, ParameterId, ParameterUpdate, ToolId, ToolUpdate};
use serde_json::Value;
use thiserror::Error;

/// One user action, mapped to exactly one store or export operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTool,
    UpdateTool {
        tool_id: ToolId,
        update: ToolUpdate,
    },
    RemoveTool {
        tool_id: ToolId,
    },
    AddParameter {
        tool_id: ToolId,
    },
    UpdateParameter {
        tool_id: ToolId,
        param_id: ParameterId,
        update: ParameterUpdate,
    },
    RemoveParameter {
        tool_id: ToolId,
        param_id: ParameterId,
    },
    /// `confirm` is the caller's answer to the confirmation prompt, if one was asked.
    ClearAll {
        confirm: Option<bool>,
    },
    Show,
    Copy,
    Download,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("export failed: {0}")]
    ExportFailed(String),
    #[error("{0}")]
    Internal(String),
}

impl CommandError {
    pub fn kind(&self) -> &'static str {
        use crate::protocol::errors;
        match self {
            CommandError::InvalidInput(_) => errors::INVALID_INPUT,
            CommandError::UnknownCommand(_) => errors::UNKNOWN_COMMAND,
            CommandError::ExportFailed(_) => errors::EXPORT_FAILED,
            CommandError::Internal(_) => errors::INTERNAL_ERROR,
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        CommandError::InvalidInput(message.into())
    }
}

/// Builds a command from a stdio method name and its params object.
pub fn from_request(method: &str, params: &Value) -> Result<Command, CommandError> {
    if !params.is_object() && !params.is_null() {
        return Err(CommandError::invalid("params must be an object"));
    }

    match method {
        contracts::METHOD_TOOL_ADD => Ok(Command::AddTool),
        contracts::METHOD_TOOL_UPDATE => {
            let tool_id = parse_id(params, "tool_id")?;
            let field = parse_str(params, "field")?;
            let value = params.get("value");
            let update = match field {
                "name" => ToolUpdate::Name(string_value(value)?),
                "description" => ToolUpdate::Description(string_value(value)?),
                other => {
                    return Err(CommandError::invalid(format!(
                        "tool field must be name or description (got {other:?})"
                    )));
                }
            };
            Ok(Command::UpdateTool { tool_id, update })
        }
        contracts::METHOD_TOOL_REMOVE => Ok(Command::RemoveTool {
            tool_id: parse_id(params, "tool_id")?,
        }),
        contracts::METHOD_PARAMETER_ADD => Ok(Command::AddParameter {
            tool_id: parse_id(params, "tool_id")?,
        }),
        contracts::METHOD_PARAMETER_UPDATE => {
            let tool_id = parse_id(params, "tool_id")?;
            let param_id = parse_id(params, "param_id")?;
            let field = parse_str(params, "field")?;
            let value = params.get("value");
            let update = match field {
                "name" => ParameterUpdate::Name(string_value(value)?),
                "description" => ParameterUpdate::Description(string_value(value)?),
                "type" => ParameterUpdate::Type(
                    string_value(value)?
                        .parse::<ParamType>()
                        .map_err(CommandError::InvalidInput)?,
                ),
                "required" => {
                    let Some(required) = value.and_then(|value| value.as_bool()) else {
                        return Err(CommandError::invalid("value must be a boolean"));
                    };
                    ParameterUpdate::Required(required)
                }
                other => {
                    return Err(CommandError::invalid(format!(
                        "parameter field must be name, type, description, or required (got {other:?})"
                    )));
                }
            };
            Ok(Command::UpdateParameter {
                tool_id,
                param_id,
                update,
            })
        }
        contracts::METHOD_PARAMETER_REMOVE => Ok(Command::RemoveParameter {
            tool_id: parse_id(params, "tool_id")?,
            param_id: parse_id(params, "param_id")?,
        }),
        contracts::METHOD_CLEAR_ALL => {
            let confirm = match params.get("confirm") {
                None => None,
                Some(value) => Some(
                    value
                        .as_bool()
                        .ok_or_else(|| CommandError::invalid("confirm must be a boolean"))?,
                ),
            };
            Ok(Command::ClearAll { confirm })
        }
        contracts::METHOD_SCHEMA_GET => Ok(Command::Show),
        contracts::METHOD_SCHEMA_COPY => Ok(Command::Copy),
        contracts::METHOD_SCHEMA_DOWNLOAD => Ok(Command::Download),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

fn parse_id(params: &Value, key: &str) -> Result<u64, CommandError> {
    params
        .get(key)
        .and_then(|value| value.as_u64())
        .ok_or_else(|| CommandError::invalid(format!("{key} must be a non-negative integer")))
}

fn parse_str<'a>(params: &'a Value, key: &str) -> Result<&'a str, CommandError> {
    params
        .get(key)
        .and_then(|value| value.as_str())
        .ok_or_else(|| CommandError::invalid(format!("{key} must be a string")))
}

fn string_value(value: Option<&Value>) -> Result<String, CommandError> {
    value
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .ok_or_else(|| CommandError::invalid("value must be a string"))
}

/// Parses one editor line such as `set-param 1 2 type number`.
///
/// Free-text values take the rest of the line verbatim, so names and
/// descriptions may contain spaces. `None` means the line was blank.
pub fn parse_line(line: &str) -> Option<Result<Command, CommandError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (verb, rest) = split_word(line);
    Some(parse_words(verb, rest))
}

fn parse_words(verb: &str, rest: &str) -> Result<Command, CommandError> {
    match verb {
        "add-tool" => Ok(Command::AddTool),
        "set-tool" => {
            let (tool_id, rest) = take_id(rest, "tool id")?;
            let (field, value) = split_word(rest);
            let value = value.to_string();
            let update = match field {
                "name" => ToolUpdate::Name(value),
                "description" => ToolUpdate::Description(value),
                _ => {
                    return Err(CommandError::invalid(
                        "usage: set-tool <tool> name|description <value>",
                    ));
                }
            };
            Ok(Command::UpdateTool { tool_id, update })
        }
        "rm-tool" => {
            let (tool_id, _) = take_id(rest, "tool id")?;
            Ok(Command::RemoveTool { tool_id })
        }
        "add-param" => {
            let (tool_id, _) = take_id(rest, "tool id")?;
            Ok(Command::AddParameter { tool_id })
        }
        "set-param" => {
            let (tool_id, rest) = take_id(rest, "tool id")?;
            let (param_id, rest) = take_id(rest, "parameter id")?;
            let (field, value) = split_word(rest);
            let update = match field {
                "name" => ParameterUpdate::Name(value.to_string()),
                "description" => ParameterUpdate::Description(value.to_string()),
                "type" => ParameterUpdate::Type(
                    value
                        .trim()
                        .parse::<ParamType>()
                        .map_err(CommandError::InvalidInput)?,
                ),
                "required" => ParameterUpdate::Required(parse_flag(value.trim())?),
                _ => {
                    return Err(CommandError::invalid(
                        "usage: set-param <tool> <param> name|type|description|required <value>",
                    ));
                }
            };
            Ok(Command::UpdateParameter {
                tool_id,
                param_id,
                update,
            })
        }
        "rm-param" => {
            let (tool_id, rest) = take_id(rest, "tool id")?;
            let (param_id, _) = take_id(rest, "parameter id")?;
            Ok(Command::RemoveParameter { tool_id, param_id })
        }
        "clear" => Ok(Command::ClearAll { confirm: None }),
        "show" | "schema" => Ok(Command::Show),
        "copy" => Ok(Command::Copy),
        "download" => Ok(Command::Download),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

fn take_id<'a>(text: &'a str, what: &str) -> Result<(u64, &'a str), CommandError> {
    let (word, rest) = split_word(text);
    let id = word
        .parse::<u64>()
        .map_err(|_| CommandError::invalid(format!("{what} must be a number (got {word:?})")))?;
    Ok((id, rest))
}

fn parse_flag(value: &str) -> Result<bool, CommandError> {
    match value {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(CommandError::invalid(format!(
            "required must be true or false (got {value:?})"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_tool_update() {
        let params = json!({"tool_id": 3, "field": "name", "value": "add"});
        let command = from_request("tool.update", &params).expect("command");
        assert_eq!(
            command,
            Command::UpdateTool {
                tool_id: 3,
                update: ToolUpdate::Name("add".into())
            }
        );
    }

    #[test]
    fn request_parameter_update_type_and_required() {
        let params = json!({"tool_id": 1, "param_id": 2, "field": "type", "value": "boolean"});
        assert_eq!(
            from_request("parameter.update", &params).expect("command"),
            Command::UpdateParameter {
                tool_id: 1,
                param_id: 2,
                update: ParameterUpdate::Type(ParamType::Boolean)
            }
        );

        let params = json!({"tool_id": 1, "param_id": 2, "field": "required", "value": true});
        assert_eq!(
            from_request("parameter.update", &params).expect("command"),
            Command::UpdateParameter {
                tool_id: 1,
                param_id: 2,
                update: ParameterUpdate::Required(true)
            }
        );
    }

    #[test]
    fn request_rejects_bad_fields() {
        let params = json!({"tool_id": 1, "field": "parameters", "value": "x"});
        let err = from_request("tool.update", &params).expect_err("error");
        assert_eq!(err.kind(), "invalid_input");

        let params = json!({"tool_id": 1, "param_id": 1, "field": "type", "value": "integer"});
        let err = from_request("parameter.update", &params).expect_err("error");
        assert_eq!(err.kind(), "invalid_input");

        let params = json!({"tool_id": 1, "param_id": 1, "field": "required", "value": "yes"});
        let err = from_request("parameter.update", &params).expect_err("error");
        assert_eq!(err.kind(), "invalid_input");
    }

    #[test]
    fn request_missing_ids() {
        let err = from_request("tool.remove", &json!({})).expect_err("error");
        assert_eq!(err.kind(), "invalid_input");
        let err = from_request("parameter.remove", &json!({"tool_id": 1})).expect_err("error");
        assert_eq!(err.kind(), "invalid_input");
    }

    #[test]
    fn request_clear_all_confirm() {
        assert_eq!(
            from_request("tools.clear_all", &json!({})).expect("command"),
            Command::ClearAll { confirm: None }
        );
        assert_eq!(
            from_request("tools.clear_all", &json!({"confirm": true})).expect("command"),
            Command::ClearAll {
                confirm: Some(true)
            }
        );
    }

    #[test]
    fn request_unknown_method() {
        let err = from_request("tool.rename", &json!({})).expect_err("error");
        assert_eq!(err, CommandError::UnknownCommand("tool.rename".into()));
    }

    #[test]
    fn line_keeps_spaces_in_values() {
        let command = parse_line("set-tool 1 description Adds two  numbers")
            .expect("line")
            .expect("command");
        assert_eq!(
            command,
            Command::UpdateTool {
                tool_id: 1,
                update: ToolUpdate::Description("Adds two  numbers".into())
            }
        );
    }

    #[test]
    fn line_allows_clearing_a_value() {
        let command = parse_line("set-tool 1 name").expect("line").expect("command");
        assert_eq!(
            command,
            Command::UpdateTool {
                tool_id: 1,
                update: ToolUpdate::Name(String::new())
            }
        );
    }

    #[test]
    fn line_parameter_commands() {
        assert_eq!(
            parse_line("set-param 2 5 required yes").expect("line"),
            Ok(Command::UpdateParameter {
                tool_id: 2,
                param_id: 5,
                update: ParameterUpdate::Required(true)
            })
        );
        assert_eq!(
            parse_line("rm-param 2 5").expect("line"),
            Ok(Command::RemoveParameter {
                tool_id: 2,
                param_id: 5
            })
        );
        assert!(parse_line("set-param 2 x name a").expect("line").is_err());
    }

    #[test]
    fn blank_line_is_skipped() {
        assert!(parse_line("   ").is_none());
    }
}
