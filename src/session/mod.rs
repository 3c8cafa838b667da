use crate::export::{ClipboardWriter, EXPORT_FILENAME, EXPORT_MIME, FileExporter};
use crate::schema::SchemaDocument;
use crate::store::{Parameter, Tool, ToolId, ToolSetStore};
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::{debug, info};

pub mod command;

pub use command::{Command, CommandError};

pub const CLEAR_ALL_PROMPT: &str = "Are you sure you want to clear all tools?";

/// What a command did, for the rendering layer to report.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    ToolAdded(Tool),
    /// `None` when the owning tool no longer exists.
    ParameterAdded {
        tool_id: ToolId,
        parameter: Option<Parameter>,
    },
    /// Update or removal; `applied` is false when the target was already gone.
    Changed { applied: bool },
    Cleared { cleared: bool },
    Schema,
    Copied { bytes_len: usize },
    Downloaded { path: PathBuf, bytes_len: usize },
}

/// The application context: the store plus the collaborators it exports through.
///
/// The published schema is re-derived after every command that changed the
/// store, so readers never see a document older than the last edit.
pub struct Session {
    store: ToolSetStore,
    schema: SchemaDocument,
    clipboard: Box<dyn ClipboardWriter>,
    exporter: Box<dyn FileExporter>,
    export_filename: String,
    assume_yes: bool,
}

impl Session {
    pub fn new(clipboard: Box<dyn ClipboardWriter>, exporter: Box<dyn FileExporter>) -> Self {
        let store = ToolSetStore::new();
        let schema = store.generate_schema();
        Self {
            store,
            schema,
            clipboard,
            exporter,
            export_filename: EXPORT_FILENAME.to_string(),
            assume_yes: false,
        }
    }

    pub fn with_export_filename(mut self, filename: impl Into<String>) -> Self {
        self.export_filename = filename.into();
        self
    }

    /// Treat an unanswered clear-all confirmation as accepted.
    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn assume_yes(&self) -> bool {
        self.assume_yes
    }

    pub fn store(&self) -> &ToolSetStore {
        &self.store
    }

    pub fn schema(&self) -> &SchemaDocument {
        &self.schema
    }

    pub fn schema_text(&self) -> Result<String, CommandError> {
        self.schema
            .to_pretty_json()
            .map_err(|err| CommandError::Internal(format!("failed to serialize schema: {err}")))
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, CommandError> {
        debug!(?command, "executing");
        let outcome = self.apply(command)?;
        if outcome.changed_store() {
            self.publish();
        }
        Ok(outcome)
    }

    fn apply(&mut self, command: Command) -> Result<Outcome, CommandError> {
        let outcome = match command {
            Command::AddTool => Outcome::ToolAdded(self.store.add_tool().clone()),
            Command::UpdateTool { tool_id, update } => Outcome::Changed {
                applied: self.store.update_tool(tool_id, update),
            },
            Command::RemoveTool { tool_id } => Outcome::Changed {
                applied: self.store.remove_tool(tool_id),
            },
            Command::AddParameter { tool_id } => Outcome::ParameterAdded {
                tool_id,
                parameter: self.store.add_parameter(tool_id).cloned(),
            },
            Command::UpdateParameter {
                tool_id,
                param_id,
                update,
            } => Outcome::Changed {
                applied: self.store.update_parameter(tool_id, param_id, update),
            },
            Command::RemoveParameter { tool_id, param_id } => Outcome::Changed {
                applied: self.store.remove_parameter(tool_id, param_id),
            },
            Command::ClearAll { confirm } => {
                let cleared = confirm.unwrap_or(self.assume_yes);
                if cleared {
                    self.store.clear_all();
                    info!("cleared all tools");
                } else {
                    info!("clear all declined");
                }
                Outcome::Cleared { cleared }
            }
            Command::Show => Outcome::Schema,
            Command::Copy => {
                let text = self.schema_text()?;
                self.clipboard.write_text(&text);
                Outcome::Copied {
                    bytes_len: text.len(),
                }
            }
            Command::Download => {
                let text = self.schema_text()?;
                let path = self
                    .exporter
                    .save(&self.export_filename, EXPORT_MIME, &text)
                    .map_err(|err| CommandError::ExportFailed(err.to_string()))?;
                Outcome::Downloaded {
                    path,
                    bytes_len: text.len(),
                }
            }
        };
        Ok(outcome)
    }

    fn publish(&mut self) {
        self.schema = self.store.generate_schema();
        debug!(tools = self.schema.len(), "schema updated");
    }
}

impl Outcome {
    /// False for exports and for edits whose target was already gone.
    pub fn changed_store(&self) -> bool {
        match self {
            Outcome::ToolAdded(_) => true,
            Outcome::ParameterAdded { parameter, .. } => parameter.is_some(),
            Outcome::Changed { applied } => *applied,
            Outcome::Cleared { cleared } => *cleared,
            Outcome::Schema | Outcome::Copied { .. } | Outcome::Downloaded { .. } => false,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Outcome::ToolAdded(tool) => format!("added tool {}", tool.id),
            Outcome::ParameterAdded {
                tool_id,
                parameter: Some(parameter),
            } => format!("added parameter {} to tool {tool_id}", parameter.id),
            Outcome::ParameterAdded {
                tool_id,
                parameter: None,
            } => format!("tool {tool_id} not found"),
            Outcome::Changed { applied: true } => "updated".to_string(),
            Outcome::Changed { applied: false } => "nothing to update".to_string(),
            Outcome::Cleared { cleared: true } => "cleared all tools".to_string(),
            Outcome::Cleared { cleared: false } => "clear cancelled".to_string(),
            Outcome::Schema => "schema".to_string(),
            Outcome::Copied { bytes_len } => format!("copied schema ({bytes_len} bytes)"),
            Outcome::Downloaded { path, bytes_len } => {
                format!("schema written to {} ({bytes_len} bytes)", path.display())
            }
        }
    }

    /// Wraps the outcome in the `content` / `structuredContent` result envelope.
    pub fn to_result(&self, schema: &SchemaDocument) -> Value {
        let mut structured = match self {
            Outcome::ToolAdded(tool) => json!({ "tool": tool }),
            Outcome::ParameterAdded { tool_id, parameter } => json!({
                "tool_id": tool_id,
                "parameter": parameter
            }),
            Outcome::Changed { applied } => json!({ "applied": applied }),
            Outcome::Cleared { cleared } => json!({ "cleared": cleared }),
            Outcome::Schema => json!({}),
            Outcome::Copied { bytes_len } => json!({ "bytes_len": bytes_len }),
            Outcome::Downloaded { path, bytes_len } => json!({
                "path": path.to_string_lossy(),
                "mimeType": EXPORT_MIME,
                "bytes_len": bytes_len
            }),
        };
        if let Some(obj) = structured.as_object_mut() {
            obj.insert("schema".to_string(), schema.to_value());
        }

        json!({
            "content": [{"type": "text", "text": self.summary()}],
            "structuredContent": structured,
            "isError": false
        })
    }
}

pub fn error_result(error: &CommandError, source: Option<&str>) -> Value {
    let message = error.to_string();
    let mut body = json!({
        "kind": error.kind(),
        "message": message,
    });

    if let Some(source) = source
        && let Some(obj) = body.as_object_mut()
    {
        obj.insert("source".to_string(), json!(source));
    }

    json!({
        "content": [{"type": "text", "text": format!("Error: {message}")}],
        "structuredContent": {"error": body},
        "isError": true
    })
}
