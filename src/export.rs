use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const EXPORT_FILENAME: &str = "ai-tools.json";
pub const EXPORT_MIME: &str = "application/json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported mime type: {0}")]
    UnsupportedMime(String),
    #[error("filename must be a plain file name: {0:?}")]
    InvalidFilename(String),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Places text on the system clipboard. Failures are logged, never returned.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str);
}

/// Saves exported text under a file name.
pub trait FileExporter {
    fn save(&mut self, filename: &str, mime: &str, contents: &str) -> Result<PathBuf, ExportError>;
}

/// Pipes clipboard text into an external program such as `pbcopy`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    argv: Vec<String>,
}

impl CommandClipboard {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    /// Picks a clipboard program for the current platform.
    pub fn detect() -> Self {
        let argv: Vec<&str> = if cfg!(target_os = "macos") {
            vec!["pbcopy"]
        } else if cfg!(target_os = "windows") {
            vec!["clip"]
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            vec!["wl-copy"]
        } else {
            vec!["xclip", "-selection", "clipboard"]
        };
        Self::new(argv.into_iter().map(String::from).collect())
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    fn pipe(&self, text: &str) -> io::Result<()> {
        let Some((program, args)) = self.argv.split_first() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "clipboard command is empty",
            ));
        };
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        // stdin must be closed and the child reaped even when the write fails.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait()?;
        written?;
        if !status.success() {
            return Err(io::Error::other(format!("{program} exited with {status}")));
        }
        Ok(())
    }
}

impl ClipboardWriter for CommandClipboard {
    fn write_text(&mut self, text: &str) {
        match self.pipe(text) {
            Ok(()) => debug!(bytes = text.len(), "copied schema to clipboard"),
            Err(err) => warn!(command = ?self.argv, "clipboard write failed: {err}"),
        }
    }
}

/// Writes exports into a fixed directory.
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    directory: PathBuf,
}

impl DirectoryExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl FileExporter for DirectoryExporter {
    fn save(&mut self, filename: &str, mime: &str, contents: &str) -> Result<PathBuf, ExportError> {
        if mime != EXPORT_MIME {
            return Err(ExportError::UnsupportedMime(mime.to_string()));
        }
        let name = Path::new(filename);
        if filename.is_empty() || name.file_name().and_then(|value| value.to_str()) != Some(filename) {
            return Err(ExportError::InvalidFilename(filename.to_string()));
        }

        let path = self.directory.join(name);
        std::fs::write(&path, contents).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = contents.len(), "exported schema");
        Ok(path)
    }
}
