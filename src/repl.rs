use crate::render;
use crate::session::{CLEAR_ALL_PROMPT, Command, Session, command};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::warn;

const HELP: &str = "\
commands:
  add-tool                                   add an empty tool
  set-tool <tool> name|description <value>   edit a tool field
  rm-tool <tool>                             remove a tool and its parameters
  add-param <tool>                           add a string parameter
  set-param <tool> <param> name|type|description|required <value>
  rm-param <tool> <param>                    remove a parameter
  clear                                      remove every tool
  show                                       print the form and schema
  copy                                       copy the schema to the clipboard
  download                                   save the schema file
  help | quit";

/// Line-oriented editor: each input line is one command, and the form and
/// schema are re-rendered after every edit.
pub fn run_editor<R: BufRead, W: Write>(
    session: &mut Session,
    reader: &mut R,
    writer: &mut W,
    interactive: bool,
) -> Result<()> {
    if interactive {
        writeln!(writer, "type `help` for commands")?;
    }

    loop {
        if interactive {
            write!(writer, "> ")?;
            writer.flush()?;
        }
        let mut line = String::new();
        if reader.read_line(&mut line).context("failed to read input")? == 0 {
            break;
        }

        match line.trim() {
            "quit" | "exit" => break,
            "help" => {
                writeln!(writer, "{HELP}")?;
                continue;
            }
            _ => {}
        }

        let command = match command::parse_line(&line) {
            None => continue,
            Some(Ok(command)) => command,
            Some(Err(err)) => {
                writeln!(writer, "error: {err}")?;
                continue;
            }
        };

        let command = match command {
            Command::ClearAll { confirm: None } if !session.assume_yes() => Command::ClearAll {
                confirm: Some(prompt_yes_no(reader, writer, CLEAR_ALL_PROMPT)?),
            },
            other => other,
        };

        let show = command == Command::Show;
        match session.execute(command) {
            Ok(outcome) => {
                writeln!(writer, "{}", outcome.summary())?;
                if show || outcome.changed_store() {
                    draw(session, writer)?;
                }
            }
            Err(err) => {
                warn!(kind = err.kind(), "command failed: {err}");
                writeln!(writer, "error: {err}")?;
            }
        }
        writer.flush()?;
    }

    Ok(())
}

fn draw<W: Write>(session: &Session, writer: &mut W) -> Result<()> {
    write!(writer, "{}", render::render_tools(session.store().tools()))?;
    writeln!(writer, "{}", session.schema_text()?)?;
    Ok(())
}

/// Asks a yes/no question; anything but `y`/`yes` (or end of input) is a no.
pub fn prompt_yes_no<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
) -> Result<bool> {
    write!(writer, "{question} [y/N] ")?;
    writer.flush()?;
    let mut answer = String::new();
    reader
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
