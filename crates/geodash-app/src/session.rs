//! Line-oriented command session driving the view coordinator

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use geodash_core::events::Applied;
use geodash_core::{InputEvent, RecordId, ViewCoordinator};
use tracing::debug;

use crate::render::render_view;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Input(InputEvent),
    NextPage,
    PreviousPage,
    Show,
    Json,
    Help,
    Quit,
}

/// Parse one command line; blank lines and `#` comments yield `None`
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        // search text is taken verbatim after the first space
        "search" => Command::Input(InputEvent::search(rest)),
        "page" => Command::Input(InputEvent::PageChanged(parse_number(word, rest)?)),
        "size" => Command::Input(InputEvent::PageSizeChanged(parse_number(word, rest)?)),
        "select" => Command::Input(InputEvent::row_clicked(parse_id(word, rest)?)),
        "marker" => Command::Input(InputEvent::marker_clicked(parse_id(word, rest)?)),
        "clear" => Command::Input(InputEvent::SelectionCleared),
        "next" => Command::NextPage,
        "prev" => Command::PreviousPage,
        "show" => Command::Show,
        "json" => Command::Json,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{}'", other),
    };
    Ok(Some(command))
}

fn parse_number(word: &str, rest: &str) -> Result<usize> {
    match rest.trim().parse() {
        Ok(n) => Ok(n),
        Err(_) => bail!("{} expects a number, got '{}'", word, rest.trim()),
    }
}

fn parse_id(word: &str, rest: &str) -> Result<RecordId> {
    if rest.trim().is_empty() {
        bail!("{} expects a record id", word);
    }
    Ok(RecordId::parse(rest))
}

/// Run commands from `input` until it ends or `quit` is read
pub fn run_session<R: BufRead, W: Write>(
    view: &mut ViewCoordinator,
    input: R,
    out: &mut W,
) -> Result<()> {
    render_view(&view.snapshot(), out)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "error: {}", err)?;
                continue;
            }
        };
        debug!(?command, "Session command");

        let event = match command {
            Command::Input(event) => event,
            Command::NextPage => {
                let page = view.page_info();
                if !page.has_next() {
                    writeln!(out, "rejected: already on the last page")?;
                    continue;
                }
                InputEvent::PageChanged(page.page_index + 1)
            }
            Command::PreviousPage => {
                let page = view.page_info();
                if !page.has_previous() {
                    writeln!(out, "rejected: already on the first page")?;
                    continue;
                }
                InputEvent::PageChanged(page.page_index - 1)
            }
            Command::Show => {
                render_view(&view.snapshot(), out)?;
                continue;
            }
            Command::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&view.snapshot())?)?;
                continue;
            }
            Command::Help => {
                crate::cli::print_help();
                continue;
            }
            Command::Quit => break,
        };

        match view.handle(event) {
            Ok(Applied::Changed) => render_view(&view.snapshot(), out)?,
            Ok(Applied::Unchanged) => writeln!(out, "unchanged")?,
            Err(err) => writeln!(out, "rejected: {}", err)?,
        }
    }
    Ok(())
}
