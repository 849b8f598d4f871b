//! Line-oriented session
//!
//! Drives a [`TagInput`] from text lines, the way an input field, its submit
//! button and the chip delete buttons would. Plain lines are submitted;
//! lines starting with `:` are commands.

use std::io::{self, BufRead, Write};

use tabled::{builder::Builder, settings::Style};
use tracing::{debug, info};

use crate::{
    config::TagInputConfig,
    input::split_candidates,
    observer::{EventLog, TagEvent},
    render::{ChipTemplate, ChipView},
    widget::TagInput,
};

const USAGE: &str =
    "commands: :rm TAG, :set A,B,..., :clear, :disable, :enable, :list, :html, :quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit raw text, possibly holding several delimited tags.
    Submit(String),

    /// Delete one chip.
    Remove(String),

    /// Add a delimited list of tags, keeping the existing ones.
    Set(String),

    /// Remove every tag.
    Clear,

    /// Make the widget read-only.
    Disable,

    /// Make the widget editable.
    Enable,

    /// Print the tags as a table.
    List,

    /// Print the rendered chip markup.
    Html,

    /// End the session.
    Quit,

    /// An unrecognised `:` command.
    Unknown(String),
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Self {
        let Some(command) = line.trim_start().strip_prefix(':') else {
            return Self::Submit(line.to_string());
        };

        let (name, argument) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, argument)| (name, argument.trim()));

        match name.trim_end() {
            "rm" | "remove" => Self::Remove(argument.to_string()),
            "set" => Self::Set(argument.to_string()),
            "clear" => Self::Clear,
            "disable" => Self::Disable,
            "enable" => Self::Enable,
            "list" | "ls" => Self::List,
            "html" => Self::Html,
            "quit" | "q" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Whether the session should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,

    /// Stop reading.
    Quit,
}

/// A tag input wired to an event log and a chip view.
#[derive(Debug)]
pub struct Session {
    input: TagInput<(EventLog, ChipView)>,
}

impl Session {
    /// Create a session for `config`.
    #[must_use]
    pub fn new(config: &TagInputConfig) -> Self {
        let view = ChipView::new(ChipTemplate::from_config(config));

        Self {
            input: TagInput::with_observer(config.limit, (EventLog::new(), view)),
        }
    }

    /// The driven widget.
    pub fn input(&self) -> &TagInput<(EventLog, ChipView)> {
        &self.input
    }

    /// The chip view kept in sync with the widget.
    pub fn view(&self) -> &ChipView {
        &self.input.observer().1
    }

    /// Read lines from `reader` until end of input or `:quit`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from reading or writing.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, out: &mut W) -> io::Result<()> {
        info!(limit = self.input.collection().limit(), "tag input session started");

        for line in reader.lines() {
            let command = Command::parse(&line?);

            if self.execute(command, out)? == Flow::Quit {
                break;
            }
        }

        out.flush()
    }

    /// Run one command, writing its results to `out`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from writing.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        debug!(?command, "executing session command");

        let result = match command {
            Command::Submit(raw) => self.input.submit(&raw).map(drop),
            Command::Remove(tag) => self.input.remove(&tag).map(drop),
            Command::Set(list) => self.input.bulk_set(split_candidates(&list)).map(drop),
            Command::Clear => self.input.clear(),
            Command::Disable => {
                self.input.disable();
                Ok(())
            }
            Command::Enable => {
                self.input.enable();
                Ok(())
            }
            Command::List => {
                self.write_table(out)?;
                return Ok(Flow::Continue);
            }
            Command::Html => {
                writeln!(out, "{}", self.view().html())?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(name) => {
                writeln!(out, "unknown command :{name}")?;
                writeln!(out, "{USAGE}")?;
                return Ok(Flow::Continue);
            }
        };

        if let Err(error) = result {
            writeln!(out, "{error}")?;
        }

        let error_shown = self.write_events(out)?;
        let message = self.input.last_error_message();

        if !error_shown && !message.is_empty() {
            writeln!(out, "! {message}")?;
        }

        Ok(Flow::Continue)
    }

    /// Print the drained events, returning whether an error line was written.
    fn write_events<W: Write>(&mut self, out: &mut W) -> io::Result<bool> {
        let mut error_shown = false;

        for event in self.input.observer_mut().0.drain() {
            match event {
                TagEvent::TagAdded(tag) => writeln!(out, "+ {tag}")?,
                TagEvent::TagRemoved(tag) => writeln!(out, "- {tag}")?,
                TagEvent::ViewCleared => writeln!(out, "cleared")?,
                TagEvent::ErrorChanged(message) if !message.is_empty() => {
                    writeln!(out, "! {message}")?;
                    error_shown = true;
                }
                TagEvent::ModeChanged(mode) => writeln!(out, "mode: {mode}")?,
                TagEvent::ErrorChanged(_) | TagEvent::InputCleared => {}
            }
        }

        Ok(error_shown)
    }

    fn write_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let tags = self.input.tags();

        if tags.is_empty() {
            return writeln!(out, "no tags ({})", self.input.mode());
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Tag"]);

        for (position, tag) in tags.iter().enumerate() {
            builder.push_record([(position + 1).to_string(), tag.to_string()]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());

        writeln!(out, "{table}")?;
        writeln!(
            out,
            "{}/{} tags ({})",
            tags.len(),
            self.input.collection().limit(),
            self.input.mode()
        )
    }
}
