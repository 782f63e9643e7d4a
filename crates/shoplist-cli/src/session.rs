//! Line-oriented shopping-list session.
//!
//! Each input line is one user action, parsed with clap in multicall mode so
//! the first word picks the command. Commands that take free text get the
//! rest of the line as a single argument, spacing included. The session owns the store and redraws
//! the list whenever the store reports an item change.

use std::cell::Cell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use shoplist_core::export::{
    self, render_items_export, render_json_export, suggested_export_file_name,
};
use shoplist_core::{ItemId, ShareSheet, ShoppingListStore, StoreEvent};

use crate::commands::common::{format_category_lines, format_item_lines, join_words};
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    /// Open the compose view for a new item
    New,
    /// Close the compose view, keeping the draft
    Dismiss,
    /// Set the draft item name
    Name {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Type a category for the draft (not checked against the set)
    Category {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Pick a known category for the draft
    Select {
        #[arg(required = true, trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// Register a category; uses the draft's category text when omitted
    AddCategory {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        name: Vec<String>,
    },
    /// Set the draft reminder: YYYY-MM-DD, RFC 3339, or `cancel`
    Remind { date: String },
    /// Add the draft to the list, optionally setting its name first
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        name: Vec<String>,
    },
    /// Flip an item's completion by position, id, or id prefix
    Toggle { item: String },
    /// Delete an item by position, id, or id prefix
    Remove { item: String },
    /// Show the list
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show known categories
    Categories,
    /// Share the list as text
    Share,
    /// Export the list
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,
        /// Output file, or a directory to drop a timestamped file into
        /// (session output when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Text,
    Json,
    Markdown,
}

impl From<ExportFormat> for export::ExportFormat {
    fn from(value: ExportFormat) -> Self {
        match value {
            ExportFormat::Text => Self::Text,
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

/// Commands whose argument is the raw remainder of the line.
const FREE_TEXT_COMMANDS: [&str; 5] = ["name", "category", "select", "add-category", "add"];

/// Split a session line into clap arguments.
///
/// Free-text commands keep the remainder verbatim as one argument; all other
/// commands split on whitespace.
pub fn split_session_line(line: &str) -> Vec<String> {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    if FREE_TEXT_COMMANDS.contains(&command) {
        let mut args = vec![command.to_string()];
        if !rest.is_empty() {
            args.push(rest.to_string());
        }
        return args;
    }
    line.split_whitespace().map(str::to_string).collect()
}

/// Whether the session should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<S> {
    store: ShoppingListStore,
    sheet: S,
    items_changed: Rc<Cell<bool>>,
    render_after_change: bool,
}

impl<S: ShareSheet> Session<S> {
    pub fn new(mut store: ShoppingListStore, sheet: S, render_after_change: bool) -> Self {
        let items_changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&items_changed);
        store.subscribe(move |event| {
            if matches!(
                event,
                StoreEvent::ItemAdded(_) | StoreEvent::ItemToggled { .. } | StoreEvent::ItemRemoved(_)
            ) {
                flag.set(true);
            }
        });

        Self {
            store,
            sheet,
            items_changed,
            render_after_change,
        }
    }

    #[cfg(test)]
    pub const fn store(&self) -> &ShoppingListStore {
        &self.store
    }

    #[cfg(test)]
    pub const fn sheet(&self) -> &S {
        &self.sheet
    }

    /// Run one input line. Validation and share failures are written to
    /// `out` as notices; only output and config errors are returned.
    pub async fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow, CliError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let command = match SessionLine::try_parse_from(split_session_line(line)) {
            Ok(parsed) => parsed.command,
            Err(error) => {
                write!(out, "{error}")?;
                return Ok(Flow::Continue);
            }
        };

        self.items_changed.set(false);
        let flow = match self.apply(command, out).await {
            Ok(flow) => flow,
            Err(error) if error.is_user_notice() => {
                writeln!(out, "Error: {error}")?;
                Flow::Continue
            }
            Err(error) => return Err(error),
        };

        if self.render_after_change && self.items_changed.get() {
            for rendered in format_item_lines(self.store.items()) {
                writeln!(out, "{rendered}")?;
            }
        }
        Ok(flow)
    }

    async fn apply<W: Write>(
        &mut self,
        command: SessionCommand,
        out: &mut W,
    ) -> Result<Flow, CliError> {
        match command {
            SessionCommand::New => self.store.open_compose(),
            SessionCommand::Dismiss => self.store.dismiss_compose(),
            SessionCommand::Name { text } => self.store.set_draft_name(join_words(&text)),
            SessionCommand::Category { text } => {
                self.store.set_draft_category(join_words(&text));
            }
            SessionCommand::Select { name } => self.store.select_category(&join_words(&name))?,
            SessionCommand::AddCategory { name } => {
                if name.is_empty() {
                    self.store.add_category_from_draft()?;
                } else {
                    self.store.add_category(&join_words(&name))?;
                }
                writeln!(out, "Category: {}", self.store.draft().category)?;
            }
            SessionCommand::Remind { date } => {
                let reminder = parse_reminder(&date)?;
                self.store.set_draft_reminder(reminder);
            }
            SessionCommand::Add { name } => {
                if !name.is_empty() {
                    self.store.set_draft_name(join_words(&name));
                }
                let id = self.store.add_item()?;
                writeln!(out, "{id}")?;
            }
            SessionCommand::Toggle { item } => {
                if let Some(id) = resolve_item_ref(&self.store, &item) {
                    self.store.toggle_completion(&id);
                }
            }
            SessionCommand::Remove { item } => {
                if let Some(id) = resolve_item_ref(&self.store, &item) {
                    self.store.remove_item(&id);
                }
            }
            SessionCommand::List { json } => {
                if json {
                    writeln!(out, "{}", render_json_export(self.store.items())?)?;
                } else {
                    for rendered in format_item_lines(self.store.items()) {
                        writeln!(out, "{rendered}")?;
                    }
                }
            }
            SessionCommand::Categories => {
                let lines =
                    format_category_lines(self.store.categories(), &self.store.draft().category);
                for rendered in lines {
                    writeln!(out, "{rendered}")?;
                }
            }
            SessionCommand::Share => {
                out.flush()?;
                self.store.share_list(&self.sheet).await?;
            }
            SessionCommand::Export { format, output } => {
                let rendered = render_items_export(self.store.items(), format.into())?;
                if let Some(mut path) = output {
                    if path.is_dir() {
                        let millis = Utc::now().timestamp_millis();
                        path.push(suggested_export_file_name(format.into(), millis));
                    }
                    std::fs::write(&path, rendered).map_err(|error| {
                        CliError::ExportFailed(format!("{}: {error}", path.display()))
                    })?;
                    writeln!(out, "{}", path.display())?;
                } else {
                    writeln!(out, "{rendered}")?;
                }
            }
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

/// Parse a date-picker answer. `cancel` leaves the draft untouched.
pub fn parse_reminder(raw: &str) -> Result<Option<DateTime<Utc>>, CliError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("cancel") {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc()));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| Some(parsed.with_timezone(&Utc)))
        .map_err(|_| CliError::InvalidDate(raw.to_string()))
}

/// Resolve a 1-based position, full id, or unique id prefix.
///
/// An all-digit reference is always a position, even when it would also be
/// a valid id prefix; use a prefix with at least one hex letter to reach an
/// item by id. Anything that does not point at exactly one item resolves to `None`,
/// which callers treat as a no-op.
pub fn resolve_item_ref(store: &ShoppingListStore, raw: &str) -> Option<ItemId> {
    let raw = raw.trim();
    if let Ok(position) = raw.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| store.items().get(index))
            .map(|item| item.id);
    }
    if let Ok(id) = raw.parse::<ItemId>() {
        return Some(id);
    }

    let mut matches = store.items().iter().filter(|item| item.id.matches_prefix(raw));
    let first = matches.next()?;
    if matches.next().is_some() {
        tracing::debug!(prefix = raw, "item prefix is ambiguous");
        return None;
    }
    Some(first.id)
}
