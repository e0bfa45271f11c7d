//! Interactive checklist over stdin/stdout.
//!
//! Items are addressed by their 1-based position as printed by `list`.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use pocket_core::TodoList;
use thiserror::Error;
use tracing::{debug, info};

pub const HELP: &str = "\
commands:
  add <text>     append an item
  toggle <n>     mark item n done / not done
  remove <n>     delete item n (alias: rm)
  list           show all items (alias: ls)
  clear-done     delete every completed item
  help           show this text
  quit           leave";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs an item number")]
    MissingPosition(&'static str),

    #[error("'{0}' is not an item number")]
    BadPosition(String),
}

/// One checklist command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    /// 1-based position.
    Toggle(usize),
    /// 1-based position.
    Remove(usize),
    List,
    ClearDone,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (word, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let rest = rest.trim();

        match word.to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add(rest.to_string())),
            "toggle" | "done" => parse_position("toggle", rest).map(Self::Toggle),
            "remove" | "rm" | "delete" => parse_position("remove", rest).map(Self::Remove),
            "list" | "ls" | "" => Ok(Self::List),
            "clear-done" => Ok(Self::ClearDone),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(ParseCommandError::Unknown(word.to_string())),
        }
    }
}

fn parse_position(
    command: &'static str,
    arg: &str,
) -> Result<usize, ParseCommandError> {
    if arg.is_empty() {
        return Err(ParseCommandError::MissingPosition(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseCommandError::BadPosition(arg.to_string())),
    }
}

/// A to-do list plus the command loop that drives it.
#[derive(Debug, Default)]
pub struct Checklist {
    list: TodoList,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    /// Renders every item as `n. [x] text`, followed by a summary line.
    pub fn render(&self) -> String {
        if self.list.is_empty() {
            return "(no items)".to_string();
        }
        let mut out = String::new();
        for (index, item) in self.list.iter().enumerate() {
            let mark = if item.done { 'x' } else { ' ' };
            out.push_str(&format!("{}. [{mark}] {}\n", index + 1, item.text));
        }
        out.push_str(&format!(
            "{} of {} remaining",
            self.list.remaining(),
            self.list.len()
        ));
        out
    }

    /// Runs one command and returns the text to show, or `None` for quit.
    pub fn execute(
        &mut self,
        command: Command,
    ) -> Option<String> {
        let reply = match command {
            Command::Add(text) => match self.list.append(&text) {
                Some(_) => self.render(),
                None => "nothing to add".to_string(),
            },
            Command::Toggle(position) => match self.id_at(position) {
                Some(id) => {
                    self.list.toggle(id);
                    self.render()
                }
                None => self.no_item(position),
            },
            Command::Remove(position) => match self.id_at(position) {
                Some(id) => {
                    self.list.remove(id);
                    self.render()
                }
                None => self.no_item(position),
            },
            Command::List => self.render(),
            Command::ClearDone => {
                let removed = self.list.clear_done();
                debug!(removed, "cleared completed items");
                self.render()
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return None,
        };
        Some(reply)
    }

    /// Reads commands line by line until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
    ) -> io::Result<()> {
        info!("checklist started");
        for line in input.lines() {
            let line = line?;
            let reply = match line.parse::<Command>() {
                Ok(command) => match self.execute(command) {
                    Some(reply) => reply,
                    None => break,
                },
                Err(e) => e.to_string(),
            };
            writeln!(output, "{reply}")?;
            output.flush()?;
        }
        info!(items = self.list.len(), "checklist finished");
        Ok(())
    }

    fn id_at(
        &self,
        position: usize,
    ) -> Option<pocket_core::ItemId> {
        position
            .checked_sub(1)
            .and_then(|index| self.list.at(index))
            .map(|item| item.id)
    }

    fn no_item(
        &self,
        position: usize,
    ) -> String {
        format!("no item {position} (list has {})", self.list.len())
    }
}
