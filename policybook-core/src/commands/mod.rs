//! Command layer
//!
//! Every command executes against a [`Model`] and either returns a
//! [`CommandResult`] or fails with a [`CommandError`]. A failed command leaves
//! the book and both views exactly as they were.

mod add;
mod clear;
mod delete;
mod edit;
mod filter;
mod find;
mod list;
mod renewals;
mod sort;

pub use add::AddCommand;
pub use clear::ClearCommand;
pub use delete::DeleteCommand;
pub use edit::{EditCommand, EditPersonDescriptor};
pub use filter::FilterByDateCommand;
pub use find::FindCommand;
pub use list::ListCommand;
pub use renewals::RenewalsCommand;
pub use sort::SortCommand;

use log::debug;
use thiserror::Error;

use crate::book::BookError;
use crate::model::Model;
use crate::models::{DuplicateField, ValidationError};
use crate::parser::ParseError;
use crate::predicates::InvalidDateRange;
use crate::view::ViewKind;

pub const MESSAGE_PERSONS_LISTED_OVERVIEW: &str = "persons listed!";

/// Everything that can make a command line fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A person with the same {0} already exists in the policy book")]
    Duplicate(DuplicateField),

    #[error("The specified person could not be found in the policy book")]
    NotFound,

    #[error("The person index provided is invalid")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("At least one field to edit must be provided.")]
    NoFieldEdited,

    #[error("At least one field to find must be provided.")]
    NoCriteria,

    #[error(transparent)]
    InvalidDateRange(#[from] InvalidDateRange),
}

impl From<BookError> for CommandError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::Duplicate(field) => CommandError::Duplicate(field),
            BookError::NotFound => CommandError::NotFound,
        }
    }
}

/// Feedback for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    /// The view the command acted on and that should be shown next
    pub view: ViewKind,
    pub show_help: bool,
    pub exit: bool,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            view: ViewKind::Persons,
            show_help: false,
            exit: false,
        }
    }

    pub fn for_renewals(feedback: impl Into<String>) -> Self {
        Self {
            view: ViewKind::Renewals,
            ..Self::new(feedback)
        }
    }
}

/// Position in the displayed list, stored zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index(usize);

impl Index {
    /// `one_based` must be at least 1
    pub fn from_one_based(one_based: usize) -> Option<Self> {
        one_based.checked_sub(1).map(Self)
    }

    pub fn from_zero_based(zero_based: usize) -> Self {
        Self(zero_based)
    }

    pub fn zero_based(&self) -> usize {
        self.0
    }

    pub fn one_based(&self) -> usize {
        self.0 + 1
    }
}

pub const HELP_MESSAGE: &str = "\
Commands:
  add n/NAME p/PHONE e/EMAIL a/ADDRESS pol/POLICY_NUMBER [r/DD-MM-YYYY] [pt/TYPE] [note/NOTE] [t/TAG]...
  edit INDEX [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [pol/POLICY_NUMBER] [r/DD-MM-YYYY] [pt/TYPE] [note/NOTE] [t/TAG]...
  find [n/NAME]... [p/PHONE]... [e/EMAIL]... [a/ADDRESS]... [pol/POLICY_NUMBER]... [pt/TYPE]... [t/TAG]...
  delete INDEX
  list
  sort s/(name|tag|date|reset)
  renewals [n/DAYS] [s/(name|tag|date|reset)]
  sort-renewals s/(name|tag|date|reset)
  filter sd/YYYY-MM-DD ed/YYYY-MM-DD [s/(name|tag|date|reset)]
  clear
  help
  exit";

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(AddCommand),
    Edit(EditCommand),
    Find(FindCommand),
    Delete(DeleteCommand),
    Sort(SortCommand),
    FilterByDate(FilterByDateCommand),
    Renewals(RenewalsCommand),
    List(ListCommand),
    Clear(ClearCommand),
    Help,
    Exit,
}

impl Command {
    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        debug!("executing {:?}", self);
        match self {
            Command::Add(cmd) => cmd.execute(model),
            Command::Edit(cmd) => cmd.execute(model),
            Command::Find(cmd) => cmd.execute(model),
            Command::Delete(cmd) => cmd.execute(model),
            Command::Sort(cmd) => cmd.execute(model),
            Command::FilterByDate(cmd) => cmd.execute(model),
            Command::Renewals(cmd) => cmd.execute(model),
            Command::List(cmd) => cmd.execute(model),
            Command::Clear(cmd) => cmd.execute(model),
            Command::Help => Ok(CommandResult {
                show_help: true,
                ..CommandResult::new(HELP_MESSAGE)
            }),
            Command::Exit => Ok(CommandResult {
                exit: true,
                ..CommandResult::new("Exiting policy book as requested ...")
            }),
        }
    }

    /// True for commands that change the book and so need persisting
    pub fn mutates_book(&self) -> bool {
        matches!(
            self,
            Command::Add(_) | Command::Edit(_) | Command::Delete(_) | Command::Clear(_)
        )
    }
}
