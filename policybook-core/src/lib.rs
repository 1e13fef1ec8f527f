pub mod book;
pub mod commands;
pub mod model;
pub mod models;
pub mod parser;
pub mod predicates;
pub mod prefs;
pub mod storage;
pub mod view;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use book::{BookError, PolicyBook};
pub use commands::{Command, CommandError, CommandResult, HELP_MESSAGE};
pub use model::{Model, DEFAULT_RENEWAL_WINDOW_DAYS};
pub use models::{
    Address, DuplicateField, Email, Name, Note, Person, Phone, Policy, PolicyNumber, PolicyType,
    RenewalDate, Tag, ValidationError,
};
pub use parser::{parse_command, ParseError};
pub use prefs::{determine_book_path, get_prefs_path, UserPrefs};
pub use storage::{PersonRecord, RecordError, Storage, StorageError};
pub use view::{PersonComparator, PersonFilter, SortOrder, ViewKind, ViewState};
