use super::{CommandError, CommandResult};
use crate::model::Model;

/// Removes every person from the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearCommand;

impl ClearCommand {
    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        model.clear_book();
        Ok(CommandResult::new("Policy book has been cleared!"))
    }
}
