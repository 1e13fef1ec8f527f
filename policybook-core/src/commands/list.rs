use super::{CommandError, CommandResult};
use crate::model::Model;
use crate::view::{PersonFilter, SortOrder};

/// Shows every person in original order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCommand;

impl ListCommand {
    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        model.update_filtered_person_list(PersonFilter::All);
        model.update_sorted_person_list(SortOrder::OriginalOrder);
        Ok(CommandResult::new("Listed all persons"))
    }
}
