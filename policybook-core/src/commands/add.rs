use super::{CommandError, CommandResult};
use crate::model::Model;
use crate::models::Person;
use crate::view::{PersonFilter, SortOrder};

/// Adds a person to the book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommand {
    person: Person,
}

impl AddCommand {
    pub fn new(person: Person) -> Self {
        Self { person }
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        model.add_person(self.person.clone())?;

        model.update_filtered_person_list(PersonFilter::All);
        model.update_sorted_person_list(SortOrder::OriginalOrder);
        model.update_renewals_list(PersonFilter::All);
        model.update_sorted_renewals_list(SortOrder::OriginalOrder);

        Ok(CommandResult::new(format!(
            "New person added: {}",
            self.person
        )))
    }
}
