use super::{CommandError, CommandResult, MESSAGE_PERSONS_LISTED_OVERVIEW};
use crate::model::Model;
use crate::predicates::FindPersonsPredicate;
use crate::view::PersonFilter;

/// Narrows the general view to persons matching any of the given criteria
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCommand {
    predicate: FindPersonsPredicate,
}

impl FindCommand {
    /// Fails with `NoCriteria` when no field criterion is set
    pub fn new(predicate: FindPersonsPredicate) -> Result<Self, CommandError> {
        if !predicate.is_any_criterion_set() {
            return Err(CommandError::NoCriteria);
        }
        Ok(Self { predicate })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        model.update_filtered_person_list(PersonFilter::Matching(self.predicate.clone()));
        Ok(CommandResult::new(format!(
            "{} {}",
            model.filtered_person_list().len(),
            MESSAGE_PERSONS_LISTED_OVERVIEW
        )))
    }
}
