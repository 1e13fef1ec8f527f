use super::{CommandError, CommandResult, Index};
use crate::model::Model;
use crate::view::{PersonFilter, SortOrder};

/// Deletes the person at a position in the general view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCommand {
    index: Index,
}

impl DeleteCommand {
    pub fn new(index: Index) -> Self {
        Self { index }
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        let target = {
            let shown = model.filtered_person_list();
            shown
                .get(self.index.zero_based())
                .map(|p| (*p).clone())
                .ok_or(CommandError::IndexOutOfRange {
                    index: self.index.one_based(),
                    size: shown.len(),
                })?
        };

        model.delete_person(&target)?;
        model.update_filtered_person_list(PersonFilter::All);
        model.update_sorted_person_list(SortOrder::OriginalOrder);

        Ok(CommandResult::new(format!("Deleted Person: {}", target)))
    }
}
