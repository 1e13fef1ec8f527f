use super::{CommandError, CommandResult};
use crate::model::Model;
use crate::view::{SortOrder, ViewKind};

/// Re-orders one of the two views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCommand {
    target: ViewKind,
    order: SortOrder,
}

impl SortCommand {
    pub fn new(target: ViewKind, order: SortOrder) -> Self {
        Self { target, order }
    }

    pub fn persons(order: SortOrder) -> Self {
        Self::new(ViewKind::Persons, order)
    }

    pub fn renewals(order: SortOrder) -> Self {
        Self::new(ViewKind::Renewals, order)
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        let list = match self.target {
            ViewKind::Persons => {
                model.update_sorted_person_list(self.order);
                "person list"
            }
            ViewKind::Renewals => {
                model.update_sorted_renewals_list(self.order);
                "renewals list"
            }
        };

        let feedback = match self.order {
            SortOrder::OriginalOrder => format!("Restored {} to original order", list),
            order => format!("Sorted {} by {}", list, order),
        };
        Ok(CommandResult {
            view: self.target,
            ..CommandResult::new(feedback)
        })
    }
}
