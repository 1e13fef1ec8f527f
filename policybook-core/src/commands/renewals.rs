use chrono::{Duration, Local, NaiveDate};

use super::{CommandError, CommandResult};
use crate::model::Model;
use crate::predicates::DateRange;
use crate::view::{PersonFilter, SortOrder};

/// Shows policies renewing within the next few days in the renewals view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenewalsCommand {
    days: Option<u32>,
    sort: Option<SortOrder>,
}

impl RenewalsCommand {
    /// `days` falls back to the model's renewal window when unset
    pub fn new(days: Option<u32>, sort: Option<SortOrder>) -> Self {
        Self { days, sort }
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.execute_on(model, Local::now().date_naive())
    }

    /// Same as `execute` with an explicit current date
    pub fn execute_on(
        &self,
        model: &mut Model,
        today: NaiveDate,
    ) -> Result<CommandResult, CommandError> {
        let days = self.days.unwrap_or_else(|| model.renewal_window_days());
        let end = today
            .checked_add_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        let range = DateRange::new(today, end)?;

        model.update_renewals_list(PersonFilter::RenewingBetween(range));
        if let Some(sort) = self.sort {
            model.update_sorted_renewals_list(sort);
        }
        Ok(CommandResult::for_renewals(format!(
            "{} policies renewing in the next {} days",
            model.renewals_list().len(),
            days
        )))
    }
}
