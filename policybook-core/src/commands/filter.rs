use chrono::NaiveDate;

use super::{CommandError, CommandResult};
use crate::model::Model;
use crate::predicates::DateRange;
use crate::view::{PersonFilter, SortOrder};

/// Shows policies renewing inside an inclusive date range in the renewals view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterByDateCommand {
    range: DateRange,
    sort: Option<SortOrder>,
}

impl FilterByDateCommand {
    /// Fails with `InvalidDateRange` when `start` is after `end`
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        sort: Option<SortOrder>,
    ) -> Result<Self, CommandError> {
        Ok(Self {
            range: DateRange::new(start, end)?,
            sort,
        })
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        model.update_renewals_list(PersonFilter::RenewingBetween(self.range));
        if let Some(sort) = self.sort {
            model.update_sorted_renewals_list(sort);
        }
        Ok(CommandResult::for_renewals(format!(
            "{} policies renewing between {}",
            model.renewals_list().len(),
            self.range
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::InvalidDateRange;
    use crate::testutil::typical_book;
    use crate::view::{PersonComparator, ViewKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_after_end_rejected() {
        let err = FilterByDateCommand::new(date(2031, 1, 2), date(2031, 1, 1), None).unwrap_err();
        assert_eq!(err, CommandError::InvalidDateRange(InvalidDateRange));
        assert_eq!(err.to_string(), "Start date must not be after end date.");
    }

    #[test]
    fn test_filter_is_inclusive() {
        let mut model = Model::new(typical_book());
        // Carl renews 20-07-2030, Benson 01-01-2031
        let cmd = FilterByDateCommand::new(date(2030, 7, 20), date(2031, 1, 1), None).unwrap();
        let result = cmd.execute(&mut model).unwrap();

        assert_eq!(
            result.feedback,
            "2 policies renewing between 2030-07-20 and 2031-01-01"
        );
        assert_eq!(result.view, ViewKind::Renewals);
        let names: Vec<&str> = model.renewals_list().iter().map(|p| p.name().as_str()).collect();
        assert_eq!(names, vec!["Benson Meier", "Carl Kurz"]);
        assert_eq!(model.filtered_person_list().len(), 3);
    }

    #[test]
    fn test_filter_with_sort() {
        let mut model = Model::new(typical_book());
        let cmd = FilterByDateCommand::new(
            date(2030, 1, 1),
            date(2031, 12, 31),
            Some(SortOrder::By(PersonComparator::RenewalDate)),
        )
        .unwrap();
        cmd.execute(&mut model).unwrap();
        let names: Vec<&str> = model.renewals_list().iter().map(|p| p.name().as_str()).collect();
        assert_eq!(names, vec!["Carl Kurz", "Benson Meier", "Alice Pauline"]);
    }

    #[test]
    fn test_filter_without_sort_keeps_existing_sort() {
        let mut model = Model::new(typical_book());
        model.update_sorted_renewals_list(SortOrder::By(PersonComparator::Name));
        FilterByDateCommand::new(date(2030, 1, 1), date(2031, 12, 31), None)
            .unwrap()
            .execute(&mut model)
            .unwrap();
        assert_eq!(model.renewals_sort(), SortOrder::By(PersonComparator::Name));
    }
}
