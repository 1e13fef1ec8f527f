use log::debug;

use crate::book::{BookError, PolicyBook};
use crate::models::Person;
use crate::view::{PersonFilter, SortOrder, ViewState};

/// Look-ahead used by `renewals` when no day count is given
pub const DEFAULT_RENEWAL_WINDOW_DAYS: u32 = 30;

/// Session state: the policy book plus its two views
///
/// The general view backs `list`, `find`, `edit` and `delete`; the renewals
/// view backs `renewals`, `filter` and `sort-renewals`. Both are projections
/// computed on demand, so reading them after any mutation reflects the
/// current book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    book: PolicyBook,
    persons_view: ViewState,
    renewals_view: ViewState,
    renewal_window_days: u32,
}

impl Model {
    pub fn new(book: PolicyBook) -> Self {
        Self {
            book,
            persons_view: ViewState::new(),
            renewals_view: ViewState::new(),
            renewal_window_days: DEFAULT_RENEWAL_WINDOW_DAYS,
        }
    }

    pub fn with_renewal_window(mut self, days: u32) -> Self {
        self.renewal_window_days = days;
        self
    }

    pub fn renewal_window_days(&self) -> u32 {
        self.renewal_window_days
    }

    pub fn book(&self) -> &PolicyBook {
        &self.book
    }

    /// Replaces the whole book and resets both views
    pub fn set_book(&mut self, book: PolicyBook) {
        self.book = book;
        self.persons_view.reset();
        self.renewals_view.reset();
    }

    /// Empties the book and resets both views
    pub fn clear_book(&mut self) {
        self.book.clear();
        self.persons_view.reset();
        self.renewals_view.reset();
    }

    pub fn has_person(&self, person: &Person) -> bool {
        self.book.contains(person)
    }

    pub fn add_person(&mut self, person: Person) -> Result<(), BookError> {
        self.book.add(person)
    }

    pub fn delete_person(&mut self, person: &Person) -> Result<(), BookError> {
        self.book.remove(person)
    }

    pub fn set_person(&mut self, target: &Person, edited: Person) -> Result<(), BookError> {
        self.book.replace(target, edited)
    }

    // =========================================================================
    // General view
    // =========================================================================

    pub fn update_filtered_person_list(&mut self, filter: PersonFilter) {
        debug!("persons view filter -> {:?}", filter);
        self.persons_view.set_filter(filter);
    }

    pub fn update_sorted_person_list(&mut self, sort: SortOrder) {
        debug!("persons view sort -> {}", sort);
        self.persons_view.set_sort(sort);
    }

    /// Snapshot of the general view; borrows the book, so it cannot outlive a mutation
    pub fn filtered_person_list(&self) -> Vec<&Person> {
        self.persons_view.apply(self.book.persons())
    }

    pub fn persons_view(&self) -> &ViewState {
        &self.persons_view
    }

    // =========================================================================
    // Renewals view
    // =========================================================================

    pub fn update_renewals_list(&mut self, filter: PersonFilter) {
        debug!("renewals view filter -> {:?}", filter);
        self.renewals_view.set_filter(filter);
    }

    pub fn update_sorted_renewals_list(&mut self, sort: SortOrder) {
        debug!("renewals view sort -> {}", sort);
        self.renewals_view.set_sort(sort);
    }

    pub fn renewals_list(&self) -> Vec<&Person> {
        self.renewals_view.apply(self.book.persons())
    }

    pub fn renewals_sort(&self) -> SortOrder {
        self.renewals_view.sort()
    }

    pub fn renewals_view(&self) -> &ViewState {
        &self.renewals_view
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(PolicyBook::new())
    }
}
