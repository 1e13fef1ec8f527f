use std::fmt;

/// A marker like `n/` that introduces an argument value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn new(prefix: &'static str) -> Self {
        Self(prefix)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const PREFIX_NAME: Prefix = Prefix::new("n/");
pub const PREFIX_PHONE: Prefix = Prefix::new("p/");
pub const PREFIX_EMAIL: Prefix = Prefix::new("e/");
pub const PREFIX_ADDRESS: Prefix = Prefix::new("a/");
pub const PREFIX_POLICY: Prefix = Prefix::new("pol/");
pub const PREFIX_RENEWAL_DATE: Prefix = Prefix::new("r/");
pub const PREFIX_POLICY_TYPE: Prefix = Prefix::new("pt/");
pub const PREFIX_NOTE: Prefix = Prefix::new("note/");
pub const PREFIX_TAG: Prefix = Prefix::new("t/");
/// Shares `n/` with the name prefix; only the `renewals` command reads it
pub const PREFIX_NEXT_N_DAYS: Prefix = Prefix::new("n/");
pub const PREFIX_SORT_ORDER: Prefix = Prefix::new("s/");
pub const PREFIX_START_DATE: Prefix = Prefix::new("sd/");
pub const PREFIX_END_DATE: Prefix = Prefix::new("ed/");

pub const COMMAND_ADD: &str = "add";
pub const COMMAND_EDIT: &str = "edit";
pub const COMMAND_FIND: &str = "find";
pub const COMMAND_DELETE: &str = "delete";
pub const COMMAND_LIST: &str = "list";
pub const COMMAND_SORT: &str = "sort";
pub const COMMAND_SORT_RENEWALS: &str = "sort-renewals";
pub const COMMAND_FILTER: &str = "filter";
pub const COMMAND_RENEWALS: &str = "renewals";
pub const COMMAND_CLEAR: &str = "clear";
pub const COMMAND_HELP: &str = "help";
pub const COMMAND_EXIT: &str = "exit";

pub const ADD_USAGE: &str = "add: Adds a person to the policy book. \
Parameters: n/NAME p/PHONE e/EMAIL a/ADDRESS pol/POLICY_NUMBER [r/RENEWAL_DATE] [pt/POLICY_TYPE] [note/NOTE] [t/TAG]...\n\
Example: add n/John Doe p/98765432 e/johnd@example.com a/311, Clementi Ave 2, #02-25 pol/123456 r/31-12-2030 pt/Health t/friends";

pub const EDIT_USAGE: &str = "edit: Edits the details of the person identified by the index number used in the displayed person list. \
Existing values will be overwritten by the input values.\n\
Parameters: INDEX (must be a positive integer) [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [pol/POLICY_NUMBER] [r/RENEWAL_DATE] [pt/POLICY_TYPE] [note/NOTE] [t/TAG]...\n\
Example: edit 1 p/91234567 e/johndoe@example.com";

pub const FIND_USAGE: &str = "find: Finds all persons whose details contain any of the given keywords (case-insensitive).\n\
Parameters: [n/NAME]... [p/PHONE]... [e/EMAIL]... [a/ADDRESS]... [pol/POLICY_NUMBER]... [pt/POLICY_TYPE]... [t/TAG]...\n\
Example: find n/alice n/bob p/91234567";

pub const DELETE_USAGE: &str = "delete: Deletes the person identified by the index number used in the displayed person list.\n\
Parameters: INDEX (must be a positive integer)\n\
Example: delete 1";

pub const SORT_USAGE: &str = "sort: Sorts the person list.\n\
Parameters: s/(name|tag|date|reset)\n\
Example: sort s/name";

pub const SORT_RENEWALS_USAGE: &str = "sort-renewals: Sorts the renewals list.\n\
Parameters: s/(name|tag|date|reset)\n\
Example: sort-renewals s/date";

pub const FILTER_USAGE: &str = "filter: Lists policies renewing between two dates (inclusive).\n\
Parameters: sd/START_DATE ed/END_DATE [s/SORT_ORDER] (dates as YYYY-MM-DD)\n\
Example: filter sd/2030-01-01 ed/2030-12-31 s/date";

pub const RENEWALS_USAGE: &str = "renewals: Lists policies renewing within the next N days.\n\
Parameters: [n/DAYS] [s/SORT_ORDER]\n\
Example: renewals n/14 s/date";

pub const HELP_USAGE: &str = "help: Shows program usage instructions.\n\
Example: help";
