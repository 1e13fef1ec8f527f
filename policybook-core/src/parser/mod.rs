//! Turns a line of command text into a [`Command`]
//!
//! A line is a command word followed by an optional preamble (an index for
//! `edit` and `delete`) and prefixed arguments such as `n/Alice` or `t/vip`.

mod syntax;
mod tokenizer;
mod util;

pub use syntax::*;
pub use tokenizer::{tokenize, ArgumentMultimap};
pub use util::{parse_date, parse_days, parse_index, parse_sort_order, parse_tags};

use chrono::{Local, NaiveDate};
use log::debug;
use thiserror::Error;

use crate::commands::{
    AddCommand, ClearCommand, Command, CommandError, DeleteCommand, EditCommand,
    EditPersonDescriptor, FilterByDateCommand, FindCommand, ListCommand, RenewalsCommand,
    SortCommand,
};
use crate::models::{
    Address, Email, Name, Note, Person, Phone, Policy, PolicyNumber, PolicyType, RenewalDate,
};
use crate::predicates::FindPersonsPredicate;
use crate::view::SortOrder;

/// Malformed command text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command")]
    UnknownCommand,

    #[error("Invalid command format! \n{0}")]
    InvalidFormat(&'static str),

    #[error("Index is not a non-zero unsigned integer.")]
    InvalidIndex,

    #[error("Multiple values specified for the following single-valued field(s): {0}")]
    DuplicatePrefixes(String),

    #[error("Invalid date format. Please use YYYY-MM-DD.")]
    InvalidDate,

    #[error("{}", SortOrder::MESSAGE_CONSTRAINTS)]
    InvalidSortOrder,

    #[error("Number of days should be a non-negative integer.")]
    InvalidDays,
}

/// Parses one line of user input
pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    parse_command_on(input, Local::now().date_naive())
}

/// Same as [`parse_command`] with an explicit current date, which seeds the
/// default renewal date of `add`
pub fn parse_command_on(input: &str, today: NaiveDate) -> Result<Command, CommandError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidFormat(HELP_USAGE).into());
    }
    let (word, args) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    debug!("parsing command word {:?}", word);

    match word {
        COMMAND_ADD => parse_add(args, today),
        COMMAND_EDIT => parse_edit(args),
        COMMAND_FIND => parse_find(args),
        COMMAND_DELETE => parse_delete(args),
        COMMAND_SORT => {
            parse_sort(args, SORT_USAGE).map(|order| Command::Sort(SortCommand::persons(order)))
        }
        COMMAND_SORT_RENEWALS => parse_sort(args, SORT_RENEWALS_USAGE)
            .map(|order| Command::Sort(SortCommand::renewals(order))),
        COMMAND_FILTER => parse_filter(args),
        COMMAND_RENEWALS => parse_renewals(args),
        COMMAND_LIST => Ok(Command::List(ListCommand)),
        COMMAND_CLEAR => Ok(Command::Clear(ClearCommand)),
        COMMAND_HELP => Ok(Command::Help),
        COMMAND_EXIT => Ok(Command::Exit),
        _ => Err(ParseError::UnknownCommand.into()),
    }
}

fn parse_add(args: &str, today: NaiveDate) -> Result<Command, CommandError> {
    let map = tokenize(
        args,
        &[
            PREFIX_NAME,
            PREFIX_PHONE,
            PREFIX_EMAIL,
            PREFIX_ADDRESS,
            PREFIX_POLICY,
            PREFIX_RENEWAL_DATE,
            PREFIX_POLICY_TYPE,
            PREFIX_NOTE,
            PREFIX_TAG,
        ],
    );

    let required = [
        PREFIX_NAME,
        PREFIX_PHONE,
        PREFIX_EMAIL,
        PREFIX_ADDRESS,
        PREFIX_POLICY,
    ];
    if !map.are_all_present(&required) || !map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat(ADD_USAGE).into());
    }
    map.verify_no_duplicate_prefixes_for(&[
        PREFIX_NAME,
        PREFIX_PHONE,
        PREFIX_EMAIL,
        PREFIX_ADDRESS,
        PREFIX_POLICY,
        PREFIX_RENEWAL_DATE,
        PREFIX_POLICY_TYPE,
        PREFIX_NOTE,
    ])?;

    let required_value = |prefix| map.value(prefix).unwrap_or_default();
    let name = Name::new(required_value(PREFIX_NAME))?;
    let phone = Phone::new(required_value(PREFIX_PHONE))?;
    let email = Email::new(required_value(PREFIX_EMAIL))?;
    let address = Address::new(required_value(PREFIX_ADDRESS))?;
    let number = PolicyNumber::new(required_value(PREFIX_POLICY))?;

    let renewal_date = match map.value(PREFIX_RENEWAL_DATE) {
        Some(raw) => RenewalDate::new(raw)?,
        None => RenewalDate::default_from(today),
    };
    let policy_type = match map.value(PREFIX_POLICY_TYPE) {
        Some(raw) => raw.parse::<PolicyType>()?,
        None => PolicyType::default(),
    };
    let note = match map.value(PREFIX_NOTE) {
        Some(raw) => Note::new(raw)?,
        None => Note::empty(),
    };
    let tags = parse_tags(map.all_values(PREFIX_TAG))?;

    let person = Person::new(
        name,
        phone,
        email,
        address,
        Policy::new(number, renewal_date, policy_type),
        note,
        tags,
    );
    Ok(Command::Add(AddCommand::new(person)))
}

fn parse_edit(args: &str) -> Result<Command, CommandError> {
    let map = tokenize(
        args,
        &[
            PREFIX_NAME,
            PREFIX_PHONE,
            PREFIX_EMAIL,
            PREFIX_ADDRESS,
            PREFIX_POLICY,
            PREFIX_RENEWAL_DATE,
            PREFIX_POLICY_TYPE,
            PREFIX_NOTE,
            PREFIX_TAG,
        ],
    );
    if map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat(EDIT_USAGE).into());
    }
    let index = parse_index(map.preamble())?;
    map.verify_no_duplicate_prefixes_for(&[
        PREFIX_NAME,
        PREFIX_PHONE,
        PREFIX_EMAIL,
        PREFIX_ADDRESS,
        PREFIX_POLICY,
        PREFIX_RENEWAL_DATE,
        PREFIX_POLICY_TYPE,
        PREFIX_NOTE,
    ])?;

    let descriptor = EditPersonDescriptor {
        name: map.value(PREFIX_NAME).map(Name::new).transpose()?,
        phone: map.value(PREFIX_PHONE).map(Phone::new).transpose()?,
        email: map.value(PREFIX_EMAIL).map(Email::new).transpose()?,
        address: map.value(PREFIX_ADDRESS).map(Address::new).transpose()?,
        policy_number: map.value(PREFIX_POLICY).map(PolicyNumber::new).transpose()?,
        renewal_date: map
            .value(PREFIX_RENEWAL_DATE)
            .map(RenewalDate::new)
            .transpose()?,
        policy_type: map
            .value(PREFIX_POLICY_TYPE)
            .map(str::parse::<PolicyType>)
            .transpose()?,
        note: map.value(PREFIX_NOTE).map(Note::new).transpose()?,
        tags: util::parse_tags_for_edit(map.all_values(PREFIX_TAG))?,
    };

    Ok(Command::Edit(EditCommand::new(index, descriptor)?))
}

fn parse_find(args: &str) -> Result<Command, CommandError> {
    let map = tokenize(
        args,
        &[
            PREFIX_NAME,
            PREFIX_PHONE,
            PREFIX_EMAIL,
            PREFIX_ADDRESS,
            PREFIX_POLICY,
            PREFIX_POLICY_TYPE,
            PREFIX_TAG,
        ],
    );
    if !map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat(FIND_USAGE).into());
    }

    let keywords = |prefix| -> Result<Vec<String>, CommandError> {
        let values = map.all_values(prefix);
        if values.iter().any(|v| v.is_empty()) {
            return Err(ParseError::InvalidFormat(FIND_USAGE).into());
        }
        Ok(values.to_vec())
    };

    let policy_types = map
        .all_values(PREFIX_POLICY_TYPE)
        .iter()
        .map(|raw| raw.parse::<PolicyType>())
        .collect::<Result<Vec<_>, _>>()?;

    let predicate = FindPersonsPredicate::new()
        .with_names(keywords(PREFIX_NAME)?)
        .with_phones(keywords(PREFIX_PHONE)?)
        .with_emails(keywords(PREFIX_EMAIL)?)
        .with_addresses(keywords(PREFIX_ADDRESS)?)
        .with_policies(keywords(PREFIX_POLICY)?)
        .with_tags(keywords(PREFIX_TAG)?)
        .with_policy_types(policy_types);

    match FindCommand::new(predicate) {
        Ok(cmd) => Ok(Command::Find(cmd)),
        Err(CommandError::NoCriteria) => Err(ParseError::InvalidFormat(FIND_USAGE).into()),
        Err(e) => Err(e),
    }
}

fn parse_delete(args: &str) -> Result<Command, CommandError> {
    if args.trim().is_empty() {
        return Err(ParseError::InvalidFormat(DELETE_USAGE).into());
    }
    let index = parse_index(args)?;
    Ok(Command::Delete(DeleteCommand::new(index)))
}

fn parse_sort(args: &str, usage: &'static str) -> Result<SortOrder, CommandError> {
    let map = tokenize(args, &[PREFIX_SORT_ORDER]);
    let raw = match map.value(PREFIX_SORT_ORDER) {
        Some(raw) if map.preamble().is_empty() => raw,
        _ => return Err(ParseError::InvalidFormat(usage).into()),
    };
    map.verify_no_duplicate_prefixes_for(&[PREFIX_SORT_ORDER])?;
    Ok(parse_sort_order(raw)?)
}

fn parse_optional_sort(map: &ArgumentMultimap) -> Result<Option<SortOrder>, ParseError> {
    map.value(PREFIX_SORT_ORDER).map(parse_sort_order).transpose()
}

fn parse_filter(args: &str) -> Result<Command, CommandError> {
    let map = tokenize(args, &[PREFIX_START_DATE, PREFIX_END_DATE, PREFIX_SORT_ORDER]);
    if !map.are_all_present(&[PREFIX_START_DATE, PREFIX_END_DATE]) || !map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat(FILTER_USAGE).into());
    }
    map.verify_no_duplicate_prefixes_for(&[PREFIX_START_DATE, PREFIX_END_DATE, PREFIX_SORT_ORDER])?;

    let start = parse_date(map.value(PREFIX_START_DATE).unwrap_or_default())?;
    let end = parse_date(map.value(PREFIX_END_DATE).unwrap_or_default())?;
    let sort = parse_optional_sort(&map)?;
    Ok(Command::FilterByDate(FilterByDateCommand::new(start, end, sort)?))
}

fn parse_renewals(args: &str) -> Result<Command, CommandError> {
    let map = tokenize(args, &[PREFIX_NEXT_N_DAYS, PREFIX_SORT_ORDER]);
    if !map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat(RENEWALS_USAGE).into());
    }
    map.verify_no_duplicate_prefixes_for(&[PREFIX_NEXT_N_DAYS, PREFIX_SORT_ORDER])?;

    let days = map.value(PREFIX_NEXT_N_DAYS).map(parse_days).transpose()?;
    let sort = parse_optional_sort(&map)?;
    Ok(Command::Renewals(RenewalsCommand::new(days, sort)))
}
