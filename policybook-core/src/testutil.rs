//! Builders and typical persons shared by the unit tests

use chrono::{Local, NaiveDate};
use proptest::prelude::*;
use std::collections::BTreeSet;

use crate::book::PolicyBook;
use crate::models::{
    Address, Email, Name, Note, Person, Phone, Policy, PolicyNumber, PolicyType, RenewalDate, Tag,
};

pub const DEFAULT_NAME: &str = "Amy Bee";
pub const DEFAULT_PHONE: &str = "85355255";
pub const DEFAULT_EMAIL: &str = "amy@gmail.com";
pub const DEFAULT_ADDRESS: &str = "123, Jurong West Ave 6, #08-111";
pub const DEFAULT_POLICY: &str = "100001";
pub const DEFAULT_RENEWAL_DATE: &str = "31-12-2030";

pub struct PersonBuilder {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    policy: Policy,
    note: Note,
    tags: BTreeSet<Tag>,
}

impl PersonBuilder {
    pub fn new() -> Self {
        Self {
            name: Name::new(DEFAULT_NAME).unwrap(),
            phone: Phone::new(DEFAULT_PHONE).unwrap(),
            email: Email::new(DEFAULT_EMAIL).unwrap(),
            address: Address::new(DEFAULT_ADDRESS).unwrap(),
            policy: Policy::new(
                PolicyNumber::new(DEFAULT_POLICY).unwrap(),
                RenewalDate::new(DEFAULT_RENEWAL_DATE).unwrap(),
                PolicyType::Life,
            ),
            note: Note::empty(),
            tags: BTreeSet::new(),
        }
    }

    pub fn from(person: &Person) -> Self {
        Self {
            name: person.name().clone(),
            phone: person.phone().clone(),
            email: person.email().clone(),
            address: person.address().clone(),
            policy: person.policy().clone(),
            note: person.note().clone(),
            tags: person.tags().clone(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Name::new(name).unwrap();
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Phone::new(phone).unwrap();
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Email::new(email).unwrap();
        self
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Address::new(address).unwrap();
        self
    }

    pub fn with_policy_number(mut self, number: &str) -> Self {
        self.policy = self.policy.with_number(PolicyNumber::new(number).unwrap());
        self
    }

    pub fn with_renewal_date(mut self, renewal_date: &str) -> Self {
        self.policy = self
            .policy
            .with_renewal_date(RenewalDate::new(renewal_date).unwrap());
        self
    }

    /// Renewal `days` from the local date the test runs on
    pub fn renewing_in_days(mut self, days: i64) -> Self {
        let date = Local::now().date_naive() + chrono::Duration::days(days);
        self.policy = self.policy.with_renewal_date(RenewalDate::from_date(date));
        self
    }

    pub fn renewing_on(mut self, date: NaiveDate) -> Self {
        self.policy = self.policy.with_renewal_date(RenewalDate::from_date(date));
        self
    }

    pub fn with_policy_type(mut self, policy_type: PolicyType) -> Self {
        self.policy = self.policy.with_policy_type(policy_type);
        self
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.note = Note::new(note).unwrap();
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| Tag::new(t).unwrap()).collect();
        self
    }

    pub fn build(self) -> Person {
        Person::new(
            self.name,
            self.phone,
            self.email,
            self.address,
            self.policy,
            self.note,
            self.tags,
        )
    }
}

pub fn alice() -> Person {
    PersonBuilder::new()
        .with_name("Alice Pauline")
        .with_phone("94351253")
        .with_email("alice@example.com")
        .with_address("123, Jurong West Ave 6, #08-111")
        .with_policy_number("111111")
        .with_renewal_date("15-03-2031")
        .with_note("Prefers email")
        .with_tags(&["friends"])
        .build()
}

pub fn benson() -> Person {
    PersonBuilder::new()
        .with_name("Benson Meier")
        .with_phone("98765432")
        .with_email("johnd@example.com")
        .with_address("311, Clementi Ave 2, #02-25")
        .with_policy_number("222222")
        .with_renewal_date("01-01-2031")
        .with_policy_type(PolicyType::Health)
        .with_tags(&["owesMoney", "friends"])
        .build()
}

pub fn carl() -> Person {
    PersonBuilder::new()
        .with_name("Carl Kurz")
        .with_phone("95352563")
        .with_email("heinz@example.com")
        .with_address("wall street")
        .with_policy_number("333333")
        .with_renewal_date("20-07-2030")
        .with_policy_type(PolicyType::Vehicle)
        .build()
}

pub fn bob() -> Person {
    PersonBuilder::new()
        .with_name("Bob Choo")
        .with_phone("22222222")
        .with_email("bob@example.com")
        .with_address("Block 123, Bobby Street 3")
        .with_policy_number("654321")
        .with_renewal_date("30-06-2030")
        .with_policy_type(PolicyType::Health)
        .with_tags(&["husband", "friend"])
        .build()
}

pub fn typical_persons() -> Vec<Person> {
    vec![alice(), benson(), carl()]
}

pub fn typical_book() -> PolicyBook {
    let mut book = PolicyBook::new();
    for person in typical_persons() {
        book.add(person).unwrap();
    }
    book
}

// Strategies below only produce values that are already trimmed and valid

fn pattern(regex: &str) -> impl Strategy<Value = String> {
    proptest::string::string_regex(regex).unwrap()
}

pub fn any_name() -> impl Strategy<Value = String> {
    pattern("[A-Za-z0-9]([A-Za-z0-9 ]{0,30}[A-Za-z0-9])?")
}

pub fn any_phone() -> impl Strategy<Value = String> {
    pattern("[0-9]{3,15}")
}

pub fn any_email() -> impl Strategy<Value = String> {
    pattern(
        "[A-Za-z0-9]([A-Za-z0-9+_.-]{0,10}[A-Za-z0-9])?@\
         ([A-Za-z0-9]([A-Za-z0-9-]{0,8}[A-Za-z0-9])?\\.){0,2}\
         [A-Za-z0-9][A-Za-z0-9-]{0,8}[A-Za-z0-9]",
    )
}

pub fn any_address() -> impl Strategy<Value = String> {
    pattern("[!-~]([ -~]{0,40}[!-~])?")
}

pub fn any_note() -> impl Strategy<Value = String> {
    pattern("([!-~]([ -~]{0,60}[!-~])?)?")
}

pub fn any_tag() -> impl Strategy<Value = String> {
    pattern("[A-Za-z0-9]{1,12}")
}

pub fn any_policy_number() -> impl Strategy<Value = String> {
    pattern("[0-9]{1,12}")
}

pub fn any_policy_type() -> impl Strategy<Value = PolicyType> {
    proptest::sample::select(PolicyType::ALL.to_vec())
}

/// Dates whose year prints as four digits
pub fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3_000_000).prop_map(|days| {
        NaiveDate::from_ymd_opt(1000, 1, 1).unwrap() + chrono::Duration::days(days)
    })
}

pub fn any_person() -> impl Strategy<Value = Person> {
    (
        any_name(),
        any_phone(),
        any_email(),
        any_address(),
        any_policy_number(),
        any_date(),
        any_policy_type(),
        any_note(),
        proptest::collection::vec(any_tag(), 0..4),
    )
        .prop_map(
            |(name, phone, email, address, number, date, policy_type, note, tags)| {
                let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
                PersonBuilder::new()
                    .with_name(&name)
                    .with_phone(&phone)
                    .with_email(&email)
                    .with_address(&address)
                    .with_policy_number(&number)
                    .renewing_on(date)
                    .with_policy_type(policy_type)
                    .with_note(&note)
                    .with_tags(&tags)
                    .build()
            },
        )
}
