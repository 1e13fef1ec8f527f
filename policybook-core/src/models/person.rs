use std::collections::BTreeSet;
use std::fmt;

use super::{Address, Email, Name, Note, Phone, Policy, Tag};

/// The field on which two persons collided under the duplicate rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Name,
    PolicyNumber,
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateField::Name => write!(f, "name"),
            DuplicateField::PolicyNumber => write!(f, "policy number"),
        }
    }
}

/// A client in the policy book
///
/// Persons are replaced, never mutated in place: every `with_*` method
/// returns a new value with one field overlaid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    policy: Policy,
    note: Note,
    tags: BTreeSet<Tag>,
}

impl Person {
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        policy: Policy,
        note: Note,
        tags: BTreeSet<Tag>,
    ) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            policy,
            note,
            tags,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn with_name(self, name: Name) -> Self {
        Self { name, ..self }
    }

    pub fn with_phone(self, phone: Phone) -> Self {
        Self { phone, ..self }
    }

    pub fn with_email(self, email: Email) -> Self {
        Self { email, ..self }
    }

    pub fn with_address(self, address: Address) -> Self {
        Self { address, ..self }
    }

    pub fn with_policy(self, policy: Policy) -> Self {
        Self { policy, ..self }
    }

    pub fn with_note(self, note: Note) -> Self {
        Self { note, ..self }
    }

    pub fn with_tags(self, tags: BTreeSet<Tag>) -> Self {
        Self { tags, ..self }
    }

    /// Returns which field, if any, makes `other` a duplicate of this person.
    /// A case-insensitive name match is reported ahead of a policy number match.
    pub fn duplicate_field(&self, other: &Person) -> Option<DuplicateField> {
        if self.name.eq_ignore_case(&other.name) {
            Some(DuplicateField::Name)
        } else if self.policy.number() == other.policy.number() {
            Some(DuplicateField::PolicyNumber)
        } else {
            None
        }
    }

    pub fn is_same_person(&self, other: &Person) -> bool {
        self.duplicate_field(other).is_some()
    }
}

/// One-line summary used in command feedback
impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Address: {}; Policy: {}; Note: {}; Tags: ",
            self.name, self.phone, self.email, self.address, self.policy, self.note
        )?;
        for tag in &self.tags {
            write!(f, "[{}]", tag)?;
        }
        Ok(())
    }
}
