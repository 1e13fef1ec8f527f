use std::collections::BTreeSet;

use super::{CommandError, CommandResult, Index};
use crate::model::Model;
use crate::models::{
    Address, Email, Name, Note, Person, Phone, PolicyNumber, PolicyType, RenewalDate, Tag,
};
use crate::view::{PersonFilter, SortOrder};

/// The fields to overwrite on a person; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPersonDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub policy_number: Option<PolicyNumber>,
    pub renewal_date: Option<RenewalDate>,
    pub policy_type: Option<PolicyType>,
    pub note: Option<Note>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl EditPersonDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if at least one field is edited
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.is_policy_edited()
            || self.note.is_some()
            || self.tags.is_some()
    }

    fn is_policy_edited(&self) -> bool {
        self.policy_number.is_some() || self.renewal_date.is_some() || self.policy_type.is_some()
    }

    /// Overlays the set fields onto `person`. Policy sub-fields are overlaid
    /// individually, so editing only the renewal date keeps number and type.
    pub fn apply_to(&self, person: &Person) -> Person {
        let mut edited = person.clone();
        if let Some(name) = &self.name {
            edited = edited.with_name(name.clone());
        }
        if let Some(phone) = &self.phone {
            edited = edited.with_phone(phone.clone());
        }
        if let Some(email) = &self.email {
            edited = edited.with_email(email.clone());
        }
        if let Some(address) = &self.address {
            edited = edited.with_address(address.clone());
        }
        if self.is_policy_edited() {
            let mut policy = person.policy().clone();
            if let Some(number) = &self.policy_number {
                policy = policy.with_number(number.clone());
            }
            if let Some(renewal_date) = self.renewal_date {
                policy = policy.with_renewal_date(renewal_date);
            }
            if let Some(policy_type) = self.policy_type {
                policy = policy.with_policy_type(policy_type);
            }
            edited = edited.with_policy(policy);
        }
        if let Some(note) = &self.note {
            edited = edited.with_note(note.clone());
        }
        if let Some(tags) = &self.tags {
            edited = edited.with_tags(tags.clone());
        }
        edited
    }
}

/// Edits the person at a position in the general view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    index: Index,
    descriptor: EditPersonDescriptor,
}

impl EditCommand {
    /// Fails with `NoFieldEdited` when the descriptor sets nothing
    pub fn new(index: Index, descriptor: EditPersonDescriptor) -> Result<Self, CommandError> {
        if !descriptor.is_any_field_edited() {
            return Err(CommandError::NoFieldEdited);
        }
        Ok(Self { index, descriptor })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        if !self.descriptor.is_any_field_edited() {
            return Err(CommandError::NoFieldEdited);
        }

        let (target, edited) = {
            let shown = model.filtered_person_list();
            let target = *shown
                .get(self.index.zero_based())
                .ok_or(CommandError::IndexOutOfRange {
                    index: self.index.one_based(),
                    size: shown.len(),
                })?;
            let edited = self.descriptor.apply_to(target);

            if let Some(field) = shown
                .iter()
                .filter(|p| **p != target)
                .find_map(|p| edited.duplicate_field(p))
            {
                return Err(CommandError::Duplicate(field));
            }
            (target.clone(), edited)
        };

        // The book also guards persons hidden by the current filter
        model.set_person(&target, edited.clone())?;
        model.update_filtered_person_list(PersonFilter::All);
        model.update_sorted_person_list(SortOrder::OriginalOrder);

        Ok(CommandResult::new(format!("Edited Person: {}", edited)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DuplicateField;
    use crate::predicates::FindPersonsPredicate;
    use crate::testutil::{alice, benson, carl, typical_book, PersonBuilder};
    use crate::view::PersonComparator;

    fn index(one_based: usize) -> Index {
        Index::from_one_based(one_based).unwrap()
    }

    fn only(keyword: &str) -> PersonFilter {
        PersonFilter::Matching(FindPersonsPredicate::new().with_names(vec![keyword.to_string()]))
    }

    #[test]
    fn test_empty_descriptor_rejected_before_execution() {
        assert_eq!(
            EditCommand::new(index(1), EditPersonDescriptor::new()),
            Err(CommandError::NoFieldEdited)
        );
    }

    #[test]
    fn test_edit_some_fields_keeps_the_rest() {
        let mut model = Model::new(typical_book());
        let descriptor = EditPersonDescriptor {
            phone: Some(Phone::new("91234567").unwrap()),
            email: Some(Email::new("alice@work.com").unwrap()),
            ..EditPersonDescriptor::new()
        };
        let result = EditCommand::new(index(1), descriptor)
            .unwrap()
            .execute(&mut model)
            .unwrap();

        let expected = PersonBuilder::from(&alice())
            .with_phone("91234567")
            .with_email("alice@work.com")
            .build();
        assert_eq!(result.feedback, format!("Edited Person: {}", expected));
        assert_eq!(model.book().persons()[0], expected);
    }

    #[test]
    fn test_edit_renewal_date_only_keeps_number_and_type() {
        let mut model = Model::new(typical_book());
        let descriptor = EditPersonDescriptor {
            renewal_date: Some(RenewalDate::new("01-02-2032").unwrap()),
            ..EditPersonDescriptor::new()
        };
        EditCommand::new(index(2), descriptor)
            .unwrap()
            .execute(&mut model)
            .unwrap();

        let policy = model.book().persons()[1].policy().clone();
        assert_eq!(policy.number(), benson().policy().number());
        assert_eq!(policy.policy_type(), benson().policy().policy_type());
        assert_eq!(policy.renewal_date().to_string(), "01-02-2032");
    }

    #[test]
    fn test_edit_clears_tags_with_empty_set() {
        let mut model = Model::new(typical_book());
        let descriptor = EditPersonDescriptor {
            tags: Some(BTreeSet::new()),
            ..EditPersonDescriptor::new()
        };
        EditCommand::new(index(2), descriptor)
            .unwrap()
            .execute(&mut model)
            .unwrap();
        assert!(model.book().persons()[1].tags().is_empty());
    }

    #[test]
    fn test_edit_uses_filtered_index_and_resets_view() {
        let mut model = Model::new(typical_book());
        model.update_filtered_person_list(only("carl"));
        model.update_sorted_person_list(SortOrder::By(PersonComparator::Name));

        let descriptor = EditPersonDescriptor {
            note: Some(Note::new("Call after 6pm").unwrap()),
            ..EditPersonDescriptor::new()
        };
        EditCommand::new(index(1), descriptor)
            .unwrap()
            .execute(&mut model)
            .unwrap();

        assert_eq!(model.book().persons()[2].note().as_str(), "Call after 6pm");
        assert_eq!(model.persons_view().filter(), &PersonFilter::All);
        assert_eq!(model.persons_view().sort(), SortOrder::OriginalOrder);
        assert_eq!(model.filtered_person_list().len(), 3);
    }

    #[test]
    fn test_edit_index_out_of_range() {
        let mut model = Model::new(typical_book());
        model.update_filtered_person_list(only("carl"));
        let descriptor = EditPersonDescriptor {
            name: Some(Name::new("Someone").unwrap()),
            ..EditPersonDescriptor::new()
        };

        let err = EditCommand::new(index(2), descriptor)
            .unwrap()
            .execute(&mut model)
            .unwrap_err();
        assert_eq!(err, CommandError::IndexOutOfRange { index: 2, size: 1 });

        let mut expected = Model::new(typical_book());
        expected.update_filtered_person_list(only("carl"));
        assert_eq!(model, expected);
    }

    #[test]
    fn test_edit_duplicate_with_displayed_person() {
        let mut model = Model::new(typical_book());
        let descriptor = EditPersonDescriptor {
            policy_number: Some(carl().policy().number().clone()),
            ..EditPersonDescriptor::new()
        };
        let err = EditCommand::new(index(1), descriptor)
            .unwrap()
            .execute(&mut model)
            .unwrap_err();
        assert_eq!(err, CommandError::Duplicate(DuplicateField::PolicyNumber));
        assert_eq!(model, Model::new(typical_book()));
    }

    #[test]
    fn test_edit_duplicate_with_hidden_person_still_rejected() {
        let mut model = Model::new(typical_book());
        model.update_filtered_person_list(only("alice"));
        let descriptor = EditPersonDescriptor {
            name: Some(Name::new("benson meier").unwrap()),
            ..EditPersonDescriptor::new()
        };
        let err = EditCommand::new(index(1), descriptor)
            .unwrap()
            .execute(&mut model)
            .unwrap_err();
        assert_eq!(err, CommandError::Duplicate(DuplicateField::Name));
        assert_eq!(model.book(), &typical_book());
    }

    #[test]
    fn test_edit_to_own_values_is_allowed() {
        let mut model = Model::new(typical_book());
        let descriptor = EditPersonDescriptor {
            name: Some(alice().name().clone()),
            ..EditPersonDescriptor::new()
        };
        EditCommand::new(index(1), descriptor)
            .unwrap()
            .execute(&mut model)
            .unwrap();
        assert_eq!(model.book(), &typical_book());
    }
}
