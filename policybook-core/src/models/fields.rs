use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Declares a trimmed, validated string value type.
macro_rules! string_field {
    ($(#[$meta:meta])* $name:ident, $constraint:expr, $validator:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub const MESSAGE_CONSTRAINTS: &'static str = $constraint;

            /// Returns true if `raw` is acceptable as-is (no trimming applied)
            pub fn is_valid(raw: &str) -> bool {
                $validator(raw)
            }

            /// Trims `raw` and validates it
            pub fn new(raw: &str) -> Result<Self, ValidationError> {
                let trimmed = raw.trim();
                if !Self::is_valid(trimmed) {
                    return Err(ValidationError::new(Self::MESSAGE_CONSTRAINTS));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

string_field!(
    /// Full name of a person
    Name,
    "Names should only contain alphanumeric characters and spaces, and it should not be blank",
    is_valid_name
);

string_field!(
    /// Contact phone number
    Phone,
    "Phone numbers should only contain numbers, and it should be at least 3 digits long",
    is_valid_phone
);

string_field!(
    /// Contact email address
    Email,
    "Emails should be of the format local-part@domain and adhere to the following constraints:\n\
     1. The local-part should only contain alphanumeric characters and these special characters, \
     excluding the parentheses, (+_.-). The local-part may not start or end with any special characters.\n\
     2. This is followed by a '@' and then a domain name. The domain name is made up of domain labels \
     separated by periods.\n\
     The domain name must:\n\
     - end with a domain label at least 2 characters long\n\
     - have each domain label start and end with alphanumeric characters\n\
     - have each domain label consist of alphanumeric characters, separated only by hyphens, if any.",
    is_valid_email
);

string_field!(
    /// Postal address
    Address,
    "Addresses can take any values, and it should not be blank",
    is_valid_address
);

string_field!(
    /// Free-form remark attached to a person; may be empty
    Note,
    "Notes can take any values, up to 500 characters",
    is_valid_note
);

string_field!(
    /// Single-word label used to group persons
    Tag,
    "Tags names should be alphanumeric",
    is_valid_tag
);

string_field!(
    /// Identifier of an insurance policy, unique across the book
    PolicyNumber,
    "Policy numbers should only contain digits, with no spaces in between",
    is_valid_policy_number
);

const NOTE_MAX_CHARS: usize = 500;
const EMAIL_SPECIAL_CHARS: [char; 4] = ['+', '_', '.', '-'];

impl Name {
    /// Case-insensitive comparison used by the duplicate rule
    pub fn eq_ignore_case(&self, other: &Name) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl Note {
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::empty()
    }
}

fn is_valid_name(raw: &str) -> bool {
    raw.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
        && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ')
}

fn is_valid_phone(raw: &str) -> bool {
    raw.len() >= 3 && raw.chars().all(|c| c.is_ascii_digit())
}

fn is_valid_address(raw: &str) -> bool {
    raw.chars().next().is_some_and(|c| !c.is_whitespace())
}

fn is_valid_note(raw: &str) -> bool {
    raw.chars().count() <= NOTE_MAX_CHARS
}

fn is_valid_tag(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_valid_policy_number(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit())
}

fn is_valid_email(raw: &str) -> bool {
    match raw.split_once('@') {
        Some((local, domain)) => is_valid_local_part(local) && is_valid_domain(domain),
        None => false,
    }
}

fn is_valid_local_part(local: &str) -> bool {
    let (Some(first), Some(last)) = (local.chars().next(), local.chars().last()) else {
        return false;
    };
    first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || EMAIL_SPECIAL_CHARS.contains(&c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    labels.iter().all(|label| is_valid_domain_label(label))
        && labels.last().is_some_and(|label| label.len() >= 2)
}

fn is_valid_domain_label(label: &str) -> bool {
    let (Some(first), Some(last)) = (label.chars().next(), label.chars().last()) else {
        return false;
    };
    first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{
        any_address, any_email, any_name, any_note, any_phone, any_policy_number, any_tag,
    };
    use proptest::prelude::*;

    #[test]
    fn test_name_validation() {
        assert!(Name::is_valid("peter jack"));
        assert!(Name::is_valid("12345"));
        assert!(Name::is_valid("Capital Tan"));
        assert!(!Name::is_valid(""));
        assert!(!Name::is_valid(" "));
        assert!(!Name::is_valid("R@chel"));
        assert!(!Name::is_valid("peter*"));
    }

    #[test]
    fn test_name_and_tag_are_ascii_only() {
        assert!(!Name::is_valid("Zoë Tan"));
        assert!(!Name::is_valid("李小龙"));
        assert!(!Tag::is_valid("café"));
        assert!(!Tag::is_valid("２０２４"));
        assert!(Tag::is_valid("cafe2024"));
    }

    #[test]
    fn test_name_new_trims_and_reports_constraint() {
        assert_eq!(Name::new("  Amy Bee ").unwrap().as_str(), "Amy Bee");

        let err = Name::new("R@chel").unwrap_err();
        assert_eq!(err.message(), Name::MESSAGE_CONSTRAINTS);
        assert_eq!(err.to_string(), Name::MESSAGE_CONSTRAINTS);
    }

    #[test]
    fn test_name_eq_ignore_case() {
        let a = Name::new("Alice Pauline").unwrap();
        let b = Name::new("alice pauline").unwrap();
        assert!(a.eq_ignore_case(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_phone_validation() {
        assert!(Phone::is_valid("911"));
        assert!(Phone::is_valid("93121534"));
        assert!(!Phone::is_valid("91"));
        assert!(!Phone::is_valid("+11"));
        assert!(!Phone::is_valid("9312 1534"));
        assert!(!Phone::is_valid("phone"));
    }

    #[test]
    fn test_email_validation() {
        assert!(Email::is_valid("amy@example.com"));
        assert!(Email::is_valid("a@bc"));
        assert!(Email::is_valid("peter_jack+1@very-long.example.com"));
        assert!(!Email::is_valid("example.com"));
        assert!(!Email::is_valid("@example.com"));
        assert!(!Email::is_valid("peter@"));
        assert!(!Email::is_valid("-peter@example.com"));
        assert!(!Email::is_valid("peter@example.c"));
        assert!(!Email::is_valid("peter@-example.com"));
        assert!(!Email::is_valid("peter@example..com"));
    }

    #[test]
    fn test_address_validation() {
        assert!(Address::is_valid("Blk 456, Den Road, #01-355"));
        assert!(Address::is_valid("-"));
        assert!(!Address::is_valid(""));
        assert!(!Address::is_valid(" "));
    }

    #[test]
    fn test_note_allows_empty_and_limits_length() {
        assert!(Note::new("").unwrap().is_empty());
        assert_eq!(Note::default(), Note::empty());
        assert!(Note::is_valid(&"x".repeat(500)));
        assert!(!Note::is_valid(&"x".repeat(501)));
    }

    #[test]
    fn test_tag_validation() {
        assert!(Tag::is_valid("friends"));
        assert!(!Tag::is_valid("#friend"));
        assert!(!Tag::is_valid("best friend"));
        assert!(!Tag::is_valid(""));
    }

    #[test]
    fn test_policy_number_validation() {
        assert!(PolicyNumber::is_valid("123456"));
        assert!(!PolicyNumber::is_valid("123a"));
        assert!(!PolicyNumber::is_valid("123 456"));
        assert!(!PolicyNumber::is_valid(""));
        assert_eq!(
            PolicyNumber::new("12a").unwrap_err().message(),
            PolicyNumber::MESSAGE_CONSTRAINTS
        );
    }

    #[test]
    fn test_display_and_parse_agree() {
        let email: Email = "amy@example.com".parse().unwrap();
        assert_eq!(email.to_string().parse::<Email>().unwrap(), email);
    }

    proptest! {
        #[test]
        fn test_valid_names_round_trip(raw in any_name()) {
            let name = Name::new(&raw).unwrap();
            prop_assert_eq!(name.as_str(), raw.as_str());
            prop_assert_eq!(name.to_string().parse::<Name>().unwrap(), name);
        }

        #[test]
        fn test_valid_phones_round_trip(raw in any_phone()) {
            let phone = Phone::new(&raw).unwrap();
            prop_assert_eq!(phone.to_string(), raw);
        }

        #[test]
        fn test_valid_emails_round_trip(raw in any_email()) {
            let email = Email::new(&raw).unwrap();
            prop_assert_eq!(email.to_string(), raw.clone());
            prop_assert_eq!(raw.parse::<Email>().unwrap(), email);
        }

        #[test]
        fn test_valid_addresses_round_trip(raw in any_address()) {
            let address = Address::new(&raw).unwrap();
            prop_assert_eq!(address.to_string(), raw);
        }

        #[test]
        fn test_valid_notes_round_trip(raw in any_note()) {
            let note = Note::new(&raw).unwrap();
            prop_assert_eq!(note.is_empty(), raw.is_empty());
            prop_assert_eq!(note.to_string(), raw);
        }

        #[test]
        fn test_valid_tags_round_trip(raw in any_tag()) {
            let tag = Tag::new(&raw).unwrap();
            prop_assert_eq!(tag.to_string().parse::<Tag>().unwrap(), tag);
        }

        #[test]
        fn test_valid_policy_numbers_round_trip(raw in any_policy_number()) {
            let number = PolicyNumber::new(&raw).unwrap();
            prop_assert_eq!(number.to_string(), raw);
        }

        #[test]
        fn test_surrounding_whitespace_is_trimmed(raw in any_name(), pad in "[ \t]{0,3}") {
            let padded = format!("{pad}{raw}{pad}");
            prop_assert_eq!(Name::new(&padded).unwrap(), Name::new(&raw).unwrap());
        }
    }
}
