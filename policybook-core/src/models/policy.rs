use chrono::{Local, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

use super::{PolicyNumber, ValidationError};

/// Display and storage format of renewal dates
pub const RENEWAL_DATE_FORMAT: &str = "%d-%m-%Y";

/// Represents the kind of cover a policy provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PolicyType {
    #[default]
    Life,
    Health,
    Property,
    Vehicle,
    Travel,
}

impl PolicyType {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Policy type should be one of: Life, Health, Property, Vehicle, Travel";

    pub const ALL: [PolicyType; 5] = [
        PolicyType::Life,
        PolicyType::Health,
        PolicyType::Property,
        PolicyType::Vehicle,
        PolicyType::Travel,
    ];

    pub fn is_valid(raw: &str) -> bool {
        raw.parse::<PolicyType>().is_ok()
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyType::Life => write!(f, "Life"),
            PolicyType::Health => write!(f, "Health"),
            PolicyType::Property => write!(f, "Property"),
            PolicyType::Vehicle => write!(f, "Vehicle"),
            PolicyType::Travel => write!(f, "Travel"),
        }
    }
}

impl FromStr for PolicyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "life" => Ok(PolicyType::Life),
            "health" => Ok(PolicyType::Health),
            "property" => Ok(PolicyType::Property),
            "vehicle" => Ok(PolicyType::Vehicle),
            "travel" => Ok(PolicyType::Travel),
            _ => Err(ValidationError::new(Self::MESSAGE_CONSTRAINTS)),
        }
    }
}

/// Calendar date on which a policy is due for renewal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenewalDate(NaiveDate);

impl RenewalDate {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Renewal dates should be in the format DD-MM-YYYY and must be a valid calendar date";

    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_some()
    }

    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        Self::parse(raw.trim())
            .map(Self)
            .ok_or_else(|| ValidationError::new(Self::MESSAGE_CONSTRAINTS))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Renewal date given to policies created without one: a year after `today`
    pub fn default_from(today: NaiveDate) -> Self {
        Self(today.checked_add_months(Months::new(12)).unwrap_or(today))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    // chrono accepts single-digit fields for %d/%m, so pin the shape first
    fn parse(raw: &str) -> Option<NaiveDate> {
        let bytes = raw.as_bytes();
        if bytes.len() != 10 || bytes[2] != b'-' || bytes[5] != b'-' {
            return None;
        }
        NaiveDate::parse_from_str(raw, RENEWAL_DATE_FORMAT).ok()
    }
}

impl fmt::Display for RenewalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RENEWAL_DATE_FORMAT))
    }
}

impl FromStr for RenewalDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// An insurance policy held by a person
///
/// The policy number is what identifies a policy across the whole book;
/// renewal date and type are descriptive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Policy {
    number: PolicyNumber,
    renewal_date: RenewalDate,
    policy_type: PolicyType,
}

impl Policy {
    pub fn new(number: PolicyNumber, renewal_date: RenewalDate, policy_type: PolicyType) -> Self {
        Self {
            number,
            renewal_date,
            policy_type,
        }
    }

    /// Creates a Life policy renewing one year after `today`
    pub fn with_defaults(number: PolicyNumber, today: NaiveDate) -> Self {
        Self::new(number, RenewalDate::default_from(today), PolicyType::default())
    }

    pub fn number(&self) -> &PolicyNumber {
        &self.number
    }

    pub fn renewal_date(&self) -> RenewalDate {
        self.renewal_date
    }

    pub fn policy_type(&self) -> PolicyType {
        self.policy_type
    }

    /// Days from today until renewal; negative once overdue
    pub fn days_until_renewal(&self) -> i64 {
        self.days_until_renewal_from(Local::now().date_naive())
    }

    pub fn days_until_renewal_from(&self, today: NaiveDate) -> i64 {
        self.renewal_date
            .date()
            .signed_duration_since(today)
            .num_days()
    }

    pub fn with_number(&self, number: PolicyNumber) -> Self {
        Self {
            number,
            ..self.clone()
        }
    }

    pub fn with_renewal_date(&self, renewal_date: RenewalDate) -> Self {
        Self {
            renewal_date,
            ..self.clone()
        }
    }

    pub fn with_policy_type(&self, policy_type: PolicyType) -> Self {
        Self {
            policy_type,
            ..self.clone()
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, renews {})",
            self.number, self.policy_type, self.renewal_date
        )
    }
}
