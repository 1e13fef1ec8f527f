use chrono::{Local, NaiveDate};
use fs2::FileExt;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::book::PolicyBook;
use crate::models::{
    Address, Email, Name, Note, Person, Phone, Policy, PolicyNumber, PolicyType, RenewalDate,
    Tag, ValidationError,
};

const LOCK_TIMEOUT: Duration = Duration::from_secs(5);
const LOCK_RETRY: Duration = Duration::from_millis(100);

/// A stored record that cannot become a person
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Person's {0} field is missing!")]
    MissingField(&'static str),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Error type for storage operations
#[derive(Debug)]
pub enum StorageError {
    /// Lock file held by another process past the timeout
    FileLocked(PathBuf),
    /// Other IO error
    Io(io::Error),
    /// Not a JSON policy book document
    Parse(String),
    /// Book could not be written out as JSON
    Serialize(String),
    /// Record at a 1-based position failed conversion
    Schema { position: usize, source: RecordError },
    /// Two records describe the same person
    DuplicatePersons,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::FileLocked(path) => write!(
                f,
                "Timeout waiting for file lock - another process may be editing: {:?}",
                path
            ),
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Parse(s) => write!(f, "Parse error: {}", s),
            StorageError::Serialize(s) => write!(f, "Serialize error: {}", s),
            StorageError::Schema { position, source } => {
                write!(f, "Person #{}: {}", position, source)
            }
            StorageError::DuplicatePersons => {
                write!(f, "Persons list contains duplicate person(s).")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Schema { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

/// On-disk shape of a person
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub policy_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<String>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, RecordError> {
    value.as_deref().ok_or(RecordError::MissingField(field))
}

impl PersonRecord {
    /// Converts into a person; a missing renewal date becomes one year after `today`
    pub fn to_person(&self, today: NaiveDate) -> Result<Person, RecordError> {
        let name = Name::new(required(&self.name, "Name")?)?;
        let phone = Phone::new(required(&self.phone, "Phone")?)?;
        let email = Email::new(required(&self.email, "Email")?)?;
        let address = Address::new(required(&self.address, "Address")?)?;
        let number = PolicyNumber::new(required(&self.policy_number, "Policy")?)?;

        let renewal_date = match &self.renewal_date {
            Some(raw) => RenewalDate::new(raw)?,
            None => RenewalDate::default_from(today),
        };
        let policy_type = match &self.policy_type {
            Some(raw) => raw.parse::<PolicyType>()?,
            None => PolicyType::default(),
        };
        let note = Note::new(&self.note)?;
        let tags = self
            .tags
            .iter()
            .map(|t| Tag::new(t))
            .collect::<Result<_, _>>()?;

        Ok(Person::new(
            name,
            phone,
            email,
            address,
            Policy::new(number, renewal_date, policy_type),
            note,
            tags,
        ))
    }
}

impl From<&Person> for PersonRecord {
    fn from(person: &Person) -> Self {
        let policy = person.policy();
        Self {
            name: Some(person.name().to_string()),
            phone: Some(person.phone().to_string()),
            email: Some(person.email().to_string()),
            address: Some(person.address().to_string()),
            policy_number: Some(policy.number().to_string()),
            renewal_date: Some(policy.renewal_date().to_string()),
            policy_type: Some(policy.policy_type().to_string()),
            note: person.note().to_string(),
            tags: person.tags().iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BookDocument {
    #[serde(default)]
    persons: Vec<PersonRecord>,
}

/// Handles saving and loading the policy book from disk with file locking
pub struct Storage {
    file_path: PathBuf,
    lock_file_path: PathBuf,
}

impl Storage {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let mut lock_name = file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("policybook.json"));
        lock_name.push(".lock");
        let lock_file_path = file_path.with_file_name(lock_name);
        Self {
            file_path,
            lock_file_path,
        }
    }

    /// Returns the path to the storage file
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_file_path
    }

    fn wait_for_lock<F>(&self, lock_file: &File, try_lock: F) -> Result<(), StorageError>
    where
        F: Fn(&File) -> io::Result<()>,
    {
        let start = Instant::now();
        let mut warned = false;
        loop {
            match try_lock(lock_file) {
                Ok(()) => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    if start.elapsed() > LOCK_TIMEOUT {
                        return Err(StorageError::FileLocked(self.file_path.clone()));
                    }
                    if !warned {
                        warn!("Waiting for lock on {:?}", self.lock_file_path);
                        warned = true;
                    }
                    std::thread::sleep(LOCK_RETRY);
                }
                Err(e) => return Err(StorageError::Io(e)),
            }
        }
    }

    /// Acquire an exclusive lock; held until the returned handle is dropped
    fn acquire_write_lock(&self) -> Result<File, StorageError> {
        if let Some(parent) = self.lock_file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.lock_file_path)?;
        self.wait_for_lock(&lock_file, |f| FileExt::try_lock_exclusive(f))?;
        Ok(lock_file)
    }

    /// Acquire a shared lock if anyone has ever written the file
    fn acquire_read_lock(&self) -> Result<Option<File>, StorageError> {
        if !self.lock_file_path.exists() {
            return Ok(None);
        }
        let lock_file = OpenOptions::new().read(true).open(&self.lock_file_path)?;
        self.wait_for_lock(&lock_file, |f| FileExt::try_lock_shared(f))?;
        Ok(Some(lock_file))
    }

    /// Loads the policy book; a missing file is an empty book
    pub fn load(&self) -> Result<PolicyBook, StorageError> {
        self.load_on(Local::now().date_naive())
    }

    /// Same as [`Storage::load`] with an explicit current date for defaulted renewal dates
    pub fn load_on(&self, today: NaiveDate) -> Result<PolicyBook, StorageError> {
        if !self.file_path.exists() {
            info!("No policy book at {:?}, starting empty", self.file_path);
            return Ok(PolicyBook::new());
        }

        let _lock = self.acquire_read_lock()?;
        let content = fs::read_to_string(&self.file_path)?;
        let document: BookDocument =
            serde_json::from_str(&content).map_err(|e| StorageError::Parse(e.to_string()))?;

        let persons = document
            .persons
            .iter()
            .enumerate()
            .map(|(i, record)| {
                record
                    .to_person(today)
                    .map_err(|source| StorageError::Schema {
                        position: i + 1,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let book = PolicyBook::from_persons(persons).map_err(|_| StorageError::DuplicatePersons)?;
        info!("Loaded {} persons from {:?}", book.len(), self.file_path);
        Ok(book)
    }

    /// Saves the policy book as pretty-printed JSON
    pub fn save(&self, book: &PolicyBook) -> Result<(), StorageError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut lock_file = self.acquire_write_lock()?;
        let _ = writeln!(
            lock_file,
            "Locked by PID {} at {}",
            std::process::id(),
            chrono::Utc::now().to_rfc3339()
        );

        let document = BookDocument {
            persons: book.persons().iter().map(PersonRecord::from).collect(),
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        fs::write(&self.file_path, json)?;
        info!("Saved {} persons to {:?}", book.len(), self.file_path);
        Ok(())
    }
}
