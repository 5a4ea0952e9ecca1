use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

pub type PersonId = u32;
pub type VaccineId = u32;

/// A person as stored in the snapshot: vaccines are referenced by id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub vaccine_ids: BTreeSet<VaccineId>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaccineRecord {
    pub name: String,
}

/// Person returned from `add_person`, carrying the assigned id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub vaccine_ids: BTreeSet<VaccineId>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vaccine {
    pub id: VaccineId,
    pub name: String,
}

/// Read projection of a person with vaccine ids resolved against the
/// current vaccine table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonView {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub vaccines: Vec<Vaccine>,
}

/// Input for creating a person; id and vaccines are assigned by the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
}

impl NewPerson {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self { first_name: first_name.into(), last_name: last_name.into() }
    }

    /// Trim both names; reject blanks.
    pub fn validate(self) -> Result<Self, ServiceError> {
        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim().to_string();
        if first_name.is_empty() {
            return Err(ServiceError::Validation("firstName must not be empty".into()));
        }
        if last_name.is_empty() {
            return Err(ServiceError::Validation("lastName must not be empty".into()));
        }
        Ok(Self { first_name, last_name })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewVaccine {
    pub name: String,
}

impl NewVaccine {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(self) -> Result<Self, ServiceError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::Validation("vaccine name must not be empty".into()));
        }
        Ok(Self { name })
    }
}

/// Result of linking a vaccine to a person by name.
///
/// `found == false` means no vaccine carried that name; `person` is then the
/// unchanged view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkOutcome {
    pub person: PersonView,
    pub found: bool,
}

/// Full on-disk state: both tables saved and restored together.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    #[serde(default)]
    pub people: BTreeMap<PersonId, PersonRecord>,
    #[serde(default)]
    pub vaccines: BTreeMap<VaccineId, VaccineRecord>,
}
