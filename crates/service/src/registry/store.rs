use std::collections::BTreeMap;

use crate::errors::ServiceError;

use super::model::{
    LinkOutcome, NewPerson, NewVaccine, Person, PersonId, PersonRecord, PersonView, Snapshot, Vaccine,
    VaccineId, VaccineRecord,
};

/// In-memory people and vaccine tables.
///
/// Holds no file handle: persisting is the owner's job (see
/// [`crate::registry::Registry`]). Ids come from `max key + 1`, starting at 0,
/// and are never handed out twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordStore {
    people: BTreeMap<PersonId, PersonRecord>,
    vaccines: BTreeMap<VaccineId, VaccineRecord>,
}

fn next_id<V>(map: &BTreeMap<u32, V>, entity: &str) -> Result<u32, ServiceError> {
    match map.last_key_value() {
        None => Ok(0),
        Some((k, _)) => k.checked_add(1).ok_or_else(|| ServiceError::IdSpaceExhausted(entity.to_string())),
    }
}

impl RecordStore {
    /// Data written on first start when no snapshot exists.
    pub fn seeded() -> Self {
        let person = |first: &str, last: &str| PersonRecord {
            first_name: first.into(),
            last_name: last.into(),
            vaccine_ids: Default::default(),
        };
        Self {
            people: BTreeMap::from([(0, person("Ryan", "Anderson")), (1, person("Dani", "Trugilo"))]),
            vaccines: BTreeMap::from([(0, VaccineRecord { name: "Covid".into() })]),
        }
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self { people: snapshot.people, vaccines: snapshot.vaccines }
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot { people: self.people.clone(), vaccines: self.vaccines.clone() }
    }

    pub fn people_len(&self) -> usize { self.people.len() }

    pub fn vaccines_len(&self) -> usize { self.vaccines.len() }

    fn view(&self, id: PersonId, rec: &PersonRecord) -> PersonView {
        let vaccines = rec
            .vaccine_ids
            .iter()
            .filter_map(|vid| self.vaccines.get(vid).map(|v| Vaccine { id: *vid, name: v.name.clone() }))
            .collect();
        PersonView { id, first_name: rec.first_name.clone(), last_name: rec.last_name.clone(), vaccines }
    }

    pub fn get_person(&self, id: PersonId) -> Result<PersonView, ServiceError> {
        self.people
            .get(&id)
            .map(|rec| self.view(id, rec))
            .ok_or_else(|| ServiceError::not_found("person", id))
    }

    pub fn list_people(&self) -> Vec<PersonView> {
        self.people.iter().map(|(id, rec)| self.view(*id, rec)).collect()
    }

    pub fn list_vaccines(&self) -> Vec<Vaccine> {
        self.vaccines.iter().map(|(id, v)| Vaccine { id: *id, name: v.name.clone() }).collect()
    }

    pub fn add_person(&mut self, input: NewPerson) -> Result<Person, ServiceError> {
        let id = next_id(&self.people, "person")?;
        let rec = PersonRecord { first_name: input.first_name, last_name: input.last_name, vaccine_ids: Default::default() };
        let person = Person {
            id,
            first_name: rec.first_name.clone(),
            last_name: rec.last_name.clone(),
            vaccine_ids: rec.vaccine_ids.clone(),
        };
        self.people.insert(id, rec);
        Ok(person)
    }

    pub fn add_vaccine(&mut self, input: NewVaccine) -> Result<Vaccine, ServiceError> {
        let id = next_id(&self.vaccines, "vaccine")?;
        self.vaccines.insert(id, VaccineRecord { name: input.name.clone() });
        Ok(Vaccine { id, name: input.name })
    }

    /// First vaccine (lowest id, i.e. earliest inserted) whose name matches exactly.
    pub fn find_vaccine_by_name(&self, name: &str) -> Option<Vaccine> {
        self.vaccines
            .iter()
            .find(|(_, v)| v.name == name)
            .map(|(id, v)| Vaccine { id: *id, name: v.name.clone() })
    }

    pub fn link_vaccine(&mut self, person_id: PersonId, vaccine_name: &str) -> Result<LinkOutcome, ServiceError> {
        if !self.people.contains_key(&person_id) {
            return Err(ServiceError::not_found("person", person_id));
        }
        let Some(vaccine) = self.find_vaccine_by_name(vaccine_name) else {
            return Ok(LinkOutcome { person: self.get_person(person_id)?, found: false });
        };
        if let Some(rec) = self.people.get_mut(&person_id) {
            rec.vaccine_ids.insert(vaccine.id);
        }
        Ok(LinkOutcome { person: self.get_person(person_id)?, found: true })
    }
}
