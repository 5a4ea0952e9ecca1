//! People/vaccine registry
//!
//! [`store::RecordStore`] is the plain in-memory state. [`Registry`] is the
//! handle the request layer owns: it guards the store with a read-write lock
//! and saves a snapshot after every successful mutation while still holding
//! the write lock, so the file never lags behind an acknowledged change.

pub mod model;
pub mod store;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::storage::SnapshotStore;
use model::{LinkOutcome, NewPerson, NewVaccine, Person, PersonId, PersonView, Vaccine};
use store::RecordStore;

pub struct Registry {
    state: RwLock<RecordStore>,
    snapshots: Arc<dyn SnapshotStore>,
}

impl Registry {
    /// Load the last snapshot, or seed the default data and save it right away.
    pub async fn open(snapshots: Arc<dyn SnapshotStore>) -> Result<Arc<Self>, ServiceError> {
        let store = match snapshots.load().await? {
            Some(snapshot) => {
                let store = RecordStore::from_snapshot(snapshot);
                info!(event = "snapshot_loaded", people = store.people_len(), vaccines = store.vaccines_len(), "registry restored");
                store
            }
            None => {
                let store = RecordStore::seeded();
                snapshots.save(&store.to_snapshot()).await?;
                info!(event = "snapshot_seeded", people = store.people_len(), vaccines = store.vaccines_len(), "no snapshot found; seeded defaults");
                store
            }
        };
        Ok(Arc::new(Self { state: RwLock::new(store), snapshots }))
    }

    pub async fn get_person(&self, id: PersonId) -> Result<PersonView, ServiceError> {
        self.state.read().await.get_person(id)
    }

    pub async fn list_people(&self) -> Vec<PersonView> {
        self.state.read().await.list_people()
    }

    pub async fn list_vaccines(&self) -> Vec<Vaccine> {
        self.state.read().await.list_vaccines()
    }

    pub async fn add_person(&self, input: NewPerson) -> Result<Person, ServiceError> {
        let input = input.validate()?;
        let person = self.commit(|store| Ok((store.add_person(input)?, true))).await?;
        debug!(id = person.id, "person added");
        Ok(person)
    }

    pub async fn add_vaccine(&self, input: NewVaccine) -> Result<Vaccine, ServiceError> {
        let input = input.validate()?;
        let vaccine = self.commit(|store| Ok((store.add_vaccine(input)?, true))).await?;
        debug!(id = vaccine.id, name = %vaccine.name, "vaccine added");
        Ok(vaccine)
    }

    /// Link by vaccine name. A name miss returns `found == false` and saves nothing.
    pub async fn link_vaccine(&self, person_id: PersonId, vaccine_name: &str) -> Result<LinkOutcome, ServiceError> {
        let outcome = self
            .commit(|store| {
                let outcome = store.link_vaccine(person_id, vaccine_name)?;
                let found = outcome.found;
                Ok((outcome, found))
            })
            .await?;
        debug!(person_id, vaccine = vaccine_name, found = outcome.found, "link vaccine");
        Ok(outcome)
    }

    /// Save the current state as-is.
    pub async fn persist(&self) -> Result<(), ServiceError> {
        let state = self.state.read().await;
        self.snapshots.save(&state.to_snapshot()).await
    }

    /// Apply `f` to a working copy; when it reports a change, save the copy and
    /// only then publish it. A failed save leaves the published state untouched.
    async fn commit<T, F>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut RecordStore) -> Result<(T, bool), ServiceError>,
    {
        let mut state = self.state.write().await;
        let mut next = (*state).clone();
        let (out, changed) = f(&mut next)?;
        if changed {
            self.snapshots.save(&next.to_snapshot()).await?;
            *state = next;
        }
        Ok(out)
    }
}
