use std::sync::Arc;

use crate::errors::ServiceError;
use crate::notify::Notifier;
use crate::registry::{model::PersonId, Registry};

/// Formats greetings for registered people and hands them to the notifier.
#[derive(Clone)]
pub struct Greeter {
    registry: Arc<Registry>,
    notifier: Arc<dyn Notifier>,
}

impl Greeter {
    pub fn new(registry: Arc<Registry>, notifier: Arc<dyn Notifier>) -> Self {
        Self { registry, notifier }
    }

    pub async fn greet(&self, person_id: PersonId) -> Result<String, ServiceError> {
        let person = self.registry.get_person(person_id).await?;
        Ok(self.say(format!("Hi {}", person.first_name)))
    }

    pub async fn farewell(&self, person_id: PersonId) -> Result<String, ServiceError> {
        let person = self.registry.get_person(person_id).await?;
        Ok(self.say(format!("Good Bye {}", person.first_name)))
    }

    fn say(&self, message: String) -> String {
        self.notifier.notify(&message);
        message
    }
}
