use std::sync::Arc;

use service::greeting::Greeter;
use service::notify::Notifier;
use service::registry::Registry;

/// Shared handler state: one registry handle and the greeter built on it.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub greeter: Greeter,
}

impl AppState {
    pub fn new(registry: Arc<Registry>, notifier: Arc<dyn Notifier>) -> Self {
        let greeter = Greeter::new(Arc::clone(&registry), notifier);
        Self { registry, greeter }
    }
}
