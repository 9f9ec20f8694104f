use std::sync::{Arc, Mutex};

use crate::api::{Destination, TripApi};

/// Read-only destination catalog, loaded once and queried synchronously.
pub struct DestinationsModel {
    api: Arc<dyn TripApi>,
    destinations: Mutex<Vec<Destination>>,
}

impl DestinationsModel {
    pub fn new(api: Arc<dyn TripApi>) -> Self {
        Self {
            api,
            destinations: Mutex::new(Vec::new()),
        }
    }

    /// Fetch the catalog; an empty catalog on failure, never an error.
    pub async fn init(&self) {
        let destinations = match self.api.destinations().await {
            Ok(destinations) => destinations,
            Err(err) => {
                tracing::warn!("destination catalog load failed: {err}");
                Vec::new()
            }
        };
        *self.destinations.lock().expect("destinations mutex poisoned") = destinations;
    }

    pub fn destinations(&self) -> Vec<Destination> {
        self.destinations
            .lock()
            .expect("destinations mutex poisoned")
            .clone()
    }

    pub fn destination_by_id(&self, id: &str) -> Option<Destination> {
        self.destinations
            .lock()
            .expect("destinations mutex poisoned")
            .iter()
            .find(|destination| destination.id == id)
            .cloned()
    }
}
