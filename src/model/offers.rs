use std::sync::{Arc, Mutex};

use crate::api::{Offer, OfferGroup, TripApi};
use crate::core::PointKind;

/// Read-only offer catalog, loaded once and queried synchronously.
pub struct OffersModel {
    api: Arc<dyn TripApi>,
    groups: Mutex<Vec<OfferGroup>>,
}

impl OffersModel {
    pub fn new(api: Arc<dyn TripApi>) -> Self {
        Self {
            api,
            groups: Mutex::new(Vec::new()),
        }
    }

    /// Fetch the catalog; an empty catalog on failure, never an error.
    pub async fn init(&self) {
        let groups = match self.api.offers().await {
            Ok(groups) => groups,
            Err(err) => {
                tracing::warn!("offer catalog load failed: {err}");
                Vec::new()
            }
        };
        *self.groups.lock().expect("offers mutex poisoned") = groups;
    }

    pub fn offer_groups(&self) -> Vec<OfferGroup> {
        self.groups.lock().expect("offers mutex poisoned").clone()
    }

    pub fn group_by_kind(&self, kind: PointKind) -> Option<OfferGroup> {
        self.groups
            .lock()
            .expect("offers mutex poisoned")
            .iter()
            .find(|group| group.kind == kind)
            .cloned()
    }

    /// Resolve the offers a point has selected: the subset of the kind's
    /// group whose ids appear in `ids`.
    pub fn offers_by_ids(&self, kind: PointKind, ids: &[String]) -> Vec<Offer> {
        let Some(group) = self.group_by_kind(kind) else {
            return Vec::new();
        };
        group
            .offers
            .into_iter()
            .filter(|offer| ids.contains(&offer.id))
            .collect()
    }
}
