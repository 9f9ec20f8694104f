use std::sync::{Arc, Mutex};

use crate::api::{PointRecord, TripApi};
use crate::bus::{ListenerId, Observable};
use crate::core::{EventPoint, UpdateType};

use super::ModelError;

/// The event-point store.
///
/// Owns the ordered collection and republishes every confirmed change over
/// its observable. Local state changes only after the remote call succeeds,
/// so the collection is always consistent with the backend of record;
/// immediate "saving" feedback is the presentation layer's job.
pub struct PointsModel {
    api: Arc<dyn TripApi>,
    points: Mutex<Vec<EventPoint>>,
    observable: Observable<EventPoint>,
}

impl PointsModel {
    pub fn new(api: Arc<dyn TripApi>) -> Self {
        Self {
            api,
            points: Mutex::new(Vec::new()),
            observable: Observable::new(),
        }
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(UpdateType, Option<&EventPoint>) + Send + Sync + 'static,
    ) -> ListenerId {
        self.observable.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.observable.unsubscribe(id)
    }

    /// Snapshot of the current collection, in storage order.
    pub fn event_points(&self) -> Vec<EventPoint> {
        self.points.lock().expect("points mutex poisoned").clone()
    }

    /// Fetch the remote collection and replace the local one atomically,
    /// then notify `Init`. A failed fetch clears the collection and
    /// notifies `Error` instead; the failure never propagates past this
    /// boundary because no single presenter owns it.
    pub async fn init(&self) {
        let loaded = match self.api.event_points().await {
            Ok(records) => records
                .into_iter()
                .map(PointRecord::into_point)
                .collect::<Result<Vec<_>, _>>(),
            Err(err) => Err(err),
        };
        match loaded {
            Ok(points) => {
                *self.points.lock().expect("points mutex poisoned") = points;
                self.observable.notify(UpdateType::Init, None);
            }
            Err(err) => {
                tracing::warn!("initial load failed: {err}");
                self.points.lock().expect("points mutex poisoned").clear();
                self.observable.notify(UpdateType::Error, None);
            }
        }
    }

    /// Update one point remotely, then replace the stored entry in place
    /// (same index) with the server-confirmed record and notify
    /// `update_type` with it. A remote failure re-raises without touching
    /// local state so the caller can roll the view back.
    pub async fn update_point(
        &self,
        update_type: UpdateType,
        point: EventPoint,
    ) -> Result<EventPoint, ModelError> {
        if !self.contains(&point.id) {
            return Err(ModelError::NotFound(point.id));
        }
        let saved = self
            .api
            .update_point(PointRecord::from_point(&point))
            .await?
            .into_point()?;
        {
            let mut points = self.points.lock().expect("points mutex poisoned");
            if let Some(index) = points.iter().position(|p| p.id == saved.id) {
                points[index] = saved.clone();
            }
        }
        self.observable.notify(update_type, Some(&saved));
        Ok(saved)
    }

    /// Create one point remotely; on success prepend the server-confirmed
    /// record (server-assigned id) and notify.
    pub async fn add_point(
        &self,
        update_type: UpdateType,
        point: EventPoint,
    ) -> Result<EventPoint, ModelError> {
        let saved = self
            .api
            .create_point(PointRecord::from_point(&point))
            .await?
            .into_point()?;
        self.points
            .lock()
            .expect("points mutex poisoned")
            .insert(0, saved.clone());
        self.observable.notify(update_type, Some(&saved));
        Ok(saved)
    }

    /// Delete one point remotely; on success remove the stored entry and
    /// notify `update_type` with no payload.
    pub async fn delete_point(
        &self,
        update_type: UpdateType,
        point: EventPoint,
    ) -> Result<(), ModelError> {
        if !self.contains(&point.id) {
            return Err(ModelError::NotFound(point.id));
        }
        self.api.delete_point(&point.id).await?;
        self.points
            .lock()
            .expect("points mutex poisoned")
            .retain(|p| p.id != point.id);
        self.observable.notify(update_type, None);
        Ok(())
    }

    fn contains(&self, id: &str) -> bool {
        self.points
            .lock()
            .expect("points mutex poisoned")
            .iter()
            .any(|p| p.id == id)
    }
}
