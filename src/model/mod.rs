//! Stores owning the authoritative in-memory collections.
//!
//! - `PointsModel`: the event-point collection; every mutation is confirmed
//!   remotely before local state changes, then republished over the bus
//! - `FilterModel`: the single active filter selector
//! - `OffersModel` / `DestinationsModel`: read-only catalogs loaded once and
//!   queried synchronously
//!
//! Presenters never mutate collections directly; all writes go through a
//! store method, so each mutation is atomic from the caller's perspective:
//! either fully applied and notified, or not applied and re-raised.

mod destinations;
mod filter;
mod offers;
mod points;

pub use destinations::DestinationsModel;
pub use filter::FilterModel;
pub use offers::OffersModel;
pub use points::PointsModel;

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    Api(#[from] ApiError),
    /// Update/delete referenced an id absent from the local collection.
    /// A caller contract violation, not a user-recoverable failure.
    #[error("no stored point with id {0}")]
    NotFound(String),
}
