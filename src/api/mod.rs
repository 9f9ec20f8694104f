//! Remote data-access collaborator.
//!
//! Models talk to the backing service through the [`TripApi`] trait and
//! server-shaped records; [`TripApiClient`] is the REST implementation.
//! Conversion between the wire shape and the client [`EventPoint`] shape
//! (field renames, RFC 3339 date parsing, null preservation) lives with the
//! record types.

mod client;
mod types;

pub use client::TripApiClient;
pub use types::{Destination, Offer, OfferGroup, Picture, PointRecord};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {endpoint}")]
    Status { status: u16, endpoint: String },
    #[error("invalid record: {0}")]
    Decode(String),
}

/// Asynchronous access to the remote trip collection.
///
/// Reads return the full server-shaped collections; mutations accept and
/// return server-shaped records and fail with [`ApiError`] on any
/// transport or HTTP failure.
#[async_trait]
pub trait TripApi: Send + Sync {
    async fn event_points(&self) -> Result<Vec<PointRecord>, ApiError>;
    async fn offers(&self) -> Result<Vec<OfferGroup>, ApiError>;
    async fn destinations(&self) -> Result<Vec<Destination>, ApiError>;
    async fn create_point(&self, record: PointRecord) -> Result<PointRecord, ApiError>;
    async fn update_point(&self, record: PointRecord) -> Result<PointRecord, ApiError>;
    async fn delete_point(&self, id: &str) -> Result<(), ApiError>;
}
