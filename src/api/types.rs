use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::core::{EventPoint, PointKind};

/// Event point in server shape: snake-style price/date/favorite fields and
/// dates as RFC 3339 strings. A draft being created serializes without an
/// id; the server assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PointKind,
    pub base_price: u32,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub destination: String,
    pub offers: Vec<String>,
    pub is_favorite: bool,
}

impl PointRecord {
    /// Adapt a server record to the client shape: parse date strings into
    /// timestamps, preserving nulls.
    pub fn into_point(self) -> Result<EventPoint, ApiError> {
        Ok(EventPoint {
            date_from: parse_date(self.date_from.as_deref())?,
            date_to: parse_date(self.date_to.as_deref())?,
            id: self.id,
            kind: self.kind,
            base_price: self.base_price,
            destination: self.destination,
            offers: self.offers,
            is_favorite: self.is_favorite,
        })
    }

    /// Adapt a client point back to the server shape.
    pub fn from_point(point: &EventPoint) -> Self {
        Self {
            id: point.id.clone(),
            kind: point.kind,
            base_price: point.base_price,
            date_from: point.date_from.map(format_date),
            date_to: point.date_to.map(format_date),
            destination: point.destination.clone(),
            offers: point.offers.clone(),
            is_favorite: point.is_favorite,
        }
    }
}

fn parse_date(value: Option<&str>) -> Result<Option<DateTime<Utc>>, ApiError> {
    match value {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|parsed| Some(parsed.with_timezone(&Utc)))
            .map_err(|err| ApiError::Decode(format!("bad date {raw:?}: {err}"))),
    }
}

fn format_date(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// One selectable extra for a point kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub price: u32,
}

/// Offer catalog entry: all offers available for one point kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferGroup {
    #[serde(rename = "type")]
    pub kind: PointKind,
    pub offers: Vec<Offer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub src: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub description: String,
    pub pictures: Vec<Picture>,
}
