use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EventPoint;

/// Active list filter. Process-wide single current value, owned by the
/// filter model and mutated only through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    Everything,
    Future,
    Present,
    Past,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Everything,
        FilterKind::Future,
        FilterKind::Present,
        FilterKind::Past,
    ];

    /// Pure membership predicate, evaluated against the supplied `now` so
    /// the same instant applies across a whole derivation pass.
    pub fn matches(&self, point: &EventPoint, now: DateTime<Utc>) -> bool {
        match self {
            FilterKind::Everything => true,
            FilterKind::Future => point.date_from.is_some_and(|from| from > now),
            FilterKind::Present => match (point.date_from, point.date_to) {
                (Some(from), Some(to)) => from < now && now < to,
                _ => false,
            },
            FilterKind::Past => point.date_to.is_some_and(|to| to < now),
        }
    }

    /// Select the points matching this filter, preserving input order.
    pub fn apply(&self, points: &[EventPoint], now: DateTime<Utc>) -> Vec<EventPoint> {
        points
            .iter()
            .filter(|point| self.matches(point, now))
            .cloned()
            .collect()
    }

    /// Empty-state message shown when this filter yields no points.
    pub fn empty_message(&self) -> &'static str {
        match self {
            FilterKind::Everything => "Click New Event to create your first point",
            FilterKind::Future => "There are no future events now",
            FilterKind::Present => "There are no present events now",
            FilterKind::Past => "There are no past events now",
        }
    }
}
