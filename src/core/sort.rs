use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::EventPoint;

/// Active sort order for the visible list. `Event` and `Offers` exist in the
/// selector but are disabled by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    #[default]
    Day,
    Event,
    Time,
    Price,
    Offers,
}

impl SortKind {
    pub const ALL: [SortKind; 5] = [
        SortKind::Day,
        SortKind::Event,
        SortKind::Time,
        SortKind::Price,
        SortKind::Offers,
    ];

    pub fn is_selectable(&self) -> bool {
        matches!(self, SortKind::Day | SortKind::Time | SortKind::Price)
    }

    /// Sort in place: day = start ascending, time = duration descending,
    /// price = price descending. The sort is stable, so equal keys keep
    /// their original relative order and the total order is deterministic.
    pub fn sort(&self, points: &mut [EventPoint]) {
        match self {
            SortKind::Day => points.sort_by(compare_by_day),
            SortKind::Time => points.sort_by(compare_by_time),
            SortKind::Price => points.sort_by(compare_by_price),
            // Disabled selectors leave the order untouched.
            SortKind::Event | SortKind::Offers => {}
        }
    }
}

fn compare_by_day(a: &EventPoint, b: &EventPoint) -> Ordering {
    match (a.date_from, b.date_from) {
        (Some(a), Some(b)) => a.cmp(&b),
        // Undated points sink to the end.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_by_time(a: &EventPoint, b: &EventPoint) -> Ordering {
    b.duration().cmp(&a.duration())
}

fn compare_by_price(a: &EventPoint, b: &EventPoint) -> Ordering {
    b.base_price.cmp(&a.base_price)
}
