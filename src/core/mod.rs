//! Shared domain types: event points, change classification, filter
//! predicates, and sort comparators.

mod filter;
mod point;
mod sort;
mod update;

pub use filter::FilterKind;
pub use point::{is_minor_update, new_point_template, EventPoint, PointKind};
pub use sort::SortKind;
pub use update::{UpdateType, UserAction};
