use serde::{Deserialize, Serialize};

/// Scope of a model change, driving how much of the rendered board is
/// rebuilt when the notification arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateType {
    /// Cosmetic single-item change; only the matching presenter re-renders.
    Patch,
    /// Structural change to one item; the visible set or its order may have
    /// changed, so the list is rebuilt.
    Minor,
    /// Filter/sort context reset; list rebuild plus sort back to default.
    Major,
    /// Initial load completed.
    Init,
    /// Initial load failed.
    Error,
}

/// User-triggered mutation intent raised by an item or creation presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserAction {
    UpdatePoint,
    AddPoint,
    DeletePoint,
}
