//! Board orchestration and per-item presentation.
//!
//! - `board`: derives the filtered, sorted visible set, owns the per-point
//!   presenters, classifies and dispatches mutation intents, and decides
//!   between a localized patch, a list refresh, and a full rebuild
//! - `point`: the two-mode (display/edit) state machine bound to one point
//! - `new_point`: the creation flow, a form with no backing model entry yet
//!
//! Presenters report user intents upward through the callbacks below; the
//! board is the only component that talks to the stores.

mod board;
mod new_point;
mod point;

pub use board::{BoardCollaborators, BoardModels, BoardPresenter};
pub use new_point::NewPointPresenter;
pub use point::{Mode, PointPresenter};

use std::sync::Arc;

use crate::core::{EventPoint, UpdateType, UserAction};

/// Mutation intent raised by an item or creation presenter.
pub type DataChangeHandler = Arc<dyn Fn(UserAction, UpdateType, EventPoint) + Send + Sync>;

/// Raised just before a presenter enters edit mode, so siblings can close.
pub type ModeChangeHandler = Arc<dyn Fn() + Send + Sync>;

/// Raised when the creation form goes away; the flag is true when the user
/// canceled (rather than the board tearing the form down).
pub type CreationEndHandler = Arc<dyn Fn(bool) + Send + Sync>;

/// Embedder callback fired whenever creation ends, used to re-enable the
/// external "new event" trigger.
pub type CreationEndCallback = Arc<dyn Fn() + Send + Sync>;
