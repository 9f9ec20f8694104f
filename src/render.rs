//! Render and view collaborator contracts.
//!
//! The engine decides *what* is on the board and *when* it changes; how a
//! component draws itself is entirely the embedder's concern. Presenters
//! drive components through [`Renderer`] by opaque id and construct them
//! through [`ViewFactory`] from current model data.

use uuid::Uuid;

use crate::api::{Destination, Offer, OfferGroup};
use crate::core::{EventPoint, SortKind};

/// Opaque identity of one rendered component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(Uuid);

impl ComponentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPosition {
    AfterBegin,
    #[default]
    BeforeEnd,
}

/// Mounting contract the engine calls; it never knows how a component
/// renders itself.
pub trait Renderer: Send + Sync {
    fn render(&self, component: ComponentId, container: ComponentId, position: RenderPosition);
    fn replace(&self, new: ComponentId, old: ComponentId);
    fn remove(&self, component: ComponentId);
}

/// Visual state of an edit form while a mutation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormState {
    pub disabled: bool,
    pub saving: bool,
    pub deleting: bool,
}

/// Read-mode row for one event point.
pub trait PointRow: Send + Sync {
    fn component(&self) -> ComponentId;
    fn shake(&self);
}

/// Edit-mode form for one event point (or a creation draft).
pub trait EditForm: Send + Sync {
    fn component(&self) -> ComponentId;
    fn shake(&self);
    fn set_state(&self, state: FormState);
    /// Discard in-progress edits and show `point`'s values again.
    fn reset(&self, point: &EventPoint);
}

/// Container the point rows and the creation form mount into.
pub trait ListShell: Send + Sync {
    fn component(&self) -> ComponentId;
}

pub trait SortBar: Send + Sync {
    fn component(&self) -> ComponentId;
}

/// Single-message view: loading, load-failure, and empty-state text.
pub trait Placeholder: Send + Sync {
    fn component(&self) -> ComponentId;
}

/// Constructs view components from current model data.
pub trait ViewFactory: Send + Sync {
    fn point_row(
        &self,
        point: &EventPoint,
        destination: Option<&Destination>,
        offers: &[Offer],
    ) -> Box<dyn PointRow>;

    fn edit_form(
        &self,
        point: &EventPoint,
        destinations: &[Destination],
        offer_groups: &[OfferGroup],
    ) -> Box<dyn EditForm>;

    fn list_shell(&self) -> Box<dyn ListShell>;

    fn sort_bar(&self, active: SortKind) -> Box<dyn SortBar>;

    fn placeholder(&self, message: &str) -> Box<dyn Placeholder>;
}
