//! Headless smoke run against the live trip service.
//!
//! Wires the REST client, the models, and a logging render layer into a
//! board, runs the initial load, and logs the reconciled list. Endpoint and
//! authorization come from `TRIPLINE_ENDPOINT` / `TRIPLINE_AUTHORIZATION`.

use std::sync::Arc;

use tripline::api::{Destination, Offer, OfferGroup, TripApiClient};
use tripline::blocker::{BlockOverlay, UiBlocker, LOWER_LIMIT, UPPER_LIMIT};
use tripline::core::{EventPoint, SortKind};
use tripline::input::{BindingId, EscapeHandler, Keyboard};
use tripline::model::{DestinationsModel, FilterModel, OffersModel, PointsModel};
use tripline::presenter::{BoardCollaborators, BoardModels, BoardPresenter};
use tripline::render::{
    ComponentId, EditForm, FormState, ListShell, Placeholder, PointRow, RenderPosition, Renderer,
    SortBar, ViewFactory,
};

const DEFAULT_ENDPOINT: &str = "https://24.objects.htmlacademy.pro/big-trip";

struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&self, component: ComponentId, container: ComponentId, position: RenderPosition) {
        tracing::debug!(%component, %container, ?position, "render");
    }

    fn replace(&self, new: ComponentId, old: ComponentId) {
        tracing::debug!(%new, %old, "replace");
    }

    fn remove(&self, component: ComponentId) {
        tracing::debug!(%component, "remove");
    }
}

struct LogComponent {
    id: ComponentId,
}

impl LogComponent {
    fn boxed() -> Box<Self> {
        Box::new(Self {
            id: ComponentId::new(),
        })
    }
}

impl PointRow for LogComponent {
    fn component(&self) -> ComponentId {
        self.id
    }

    fn shake(&self) {
        tracing::info!(component = %self.id, "shake");
    }
}

impl EditForm for LogComponent {
    fn component(&self) -> ComponentId {
        self.id
    }

    fn shake(&self) {
        tracing::info!(component = %self.id, "shake");
    }

    fn set_state(&self, state: FormState) {
        tracing::debug!(component = %self.id, ?state, "form state");
    }

    fn reset(&self, point: &EventPoint) {
        tracing::debug!(component = %self.id, id = %point.id, "form reset");
    }
}

impl ListShell for LogComponent {
    fn component(&self) -> ComponentId {
        self.id
    }
}

impl SortBar for LogComponent {
    fn component(&self) -> ComponentId {
        self.id
    }
}

impl Placeholder for LogComponent {
    fn component(&self) -> ComponentId {
        self.id
    }
}

struct LogViews;

impl ViewFactory for LogViews {
    fn point_row(
        &self,
        point: &EventPoint,
        destination: Option<&Destination>,
        offers: &[Offer],
    ) -> Box<dyn PointRow> {
        tracing::info!(
            id = %point.id,
            kind = %point.kind,
            price = point.base_price,
            destination = destination.map(|d| d.name.as_str()).unwrap_or("-"),
            offers = offers.len(),
            "point"
        );
        LogComponent::boxed()
    }

    fn edit_form(
        &self,
        point: &EventPoint,
        _destinations: &[Destination],
        _offer_groups: &[OfferGroup],
    ) -> Box<dyn EditForm> {
        tracing::info!(id = %point.id, "edit form");
        LogComponent::boxed()
    }

    fn list_shell(&self) -> Box<dyn ListShell> {
        LogComponent::boxed()
    }

    fn sort_bar(&self, active: SortKind) -> Box<dyn SortBar> {
        tracing::info!(?active, "sort bar");
        LogComponent::boxed()
    }

    fn placeholder(&self, message: &str) -> Box<dyn Placeholder> {
        tracing::info!("{message}");
        LogComponent::boxed()
    }
}

/// No key source in a smoke run; bindings are accepted and ignored.
struct HeadlessKeyboard;

impl Keyboard for HeadlessKeyboard {
    fn bind_escape(&self, _handler: EscapeHandler) -> BindingId {
        0
    }

    fn unbind(&self, _id: BindingId) {}
}

struct LogOverlay;

impl BlockOverlay for LogOverlay {
    fn block(&self) {
        tracing::debug!("ui blocked");
    }

    fn unblock(&self) {
        tracing::debug!("ui unblocked");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripline=info".parse().expect("valid env filter")),
        )
        .init();

    let endpoint =
        std::env::var("TRIPLINE_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
    let authorization = std::env::var("TRIPLINE_AUTHORIZATION")
        .unwrap_or_else(|_| "Basic tripline-smoke".to_string());

    let api = Arc::new(TripApiClient::new(endpoint, authorization));
    let points = Arc::new(PointsModel::new(api.clone()));
    let filter = Arc::new(FilterModel::new());
    let offers = Arc::new(OffersModel::new(api.clone()));
    let destinations = Arc::new(DestinationsModel::new(api));

    let board = BoardPresenter::new(
        BoardModels {
            points: points.clone(),
            filter,
            offers: offers.clone(),
            destinations: destinations.clone(),
        },
        BoardCollaborators {
            container: ComponentId::new(),
            renderer: Arc::new(LogRenderer),
            views: Arc::new(LogViews),
            keyboard: Arc::new(HeadlessKeyboard),
            blocker: UiBlocker::new(LOWER_LIMIT, UPPER_LIMIT, Arc::new(LogOverlay)),
            on_creation_end: Arc::new(|| {}),
        },
    );
    board.init();

    offers.init().await;
    destinations.init().await;
    points.init().await;

    tracing::info!(points = points.event_points().len(), "board reconciled");
}
