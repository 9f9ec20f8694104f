//! Test doubles and fixtures shared across the test modules.
//!
//! `ScriptedApi` stands in for the remote service with switchable failure
//! modes, the recording renderer/view factory capture what the presenters
//! did to the view layer, and `BoardHarness` wires a full board over all of
//! them.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::api::{ApiError, Destination, Offer, OfferGroup, PointRecord, TripApi};
use crate::blocker::{BlockOverlay, UiBlocker};
use crate::core::{EventPoint, PointKind, SortKind};
use crate::input::{BindingId, EscapeHandler, Keyboard};
use crate::model::{DestinationsModel, FilterModel, OffersModel, PointsModel};
use crate::presenter::{BoardCollaborators, BoardModels, BoardPresenter};
use crate::render::{
    ComponentId, EditForm, FormState, ListShell, Placeholder, PointRow, RenderPosition, Renderer,
    SortBar, ViewFactory,
};

pub fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

/// A finalized point with the given time window and price.
pub fn sample_point(id: &str, from: &str, to: &str, base_price: u32) -> EventPoint {
    EventPoint {
        id: id.to_string(),
        kind: PointKind::Flight,
        base_price,
        date_from: Some(ts(from)),
        date_to: Some(ts(to)),
        destination: "d1".to_string(),
        offers: Vec::new(),
        is_favorite: false,
    }
}

// ---------------------------------------------------------------------------
// Remote service double
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ScriptedApi {
    pub points: Mutex<Vec<PointRecord>>,
    pub offer_groups: Mutex<Vec<OfferGroup>>,
    pub destinations: Mutex<Vec<Destination>>,
    pub fail_reads: AtomicBool,
    pub fail_mutations: AtomicBool,
    pub calls: Mutex<Vec<String>>,
    next_id: AtomicU64,
}

impl ScriptedApi {
    pub fn with_points(points: Vec<EventPoint>) -> Arc<Self> {
        let api = Self::default();
        *api.points.lock().unwrap() = points.iter().map(PointRecord::from_point).collect();
        api.next_id.store(100, Ordering::SeqCst);
        Arc::new(api)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn rejection(endpoint: &str) -> ApiError {
        ApiError::Status {
            status: 500,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl TripApi for ScriptedApi {
    async fn event_points(&self) -> Result<Vec<PointRecord>, ApiError> {
        self.record("GET points");
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::rejection("points"));
        }
        Ok(self.points.lock().unwrap().clone())
    }

    async fn offers(&self) -> Result<Vec<OfferGroup>, ApiError> {
        self.record("GET offers");
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::rejection("offers"));
        }
        Ok(self.offer_groups.lock().unwrap().clone())
    }

    async fn destinations(&self) -> Result<Vec<Destination>, ApiError> {
        self.record("GET destinations");
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::rejection("destinations"));
        }
        Ok(self.destinations.lock().unwrap().clone())
    }

    async fn create_point(&self, mut record: PointRecord) -> Result<PointRecord, ApiError> {
        self.record("POST points");
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::rejection("points"));
        }
        record.id = format!("srv-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.points.lock().unwrap().insert(0, record.clone());
        Ok(record)
    }

    async fn update_point(&self, record: PointRecord) -> Result<PointRecord, ApiError> {
        self.record(&format!("PUT points/{}", record.id));
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::rejection("points"));
        }
        let mut points = self.points.lock().unwrap();
        if let Some(stored) = points.iter_mut().find(|stored| stored.id == record.id) {
            *stored = record.clone();
        }
        Ok(record)
    }

    async fn delete_point(&self, id: &str) -> Result<(), ApiError> {
        self.record(&format!("DELETE points/{id}"));
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::rejection("points"));
        }
        self.points.lock().unwrap().retain(|stored| stored.id != id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Render layer doubles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOp {
    Render {
        component: ComponentId,
        container: ComponentId,
        position: RenderPosition,
    },
    Replace {
        new: ComponentId,
        old: ComponentId,
    },
    Remove {
        component: ComponentId,
    },
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub ops: Mutex<Vec<RenderOp>>,
}

impl RecordingRenderer {
    pub fn ops(&self) -> Vec<RenderOp> {
        self.ops.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, component: ComponentId, container: ComponentId, position: RenderPosition) {
        self.ops.lock().unwrap().push(RenderOp::Render {
            component,
            container,
            position,
        });
    }

    fn replace(&self, new: ComponentId, old: ComponentId) {
        self.ops.lock().unwrap().push(RenderOp::Replace { new, old });
    }

    fn remove(&self, component: ComponentId) {
        self.ops.lock().unwrap().push(RenderOp::Remove { component });
    }
}

/// Everything a presenter did to one stub view.
#[derive(Default)]
pub struct ViewLog {
    pub shakes: AtomicUsize,
    pub resets: AtomicUsize,
    pub states: Mutex<Vec<FormState>>,
}

pub struct StubRow {
    id: ComponentId,
    log: Arc<ViewLog>,
}

impl PointRow for StubRow {
    fn component(&self) -> ComponentId {
        self.id
    }

    fn shake(&self) {
        self.log.shakes.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct StubForm {
    id: ComponentId,
    log: Arc<ViewLog>,
}

impl EditForm for StubForm {
    fn component(&self) -> ComponentId {
        self.id
    }

    fn shake(&self) {
        self.log.shakes.fetch_add(1, Ordering::SeqCst);
    }

    fn set_state(&self, state: FormState) {
        self.log.states.lock().unwrap().push(state);
    }

    fn reset(&self, _point: &EventPoint) {
        self.log.resets.fetch_add(1, Ordering::SeqCst);
    }
}

struct StubComponent {
    id: ComponentId,
}

impl ListShell for StubComponent {
    fn component(&self) -> ComponentId {
        self.id
    }
}

impl SortBar for StubComponent {
    fn component(&self) -> ComponentId {
        self.id
    }
}

impl Placeholder for StubComponent {
    fn component(&self) -> ComponentId {
        self.id
    }
}

/// View factory that records every component it hands out, keyed by point
/// id (the creation draft has an empty id).
#[derive(Default)]
pub struct StubViews {
    pub row_logs: Mutex<Vec<(String, Arc<ViewLog>)>>,
    pub form_logs: Mutex<Vec<(String, Arc<ViewLog>)>>,
    pub placeholders: Mutex<Vec<String>>,
    pub sort_bars: Mutex<Vec<SortKind>>,
    pub shells: AtomicUsize,
    /// What each row was given from the catalogs: destination name and
    /// resolved offer count, keyed by point id.
    pub resolved: Mutex<Vec<(String, Option<String>, usize)>>,
}

impl StubViews {
    pub fn rows_for(&self, point_id: &str) -> usize {
        self.row_logs
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == point_id)
            .count()
    }

    pub fn last_form_log(&self, point_id: &str) -> Option<Arc<ViewLog>> {
        self.form_logs
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(id, _)| id == point_id)
            .map(|(_, log)| log.clone())
    }

    pub fn last_row_log(&self, point_id: &str) -> Option<Arc<ViewLog>> {
        self.row_logs
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(id, _)| id == point_id)
            .map(|(_, log)| log.clone())
    }

    pub fn last_placeholder(&self) -> Option<String> {
        self.placeholders.lock().unwrap().last().cloned()
    }
}

impl ViewFactory for StubViews {
    fn point_row(
        &self,
        point: &EventPoint,
        destination: Option<&Destination>,
        offers: &[Offer],
    ) -> Box<dyn PointRow> {
        self.resolved.lock().unwrap().push((
            point.id.clone(),
            destination.map(|destination| destination.name.clone()),
            offers.len(),
        ));
        let log = Arc::new(ViewLog::default());
        self.row_logs
            .lock()
            .unwrap()
            .push((point.id.clone(), log.clone()));
        Box::new(StubRow {
            id: ComponentId::new(),
            log,
        })
    }

    fn edit_form(
        &self,
        point: &EventPoint,
        _destinations: &[Destination],
        _offer_groups: &[OfferGroup],
    ) -> Box<dyn EditForm> {
        let log = Arc::new(ViewLog::default());
        self.form_logs
            .lock()
            .unwrap()
            .push((point.id.clone(), log.clone()));
        Box::new(StubForm {
            id: ComponentId::new(),
            log,
        })
    }

    fn list_shell(&self) -> Box<dyn ListShell> {
        self.shells.fetch_add(1, Ordering::SeqCst);
        Box::new(StubComponent {
            id: ComponentId::new(),
        })
    }

    fn sort_bar(&self, active: SortKind) -> Box<dyn SortBar> {
        self.sort_bars.lock().unwrap().push(active);
        Box::new(StubComponent {
            id: ComponentId::new(),
        })
    }

    fn placeholder(&self, message: &str) -> Box<dyn Placeholder> {
        self.placeholders.lock().unwrap().push(message.to_string());
        Box::new(StubComponent {
            id: ComponentId::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// Input and overlay doubles
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StubKeyboard {
    bindings: Mutex<Vec<(BindingId, EscapeHandler)>>,
    next: AtomicU64,
}

impl StubKeyboard {
    pub fn binding_count(&self) -> usize {
        self.bindings.lock().unwrap().len()
    }

    /// Fire every bound handler, as a document-level keydown would.
    pub fn press_escape(&self) {
        let snapshot: Vec<EscapeHandler> = self
            .bindings
            .lock()
            .unwrap()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in snapshot {
            handler();
        }
    }
}

impl Keyboard for StubKeyboard {
    fn bind_escape(&self, handler: EscapeHandler) -> BindingId {
        let id = self.next.fetch_add(1, Ordering::SeqCst);
        self.bindings.lock().unwrap().push((id, handler));
        id
    }

    fn unbind(&self, id: BindingId) {
        self.bindings
            .lock()
            .unwrap()
            .retain(|(binding, _)| *binding != id);
    }
}

#[derive(Default)]
pub struct StubOverlay {
    pub active: AtomicBool,
    pub blocks: AtomicUsize,
    pub unblocks: AtomicUsize,
}

impl BlockOverlay for StubOverlay {
    fn block(&self) {
        self.active.store(true, Ordering::SeqCst);
        self.blocks.fetch_add(1, Ordering::SeqCst);
    }

    fn unblock(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.unblocks.fetch_add(1, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Full-board fixture
// ---------------------------------------------------------------------------

pub struct BoardHarness {
    pub api: Arc<ScriptedApi>,
    pub points: Arc<PointsModel>,
    pub filter: Arc<FilterModel>,
    pub offers: Arc<OffersModel>,
    pub destinations: Arc<DestinationsModel>,
    pub renderer: Arc<RecordingRenderer>,
    pub views: Arc<StubViews>,
    pub keyboard: Arc<StubKeyboard>,
    pub overlay: Arc<StubOverlay>,
    pub creation_ends: Arc<AtomicUsize>,
    pub board: Arc<BoardPresenter>,
}

/// Board wired over a scripted api, with the initial load already run.
/// The blocker floor is zero so mutation tests finish instantly.
pub async fn board_with_points(initial: Vec<EventPoint>) -> BoardHarness {
    board_over(ScriptedApi::with_points(initial)).await
}

/// As [`board_with_points`], but over a caller-configured api double.
pub async fn board_over(api: Arc<ScriptedApi>) -> BoardHarness {
    let points = Arc::new(PointsModel::new(api.clone()));
    let filter = Arc::new(FilterModel::new());
    let offers = Arc::new(OffersModel::new(api.clone()));
    let destinations = Arc::new(DestinationsModel::new(api.clone()));
    let renderer = Arc::new(RecordingRenderer::default());
    let views = Arc::new(StubViews::default());
    let keyboard = Arc::new(StubKeyboard::default());
    let overlay = Arc::new(StubOverlay::default());
    let creation_ends = Arc::new(AtomicUsize::new(0));

    let ends = creation_ends.clone();
    let board = BoardPresenter::new(
        BoardModels {
            points: points.clone(),
            filter: filter.clone(),
            offers: offers.clone(),
            destinations: destinations.clone(),
        },
        BoardCollaborators {
            container: ComponentId::new(),
            renderer: renderer.clone(),
            views: views.clone(),
            keyboard: keyboard.clone(),
            blocker: UiBlocker::new(Duration::ZERO, Duration::from_secs(1), overlay.clone()),
            on_creation_end: Arc::new(move || {
                ends.fetch_add(1, Ordering::SeqCst);
            }),
        },
    );
    board.init();
    offers.init().await;
    destinations.init().await;
    points.init().await;

    BoardHarness {
        api,
        points,
        filter,
        offers,
        destinations,
        renderer,
        views,
        keyboard,
        overlay,
        creation_ends,
        board,
    }
}
