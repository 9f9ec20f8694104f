use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::blocker::UiBlocker;
use crate::core::{EventPoint, FilterKind, SortKind, UpdateType, UserAction};
use crate::input::Keyboard;
use crate::model::{DestinationsModel, FilterModel, ModelError, OffersModel, PointsModel};
use crate::render::{ComponentId, ListShell, Placeholder, RenderPosition, Renderer, SortBar, ViewFactory};

use super::{
    CreationEndCallback, CreationEndHandler, DataChangeHandler, Mode, ModeChangeHandler,
    NewPointPresenter, PointPresenter,
};

const LOADING_MESSAGE: &str = "Loading...";
const LOAD_FAILED_MESSAGE: &str = "Failed to load latest route information";

/// Models the board reads from and mutates through.
pub struct BoardModels {
    pub points: Arc<PointsModel>,
    pub filter: Arc<FilterModel>,
    pub offers: Arc<OffersModel>,
    pub destinations: Arc<DestinationsModel>,
}

/// External collaborators injected at construction.
pub struct BoardCollaborators {
    pub container: ComponentId,
    pub renderer: Arc<dyn Renderer>,
    pub views: Arc<dyn ViewFactory>,
    pub keyboard: Arc<dyn Keyboard>,
    pub blocker: UiBlocker,
    pub on_creation_end: CreationEndCallback,
}

/// The list orchestrator.
///
/// Subscribes to the points and filter models, derives the visible set
/// (filter, then stable sort), owns one [`PointPresenter`] per visible id
/// plus the optional creation presenter, and maps each notification to the
/// cheapest sufficient re-render: a single-presenter patch, a list refresh,
/// or a full rebuild with sort reset.
pub struct BoardPresenter {
    points_model: Arc<PointsModel>,
    filter_model: Arc<FilterModel>,
    offers_model: Arc<OffersModel>,
    destinations_model: Arc<DestinationsModel>,
    container: ComponentId,
    renderer: Arc<dyn Renderer>,
    views: Arc<dyn ViewFactory>,
    keyboard: Arc<dyn Keyboard>,
    blocker: UiBlocker,
    on_creation_end: CreationEndCallback,
    sort: Mutex<SortKind>,
    is_loading: AtomicBool,
    load_failed: AtomicBool,
    creating: AtomicBool,
    shell: Mutex<Option<Box<dyn ListShell>>>,
    sort_bar: Mutex<Option<Box<dyn SortBar>>>,
    placeholder: Mutex<Option<Box<dyn Placeholder>>>,
    presenters: Mutex<HashMap<String, Arc<PointPresenter>>>,
    new_point: Mutex<Option<Arc<NewPointPresenter>>>,
}

impl BoardPresenter {
    pub fn new(models: BoardModels, collaborators: BoardCollaborators) -> Arc<Self> {
        let board = Arc::new(Self {
            points_model: models.points,
            filter_model: models.filter,
            offers_model: models.offers,
            destinations_model: models.destinations,
            container: collaborators.container,
            renderer: collaborators.renderer,
            views: collaborators.views,
            keyboard: collaborators.keyboard,
            blocker: collaborators.blocker,
            on_creation_end: collaborators.on_creation_end,
            sort: Mutex::new(SortKind::default()),
            is_loading: AtomicBool::new(true),
            load_failed: AtomicBool::new(false),
            creating: AtomicBool::new(false),
            shell: Mutex::new(None),
            sort_bar: Mutex::new(None),
            placeholder: Mutex::new(None),
            presenters: Mutex::new(HashMap::new()),
            new_point: Mutex::new(None),
        });

        let weak = Arc::downgrade(&board);
        board.points_model.subscribe(move |update_type, payload| {
            if let Some(board) = weak.upgrade() {
                board.handle_model_event(update_type, payload);
            }
        });
        let weak = Arc::downgrade(&board);
        board.filter_model.subscribe(move |update_type, _| {
            if let Some(board) = weak.upgrade() {
                board.handle_model_event(update_type, None);
            }
        });

        board
    }

    /// First render. The board starts in the loading state; the `Init` or
    /// `Error` notification from the points model moves it on.
    pub fn init(self: &Arc<Self>) {
        self.render_board();
    }

    pub fn current_sort(&self) -> SortKind {
        *self.sort.lock().expect("sort mutex poisoned")
    }

    /// Presenter currently bound to `id`, if the id is in the visible set.
    /// The embedding view layer uses this to route row/form events.
    pub fn point_presenter(&self, id: &str) -> Option<Arc<PointPresenter>> {
        self.presenters
            .lock()
            .expect("presenters mutex poisoned")
            .get(id)
            .cloned()
    }

    pub fn creation_presenter(&self) -> Option<Arc<NewPointPresenter>> {
        self.new_point
            .lock()
            .expect("new point mutex poisoned")
            .clone()
            .filter(|presenter| presenter.is_active())
    }

    /// Number of presenters currently in edit mode, the active creation
    /// form included. The single-editor invariant keeps this at most 1.
    pub fn editing_count(&self) -> usize {
        let editing = self
            .presenters
            .lock()
            .expect("presenters mutex poisoned")
            .values()
            .filter(|presenter| presenter.mode() == Mode::Editing)
            .count();
        editing + usize::from(self.creation_presenter().is_some())
    }

    // -----------------------------------------------------------------------
    // Model notifications
    // -----------------------------------------------------------------------

    fn handle_model_event(self: &Arc<Self>, update_type: UpdateType, payload: Option<&EventPoint>) {
        match update_type {
            UpdateType::Patch => {
                let Some(point) = payload else {
                    tracing::warn!("patch notification without a payload");
                    return;
                };
                let presenter = self.point_presenter(&point.id);
                if let Some(presenter) = presenter {
                    presenter.init(point.clone());
                }
            }
            UpdateType::Minor => {
                self.clear_board(false);
                self.render_board();
            }
            UpdateType::Major => {
                self.clear_board(true);
                self.render_board();
            }
            UpdateType::Init => {
                self.is_loading.store(false, Ordering::SeqCst);
                self.load_failed.store(false, Ordering::SeqCst);
                self.clear_board(false);
                self.render_board();
            }
            UpdateType::Error => {
                self.is_loading.store(false, Ordering::SeqCst);
                self.load_failed.store(true, Ordering::SeqCst);
                self.clear_board(false);
                self.render_board();
            }
        }
    }

    // -----------------------------------------------------------------------
    // Mutation intents
    // -----------------------------------------------------------------------

    /// Dispatch one user mutation to the store inside a busy window.
    ///
    /// The originating presenter shows saving/deleting immediately; on
    /// remote failure it transitions to aborting with the user's edits
    /// intact. The busy window closes on every path.
    pub async fn handle_view_action(
        &self,
        action: UserAction,
        update_type: UpdateType,
        point: EventPoint,
    ) {
        self.blocker
            .wrap(async {
                match action {
                    UserAction::UpdatePoint => {
                        let presenter = self.point_presenter(&point.id);
                        if let Some(presenter) = &presenter {
                            presenter.set_saving();
                        }
                        if let Err(err) = self.points_model.update_point(update_type, point).await {
                            log_mutation_failure("update", &err);
                            if let Some(presenter) = &presenter {
                                presenter.set_aborting();
                            }
                        }
                    }
                    UserAction::AddPoint => {
                        let presenter = self.creation_presenter();
                        if let Some(presenter) = &presenter {
                            presenter.set_saving();
                        }
                        if let Err(err) = self.points_model.add_point(update_type, point).await {
                            log_mutation_failure("add", &err);
                            if let Some(presenter) = &presenter {
                                presenter.set_aborting();
                            }
                        }
                    }
                    UserAction::DeletePoint => {
                        let presenter = self.point_presenter(&point.id);
                        if let Some(presenter) = &presenter {
                            presenter.set_deleting();
                        }
                        if let Err(err) = self.points_model.delete_point(update_type, point).await {
                            log_mutation_failure("delete", &err);
                            if let Some(presenter) = &presenter {
                                presenter.set_aborting();
                            }
                        }
                    }
                }
            })
            .await;
    }

    /// Start the creation flow: force the filter to everything with a
    /// `Major` reset (sort falls back to day as part of it) so the new item
    /// is guaranteed visible, then mount the creation form.
    pub fn create_point(self: &Arc<Self>) {
        if self.is_loading.load(Ordering::SeqCst) || self.load_failed.load(Ordering::SeqCst) {
            return;
        }
        if self.creation_presenter().is_some() {
            return;
        }
        self.creating.store(true, Ordering::SeqCst);
        self.filter_model
            .set_filter(UpdateType::Major, FilterKind::Everything);

        // The Major rebuild above ran synchronously, so the shell exists now.
        let Some(container) = self.shell_component() else {
            tracing::warn!("creation requested with no list shell mounted");
            self.creating.store(false, Ordering::SeqCst);
            return;
        };
        let presenter = NewPointPresenter::new(
            container,
            self.renderer.clone(),
            self.views.clone(),
            self.offers_model.clone(),
            self.destinations_model.clone(),
            self.keyboard.clone(),
            self.data_change_handler(),
            self.creation_destroy_handler(),
        );
        presenter.init();
        *self.new_point.lock().expect("new point mutex poisoned") = Some(presenter);
    }

    /// Switch the active sort and refresh the point list in place. Disabled
    /// selectors and re-selection of the current sort are ignored.
    pub fn sort_changed(self: &Arc<Self>, kind: SortKind) {
        if !kind.is_selectable() {
            return;
        }
        if self.current_sort() == kind {
            return;
        }
        if self.shell_component().is_none() {
            return;
        }
        *self.sort.lock().expect("sort mutex poisoned") = kind;

        let new_bar = self.views.sort_bar(kind);
        let new_id = new_bar.component();
        let old_bar = self
            .sort_bar
            .lock()
            .expect("sort bar mutex poisoned")
            .replace(new_bar);
        if let Some(old_bar) = old_bar {
            self.renderer.replace(new_id, old_bar.component());
        }

        self.clear_points();
        for point in self.visible_points() {
            self.render_point(point);
        }
    }

    // -----------------------------------------------------------------------
    // Derivation and rendering
    // -----------------------------------------------------------------------

    /// Filter with the active predicate, then stable-sort with the active
    /// comparator. Deterministic total order: ties keep model order.
    fn visible_points(&self) -> Vec<EventPoint> {
        let filter = self.filter_model.filter();
        let mut points = filter.apply(&self.points_model.event_points(), Utc::now());
        self.current_sort().sort(&mut points);
        points
    }

    fn render_board(self: &Arc<Self>) {
        if self.is_loading.load(Ordering::SeqCst) {
            self.render_placeholder(LOADING_MESSAGE);
            return;
        }
        if self.load_failed.load(Ordering::SeqCst) {
            self.render_placeholder(LOAD_FAILED_MESSAGE);
            return;
        }
        let visible = self.visible_points();
        if visible.is_empty() && !self.creating.load(Ordering::SeqCst) {
            self.render_placeholder(self.filter_model.filter().empty_message());
            return;
        }
        self.render_sort_bar();
        self.render_shell();
        for point in visible {
            self.render_point(point);
        }
    }

    fn clear_board(&self, reset_sort: bool) {
        self.clear_points();
        let new_point = self
            .new_point
            .lock()
            .expect("new point mutex poisoned")
            .take();
        if let Some(new_point) = new_point {
            new_point.destroy(false);
        }
        if let Some(bar) = self.sort_bar.lock().expect("sort bar mutex poisoned").take() {
            self.renderer.remove(bar.component());
        }
        if let Some(placeholder) = self
            .placeholder
            .lock()
            .expect("placeholder mutex poisoned")
            .take()
        {
            self.renderer.remove(placeholder.component());
        }
        if let Some(shell) = self.shell.lock().expect("shell mutex poisoned").take() {
            self.renderer.remove(shell.component());
        }
        if reset_sort {
            *self.sort.lock().expect("sort mutex poisoned") = SortKind::default();
        }
    }

    fn clear_points(&self) {
        let presenters: Vec<Arc<PointPresenter>> = self
            .presenters
            .lock()
            .expect("presenters mutex poisoned")
            .drain()
            .map(|(_, presenter)| presenter)
            .collect();
        for presenter in presenters {
            presenter.destroy();
        }
    }

    fn render_placeholder(&self, message: &str) {
        let view = self.views.placeholder(message);
        self.renderer
            .render(view.component(), self.container, RenderPosition::BeforeEnd);
        *self
            .placeholder
            .lock()
            .expect("placeholder mutex poisoned") = Some(view);
    }

    fn render_sort_bar(&self) {
        let view = self.views.sort_bar(self.current_sort());
        self.renderer
            .render(view.component(), self.container, RenderPosition::AfterBegin);
        *self.sort_bar.lock().expect("sort bar mutex poisoned") = Some(view);
    }

    fn render_shell(&self) {
        let shell = self.views.list_shell();
        self.renderer
            .render(shell.component(), self.container, RenderPosition::BeforeEnd);
        *self.shell.lock().expect("shell mutex poisoned") = Some(shell);
    }

    fn render_point(self: &Arc<Self>, point: EventPoint) {
        let Some(container) = self.shell_component() else {
            return;
        };
        let presenter = PointPresenter::new(
            container,
            self.renderer.clone(),
            self.views.clone(),
            self.offers_model.clone(),
            self.destinations_model.clone(),
            self.keyboard.clone(),
            self.data_change_handler(),
            self.mode_change_handler(),
        );
        presenter.init(point.clone());
        self.presenters
            .lock()
            .expect("presenters mutex poisoned")
            .insert(point.id, presenter);
    }

    fn shell_component(&self) -> Option<ComponentId> {
        self.shell
            .lock()
            .expect("shell mutex poisoned")
            .as_ref()
            .map(|shell| shell.component())
    }

    // -----------------------------------------------------------------------
    // Presenter callbacks
    // -----------------------------------------------------------------------

    fn data_change_handler(self: &Arc<Self>) -> DataChangeHandler {
        let weak = Arc::downgrade(self);
        Arc::new(move |action, update_type, point| {
            if let Some(board) = weak.upgrade() {
                tokio::spawn(async move {
                    board.handle_view_action(action, update_type, point).await;
                });
            }
        })
    }

    fn mode_change_handler(self: &Arc<Self>) -> ModeChangeHandler {
        let weak = Arc::downgrade(self);
        Arc::new(move || {
            if let Some(board) = weak.upgrade() {
                board.handle_mode_change();
            }
        })
    }

    /// Enforce single-editor exclusivity: abandon any in-progress creation
    /// and reset every item presenter to display mode.
    fn handle_mode_change(&self) {
        let new_point = self
            .new_point
            .lock()
            .expect("new point mutex poisoned")
            .clone();
        if let Some(new_point) = new_point {
            new_point.destroy(true);
        }
        let presenters: Vec<Arc<PointPresenter>> = self
            .presenters
            .lock()
            .expect("presenters mutex poisoned")
            .values()
            .cloned()
            .collect();
        for presenter in presenters {
            presenter.reset_view();
        }
    }

    fn creation_destroy_handler(self: &Arc<Self>) -> CreationEndHandler {
        let weak = Arc::downgrade(self);
        Arc::new(move |canceled| {
            if let Some(board) = weak.upgrade() {
                board.creating.store(false, Ordering::SeqCst);
                (board.on_creation_end)();
                // An abandoned draft over an empty model leaves a bare
                // shell behind; fall back to the empty-state message.
                if canceled && board.visible_points().is_empty() {
                    board.clear_board(false);
                    board.render_board();
                }
            }
        })
    }
}

fn log_mutation_failure(operation: &str, err: &ModelError) {
    match err {
        ModelError::NotFound(id) => {
            tracing::error!("{operation} for unknown point {id}: caller contract violation");
        }
        ModelError::Api(err) => {
            tracing::warn!("{operation} rejected by remote: {err}");
        }
    }
}
