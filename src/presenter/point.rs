use std::sync::{Arc, Mutex};

use crate::core::{is_minor_update, EventPoint, UpdateType, UserAction};
use crate::input::{EscapeGuard, EscapeHandler, Keyboard};
use crate::model::{DestinationsModel, OffersModel};
use crate::render::{ComponentId, EditForm, FormState, PointRow, RenderPosition, Renderer, ViewFactory};

use super::{DataChangeHandler, ModeChangeHandler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Display,
    Editing,
}

/// Presenter for one event point: a row in display mode, a form in edit
/// mode, and the transitions between them.
///
/// The presenter owns both views at all times and swaps which one is
/// mounted. The escape binding is held only while editing and revoked on
/// every exit transition, including a forced close and teardown.
pub struct PointPresenter {
    container: ComponentId,
    renderer: Arc<dyn Renderer>,
    views: Arc<dyn ViewFactory>,
    offers: Arc<OffersModel>,
    destinations: Arc<DestinationsModel>,
    keyboard: Arc<dyn Keyboard>,
    on_data_change: DataChangeHandler,
    on_mode_change: ModeChangeHandler,
    point: Mutex<Option<EventPoint>>,
    row: Mutex<Option<Box<dyn PointRow>>>,
    form: Mutex<Option<Box<dyn EditForm>>>,
    mode: Mutex<Mode>,
    escape: Mutex<Option<EscapeGuard>>,
}

impl PointPresenter {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        container: ComponentId,
        renderer: Arc<dyn Renderer>,
        views: Arc<dyn ViewFactory>,
        offers: Arc<OffersModel>,
        destinations: Arc<DestinationsModel>,
        keyboard: Arc<dyn Keyboard>,
        on_data_change: DataChangeHandler,
        on_mode_change: ModeChangeHandler,
    ) -> Arc<Self> {
        Arc::new(Self {
            container,
            renderer,
            views,
            offers,
            destinations,
            keyboard,
            on_data_change,
            on_mode_change,
            point: Mutex::new(None),
            row: Mutex::new(None),
            form: Mutex::new(None),
            mode: Mutex::new(Mode::Display),
            escape: Mutex::new(None),
        })
    }

    /// Bind (or re-bind) the presenter to `point` and mount fresh views.
    ///
    /// On first init the row is rendered into the container. On re-init the
    /// mounted view is replaced in place; a re-init while editing collapses
    /// back to display mode, which is how a confirmed save closes the form.
    pub fn init(self: &Arc<Self>, point: EventPoint) {
        *self.point.lock().expect("point mutex poisoned") = Some(point.clone());

        let destination = self.destinations.destination_by_id(&point.destination);
        let row_offers = self.offers.offers_by_ids(point.kind, &point.offers);
        let new_row = self
            .views
            .point_row(&point, destination.as_ref(), &row_offers);
        let new_form = self.views.edit_form(
            &point,
            &self.destinations.destinations(),
            &self.offers.offer_groups(),
        );
        let new_row_id = new_row.component();
        let new_form_id = new_form.component();

        let prev_row = self
            .row
            .lock()
            .expect("row mutex poisoned")
            .replace(new_row);
        let prev_form = self
            .form
            .lock()
            .expect("form mutex poisoned")
            .replace(new_form);

        match (prev_row, prev_form) {
            (None, None) => {
                self.renderer
                    .render(new_row_id, self.container, RenderPosition::BeforeEnd);
            }
            (Some(prev_row), Some(prev_form)) => {
                match self.mode() {
                    Mode::Display => self.renderer.replace(new_row_id, prev_row.component()),
                    Mode::Editing => {
                        self.renderer.replace(new_row_id, prev_form.component());
                        self.release_escape();
                        *self.mode.lock().expect("mode mutex poisoned") = Mode::Display;
                    }
                }
                self.renderer.remove(prev_row.component());
                self.renderer.remove(prev_form.component());
            }
            _ => {}
        }
    }

    /// Unmount both views and release any held input binding.
    pub fn destroy(&self) {
        if let Some(row) = self.row.lock().expect("row mutex poisoned").take() {
            self.renderer.remove(row.component());
        }
        if let Some(form) = self.form.lock().expect("form mutex poisoned").take() {
            self.renderer.remove(form.component());
        }
        self.release_escape();
        *self.mode.lock().expect("mode mutex poisoned") = Mode::Display;
    }

    /// Forced close: discard any in-progress edit and return to display
    /// mode. Used by the board to enforce single-editor exclusivity.
    pub fn reset_view(&self) {
        if self.mode() != Mode::Editing {
            return;
        }
        if let Some(point) = self.point.lock().expect("point mutex poisoned").clone() {
            if let Some(form) = self.form.lock().expect("form mutex poisoned").as_ref() {
                form.reset(&point);
            }
        }
        self.close_editor();
    }

    pub fn mode(&self) -> Mode {
        *self.mode.lock().expect("mode mutex poisoned")
    }

    pub fn point(&self) -> Option<EventPoint> {
        self.point.lock().expect("point mutex poisoned").clone()
    }

    // -----------------------------------------------------------------------
    // User intents, invoked by the embedding view layer
    // -----------------------------------------------------------------------

    pub fn edit_clicked(self: &Arc<Self>) {
        if self.mode() == Mode::Display {
            self.open_editor();
        }
    }

    /// Favorite toggle from display mode: a cosmetic change, so the intent
    /// is classified `Patch` and the mode does not change.
    pub fn favorite_clicked(&self) {
        let Some(mut point) = self.point() else { return };
        point.is_favorite = !point.is_favorite;
        (self.on_data_change)(UserAction::UpdatePoint, UpdateType::Patch, point);
    }

    /// Form submit: emit an update intent classified `Minor` when the edit
    /// can move the item's list position, `Patch` otherwise. The form stays
    /// open until the confirmed update re-inits this presenter.
    pub fn form_submitted(&self, update: EventPoint) {
        let Some(original) = self.point() else { return };
        let update_type = if is_minor_update(&original, &update) {
            UpdateType::Minor
        } else {
            UpdateType::Patch
        };
        (self.on_data_change)(UserAction::UpdatePoint, update_type, update);
    }

    /// Rollup/collapse: emit a `Minor` update intent, then collapse
    /// immediately without waiting for confirmation.
    pub fn rollup_clicked(&self, update: EventPoint) {
        (self.on_data_change)(UserAction::UpdatePoint, UpdateType::Minor, update);
        self.close_editor();
    }

    pub fn delete_clicked(&self, update: EventPoint) {
        (self.on_data_change)(UserAction::DeletePoint, UpdateType::Minor, update);
    }

    /// Cancel (button or escape): discard the edit and restore the original
    /// values. No intent is emitted.
    pub fn cancel_edit(&self) {
        if self.mode() != Mode::Editing {
            return;
        }
        if let Some(point) = self.point.lock().expect("point mutex poisoned").clone() {
            if let Some(form) = self.form.lock().expect("form mutex poisoned").as_ref() {
                form.reset(&point);
            }
        }
        self.close_editor();
    }

    // -----------------------------------------------------------------------
    // Mutation feedback, driven by the board
    // -----------------------------------------------------------------------

    pub fn set_saving(&self) {
        if self.mode() != Mode::Editing {
            return;
        }
        if let Some(form) = self.form.lock().expect("form mutex poisoned").as_ref() {
            form.set_state(FormState {
                disabled: true,
                saving: true,
                deleting: false,
            });
        }
    }

    pub fn set_deleting(&self) {
        if self.mode() != Mode::Editing {
            return;
        }
        if let Some(form) = self.form.lock().expect("form mutex poisoned").as_ref() {
            form.set_state(FormState {
                disabled: true,
                saving: false,
                deleting: true,
            });
        }
    }

    /// Mutation rejected: shake the visible view and, in edit mode,
    /// re-enable the controls so the user can retry or cancel. In-progress
    /// edits are left intact.
    pub fn set_aborting(&self) {
        if self.mode() == Mode::Display {
            if let Some(row) = self.row.lock().expect("row mutex poisoned").as_ref() {
                row.shake();
            }
            return;
        }
        if let Some(form) = self.form.lock().expect("form mutex poisoned").as_ref() {
            form.shake();
            form.set_state(FormState::default());
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    fn open_editor(self: &Arc<Self>) {
        let (Some(row_id), Some(form_id)) = (self.row_component(), self.form_component()) else {
            return;
        };
        // Siblings close first; this presenter is still in display mode, so
        // the board's sweep leaves it alone.
        (self.on_mode_change)();
        self.renderer.replace(form_id, row_id);

        let weak = Arc::downgrade(self);
        let handler: EscapeHandler = Arc::new(move || {
            if let Some(presenter) = weak.upgrade() {
                presenter.cancel_edit();
            }
        });
        *self.escape.lock().expect("escape mutex poisoned") =
            Some(EscapeGuard::bind(self.keyboard.clone(), handler));
        *self.mode.lock().expect("mode mutex poisoned") = Mode::Editing;
    }

    fn close_editor(&self) {
        let (Some(row_id), Some(form_id)) = (self.row_component(), self.form_component()) else {
            return;
        };
        self.renderer.replace(row_id, form_id);
        self.release_escape();
        *self.mode.lock().expect("mode mutex poisoned") = Mode::Display;
    }

    fn release_escape(&self) {
        if let Some(guard) = self.escape.lock().expect("escape mutex poisoned").take() {
            guard.release();
        }
    }

    fn row_component(&self) -> Option<ComponentId> {
        self.row
            .lock()
            .expect("row mutex poisoned")
            .as_ref()
            .map(|row| row.component())
    }

    fn form_component(&self) -> Option<ComponentId> {
        self.form
            .lock()
            .expect("form mutex poisoned")
            .as_ref()
            .map(|form| form.component())
    }
}
