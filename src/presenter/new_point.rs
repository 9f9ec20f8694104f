use std::sync::{Arc, Mutex};

use crate::core::{new_point_template, EventPoint, UpdateType, UserAction};
use crate::input::{EscapeGuard, EscapeHandler, Keyboard};
use crate::model::{DestinationsModel, OffersModel};
use crate::render::{ComponentId, EditForm, FormState, RenderPosition, Renderer, ViewFactory};

use super::{CreationEndHandler, DataChangeHandler};

/// Creation flow: an edit form with no backing model entry yet.
///
/// Submit raises an add intent instead of an update; cancel or escape tears
/// the form down and reports back so the external "new event" trigger can be
/// re-enabled. At most one instance is active at a time, enforced by the
/// board.
pub struct NewPointPresenter {
    container: ComponentId,
    renderer: Arc<dyn Renderer>,
    views: Arc<dyn ViewFactory>,
    offers: Arc<OffersModel>,
    destinations: Arc<DestinationsModel>,
    keyboard: Arc<dyn Keyboard>,
    on_data_change: DataChangeHandler,
    on_destroy: CreationEndHandler,
    form: Mutex<Option<Box<dyn EditForm>>>,
    escape: Mutex<Option<EscapeGuard>>,
}

impl NewPointPresenter {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        container: ComponentId,
        renderer: Arc<dyn Renderer>,
        views: Arc<dyn ViewFactory>,
        offers: Arc<OffersModel>,
        destinations: Arc<DestinationsModel>,
        keyboard: Arc<dyn Keyboard>,
        on_data_change: DataChangeHandler,
        on_destroy: CreationEndHandler,
    ) -> Arc<Self> {
        Arc::new(Self {
            container,
            renderer,
            views,
            offers,
            destinations,
            keyboard,
            on_data_change,
            on_destroy,
            form: Mutex::new(None),
            escape: Mutex::new(None),
        })
    }

    /// Mount the blank form at the top of the list and take the escape
    /// binding. A second init while active is a no-op.
    pub fn init(self: &Arc<Self>) {
        if self.is_active() {
            return;
        }
        let draft = new_point_template();
        let form = self.views.edit_form(
            &draft,
            &self.destinations.destinations(),
            &self.offers.offer_groups(),
        );
        self.renderer
            .render(form.component(), self.container, RenderPosition::AfterBegin);
        *self.form.lock().expect("form mutex poisoned") = Some(form);

        let weak = Arc::downgrade(self);
        let handler: EscapeHandler = Arc::new(move || {
            if let Some(presenter) = weak.upgrade() {
                presenter.destroy(true);
            }
        });
        *self.escape.lock().expect("escape mutex poisoned") =
            Some(EscapeGuard::bind(self.keyboard.clone(), handler));
    }

    pub fn is_active(&self) -> bool {
        self.form.lock().expect("form mutex poisoned").is_some()
    }

    /// Submit the draft as an add intent. A blank draft falls back to the
    /// default template. Always list-affecting, so always `Minor`.
    pub fn form_submitted(&self, draft: Option<EventPoint>) {
        let point = draft.unwrap_or_else(new_point_template);
        (self.on_data_change)(UserAction::AddPoint, UpdateType::Minor, point);
    }

    pub fn cancel_clicked(&self) {
        self.destroy(true);
    }

    /// Tear the form down and report the end of creation. `canceled` is
    /// true when the draft was abandoned (cancel, escape, another editor
    /// opening), false when the board removes the form as part of a list
    /// rebuild. Idempotent.
    pub fn destroy(&self, canceled: bool) {
        let Some(form) = self.form.lock().expect("form mutex poisoned").take() else {
            return;
        };
        self.renderer.remove(form.component());
        if let Some(guard) = self.escape.lock().expect("escape mutex poisoned").take() {
            guard.release();
        }
        (self.on_destroy)(canceled);
    }

    pub fn set_saving(&self) {
        if let Some(form) = self.form.lock().expect("form mutex poisoned").as_ref() {
            form.set_state(FormState {
                disabled: true,
                saving: true,
                deleting: false,
            });
        }
    }

    /// Add rejected: shake and re-enable so the draft can be retried or
    /// abandoned.
    pub fn set_aborting(&self) {
        if let Some(form) = self.form.lock().expect("form mutex poisoned").as_ref() {
            form.shake();
            form.set_state(FormState::default());
        }
    }
}
