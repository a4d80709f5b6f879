use crate::model::RequirementsForm;
use crate::navigation::Navigator;
use crate::view;
use resource_controller::{ControllerError, Dispatch, ResourceController, ResourceState, Transport};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client behind the requirements-gathering form.
///
/// A successful submit navigates to [`SUCCESS_ROUTE`](Self::SUCCESS_ROUTE).
pub struct RequirementsClient {
    controller: ResourceController<()>,
    navigator: Arc<dyn Navigator>,
}

impl RequirementsClient {
    pub const PATH: &'static str = "/api/requirements";
    pub const SUCCESS_ROUTE: &'static str = "/success";

    pub fn new(transport: Arc<dyn Transport>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            controller: ResourceController::new("requirements", Self::PATH, transport),
            navigator,
        }
    }

    #[instrument(skip(self, form))]
    pub fn submit(&self, form: &RequirementsForm) -> Dispatch {
        debug!(lines = form.parse().len(), "Sending request");
        let navigator = self.navigator.clone();
        self.controller.submit_form(form, move |_| navigator.push(Self::SUCCESS_ROUTE))
    }

    pub fn state(&self) -> ResourceState<()> {
        self.controller.current_state()
    }

    /// The text shown under the text area after a failed submit.
    pub fn field_error(&self) -> Option<String> {
        match self.state().error()? {
            ControllerError::UserInput(e) => e.message_for("requirements").map(str::to_string),
            other => Some(other.to_string()),
        }
    }

    pub fn render(&self, form: &RequirementsForm) -> String {
        view::render_requirements(&self.state(), form, self.field_error().as_deref())
    }
}
