use crate::model::TestimonialForm;
use crate::view;
use resource_controller::{ControllerError, Dispatch, ResourceController, ResourceState, Transport};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument};

/// Client behind the testimonial form. The form is cleared after a
/// successful submit and left intact after a failed one.
pub struct TestimonialClient {
    controller: ResourceController<()>,
    form: Arc<Mutex<TestimonialForm>>,
}

impl TestimonialClient {
    pub const PATH: &'static str = "/api/testimonials";
    pub const SUBMIT_ERROR: &'static str = "An error occurred while submitting your testimonial.";

    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            controller: ResourceController::new("testimonials", Self::PATH, transport),
            form: Arc::new(Mutex::new(TestimonialForm::default())),
        }
    }

    fn lock_form(&self) -> MutexGuard<'_, TestimonialForm> {
        self.form.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn form(&self) -> TestimonialForm {
        self.lock_form().clone()
    }

    /// Applies an edit to the form fields.
    pub fn edit(&self, f: impl FnOnce(&mut TestimonialForm)) {
        f(&mut self.lock_form());
    }

    #[instrument(skip(self))]
    pub fn submit(&self) -> Dispatch {
        let form = self.form();
        debug!("Sending request");
        let sink = self.form.clone();
        self.controller.submit_form(&form, move |_| {
            sink.lock().unwrap_or_else(|e| e.into_inner()).clear();
        })
    }

    pub fn state(&self) -> ResourceState<()> {
        self.controller.current_state()
    }

    /// Message for a rejected field, if the last submit was rejected locally.
    pub fn field_error(&self, field: &str) -> Option<String> {
        match self.state().error()? {
            ControllerError::UserInput(e) => e.message_for(field).map(str::to_string),
            _ => None,
        }
    }

    /// Page-level message for a failed submit. Rejected input is reported
    /// per field instead.
    pub fn error_message(&self) -> Option<&'static str> {
        match self.state().error()? {
            ControllerError::UserInput(_) => None,
            _ => Some(Self::SUBMIT_ERROR),
        }
    }

    pub fn render(&self) -> String {
        view::render_testimonial(&self.state(), &self.form(), self.error_message())
    }
}
