use crate::model::BusinessSpec;
use crate::view;
use resource_controller::{
    ControllerError, Dispatch, ResourceController, ResourceState, Transport, UserInputError,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Load,
    Save,
}

/// Client behind the business specification editor.
///
/// Loaded data is copied into a local draft. Edits only touch the draft until
/// [`save`](Self::save) posts it.
pub struct BusinessSpecClient {
    controller: ResourceController<BusinessSpec>,
    draft: Arc<Mutex<BusinessSpec>>,
    last_operation: Mutex<Operation>,
}

impl BusinessSpecClient {
    pub const PATH: &'static str = "/api/business-specification";
    pub const LOAD_ERROR: &'static str = "Failed to load business specification.";
    pub const SAVE_ERROR: &'static str = "Failed to save business specification.";

    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let controller: ResourceController<BusinessSpec> = ResourceController::new("business-specification", Self::PATH, transport)
            .with_shape(BusinessSpec::shape());

        let draft = Arc::new(Mutex::new(BusinessSpec::default()));
        let sink = draft.clone();
        controller.on_transition(move |state| {
            if let ResourceState::Success { data } = state {
                *sink.lock().unwrap_or_else(|e| e.into_inner()) = data.clone();
            }
        });

        Self {
            controller,
            draft,
            last_operation: Mutex::new(Operation::Load),
        }
    }

    fn lock_draft(&self) -> MutexGuard<'_, BusinessSpec> {
        self.draft.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn track(&self, operation: Operation, dispatch: Dispatch) -> Dispatch {
        if dispatch.is_started() {
            *self.last_operation.lock().unwrap_or_else(|e| e.into_inner()) = operation;
        }
        dispatch
    }

    #[instrument(skip(self))]
    pub fn load(&self) -> Dispatch {
        debug!("Sending request");
        self.track(Operation::Load, self.controller.load())
    }

    /// Posts the current draft. A blank name or description is rejected
    /// locally and nothing is sent.
    #[instrument(skip(self))]
    pub fn save(&self) -> Dispatch {
        let draft = self.draft();
        debug!(requirements = draft.requirements.len(), "Sending request");
        self.track(Operation::Save, self.controller.submit_form(&draft, |_| {}))
    }

    pub fn state(&self) -> ResourceState<BusinessSpec> {
        self.controller.current_state()
    }

    pub fn draft(&self) -> BusinessSpec {
        self.lock_draft().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.lock_draft().set_name(name);
    }

    pub fn set_description(&self, description: impl Into<String>) {
        self.lock_draft().set_description(description);
    }

    pub fn clear_requirement_details(&self, id: u64) -> bool {
        self.lock_draft().clear_requirement_details(id)
    }

    /// The page-level message for a failed load or save. Rejected input is
    /// reported per field instead.
    pub fn error_message(&self) -> Option<&'static str> {
        if let ControllerError::UserInput(_) = self.controller.current_state().error()? {
            return None;
        }
        match *self.last_operation.lock().unwrap_or_else(|e| e.into_inner()) {
            Operation::Load => Some(Self::LOAD_ERROR),
            Operation::Save => Some(Self::SAVE_ERROR),
        }
    }

    /// Fields rejected by the last save, if it was rejected locally.
    pub fn invalid_fields(&self) -> Option<UserInputError> {
        match self.controller.current_state().error()? {
            ControllerError::UserInput(e) => Some(e.clone()),
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        view::render_business_spec(
            &self.state(),
            &self.draft(),
            self.error_message(),
            self.invalid_fields().as_ref(),
        )
    }
}
