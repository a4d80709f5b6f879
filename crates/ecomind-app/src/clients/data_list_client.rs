use crate::model::DataItem;
use crate::view;
use resource_controller::{Dispatch, ResourceController, ResourceState, Transport};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client behind the generic data list.
pub struct DataListClient {
    controller: ResourceController<Vec<DataItem>>,
}

impl DataListClient {
    pub fn new(transport: Arc<dyn Transport>, endpoint: &str) -> Self {
        Self {
            controller: ResourceController::new("data", endpoint, transport)
                .with_shape(DataItem::list_shape()),
        }
    }

    /// Triggered by the "Fetch data" control.
    #[instrument(skip(self))]
    pub fn load(&self) -> Dispatch {
        debug!(path = self.controller.path(), "Sending request");
        self.controller.load()
    }

    pub fn reset(&self) {
        self.controller.reset();
    }

    pub fn state(&self) -> ResourceState<Vec<DataItem>> {
        self.controller.current_state()
    }

    pub fn render(&self) -> String {
        view::render_data_list(&self.state())
    }
}
