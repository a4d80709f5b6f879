use resource_controller::{FieldKind, PayloadShape, RecordShape};
use serde::Deserialize;

/// An entry of the generic data list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataItem {
    pub id: u64,
    pub name: String,
}

impl DataItem {
    /// Strict collection shape: `id` is unique and no other keys are allowed.
    pub fn list_shape() -> PayloadShape {
        PayloadShape::Collection(
            RecordShape::new()
                .required("id", FieldKind::Unsigned)
                .required("name", FieldKind::String)
                .identified_by("id")
                .strict(),
        )
    }
}
