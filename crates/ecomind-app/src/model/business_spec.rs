use resource_controller::{FieldKind, FormInput, PayloadShape, RecordShape, UserInputError};
use serde::{Deserialize, Serialize};

/// A small business's specification, edited on the specification page.
///
/// The page loads one from the server, edits a local draft and posts the
/// draft back on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessSpec {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub requirements: Vec<Requirement>,
}

/// One requirement listed in a [`BusinessSpec`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: u64,
    pub title: String,
    pub details: String,
}

impl BusinessSpec {
    /// Payload shape accepted from `/api/business-specification`.
    pub fn shape() -> PayloadShape {
        PayloadShape::Record(
            RecordShape::new()
                .required("id", FieldKind::Unsigned)
                .required("name", FieldKind::String)
                .required("description", FieldKind::String)
                .collection(
                    "requirements",
                    RecordShape::new()
                        .required("id", FieldKind::Unsigned)
                        .required("title", FieldKind::String)
                        .required("details", FieldKind::String)
                        .identified_by("id"),
                ),
        )
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Blanks the details of requirement `id`, keeping its title.
    ///
    /// Returns `false` if no requirement has that id.
    pub fn clear_requirement_details(&mut self, id: u64) -> bool {
        match self.requirements.iter_mut().find(|r| r.id == id) {
            Some(requirement) => {
                requirement.details.clear();
                true
            }
            None => false,
        }
    }
}

// Name and description are required before a draft can be saved.
impl FormInput for BusinessSpec {
    fn validate(&self) -> Result<(), UserInputError> {
        let mut errors = UserInputError::default();
        errors.require("name", &self.name);
        errors.require("description", &self.description);
        errors.into_result()
    }
}
