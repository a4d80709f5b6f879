use resource_controller::{FormInput, UserInputError};
use serde::{Serialize, Serializer};

/// One requirement parsed out of the gathering form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatheredRequirement {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The requirements-gathering form: a free-text list, one requirement per
/// line, optionally written as `name: description`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementsForm {
    pub requirements: String,
}

impl RequirementsForm {
    pub fn new(requirements: impl Into<String>) -> Self {
        Self {
            requirements: requirements.into(),
        }
    }

    /// Splits the text into requirements, numbering them from 1.
    /// Blank lines are skipped.
    pub fn parse(&self) -> Vec<GatheredRequirement> {
        self.requirements
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .zip(1..)
            .map(|(line, id)| {
                let (name, description) = match line.split_once(':') {
                    Some((name, description)) => (name.trim(), Some(description.trim())),
                    None => (line, None),
                };
                GatheredRequirement {
                    id,
                    name: name.to_string(),
                    description: description.filter(|d| !d.is_empty()).map(str::to_string),
                }
            })
            .collect()
    }
}

#[derive(Serialize)]
struct Payload {
    requirements: Vec<GatheredRequirement>,
}

// The wire body carries the parsed list, not the raw text.
impl Serialize for RequirementsForm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Payload {
            requirements: self.parse(),
        }
        .serialize(serializer)
    }
}

impl FormInput for RequirementsForm {
    fn validate(&self) -> Result<(), UserInputError> {
        let mut errors = UserInputError::default();
        errors.require("requirements", &self.requirements);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_lines_with_and_without_description() {
        let form = RequirementsForm::new("Solar panels: 10kW on the roof\n\n  Recycling  \nEV charging:\n");
        assert_eq!(
            form.parse(),
            vec![
                GatheredRequirement {
                    id: 1,
                    name: "Solar panels".into(),
                    description: Some("10kW on the roof".into()),
                },
                GatheredRequirement { id: 2, name: "Recycling".into(), description: None },
                GatheredRequirement { id: 3, name: "EV charging".into(), description: None },
            ]
        );
    }

    #[test]
    fn test_serializes_parsed_list() {
        let body = serde_json::to_value(RequirementsForm::new("Recycling\nSolar: roof")).unwrap();
        assert_eq!(
            body,
            json!({
                "requirements": [
                    { "id": 1, "name": "Recycling" },
                    { "id": 2, "name": "Solar", "description": "roof" }
                ]
            })
        );
    }

    #[test]
    fn test_blank_text_is_required() {
        let err = RequirementsForm::new("  \n ").validate().unwrap_err();
        assert_eq!(err.message_for("requirements"), Some(UserInputError::REQUIRED));
        assert!(RequirementsForm::new("Recycling").validate().is_ok());
    }
}
