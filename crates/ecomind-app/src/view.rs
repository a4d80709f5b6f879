//! Text presentation of the EcoMindShift pages.
//!
//! Every function here is pure: it takes a state snapshot (plus whatever
//! local form data the page holds) and returns the text to show. Buttons are
//! rendered as [`Control`]s so their accessible label and disabled state can
//! be checked directly.

use crate::model::{BusinessSpec, DataItem, RequirementsForm, TestimonialForm};
use resource_controller::{ResourceState, UserInputError};
use std::fmt;

pub const LOADING: &str = "Loading...";
pub const NO_DATA: &str = "No data available";

pub const TITLE: &str = "EcoMindShift";
pub const DESCRIPTION: &str = "EcoMindShift combines climate tech solutions with mental health apps \
to help small businesses and individuals reduce their carbon footprint while managing stress \
related to environmental issues.";

/// An actionable button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: String,
    pub aria_label: String,
    pub disabled: bool,
}

impl Control {
    fn new(label: impl Into<String>, aria_label: impl Into<String>, disabled: bool) -> Self {
        Self {
            label: label.into(),
            aria_label: aria_label.into(),
            disabled,
        }
    }

    /// Form submit button; reads "Submitting..." while the write is in flight.
    pub fn submit(aria_label: &str, pending: bool) -> Self {
        let label = if pending { "Submitting..." } else { "Submit" };
        Self::new(label, aria_label, pending)
    }

    pub fn fetch_data(pending: bool) -> Self {
        Self::new("Fetch data", "Fetch data", pending)
    }

    pub fn save(pending: bool) -> Self {
        Self::new("Save", "Save business specification", pending)
    }

    /// Clears one requirement's details.
    pub fn remove(title: &str, pending: bool) -> Self {
        Self::new("Remove", format!("Remove details of {title}"), pending)
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.disabled {
            write!(f, "[{} (disabled)]", self.label)
        } else {
            write!(f, "[{}]", self.label)
        }
    }
}

pub fn landing_page() -> String {
    format!("{TITLE}\n\n{DESCRIPTION}")
}

pub fn render_data_list(state: &ResourceState<Vec<DataItem>>) -> String {
    let body = match state {
        ResourceState::Pending { .. } => LOADING.to_string(),
        ResourceState::Failure { error, .. } => error.to_string(),
        _ => match state.data() {
            Some(items) if !items.is_empty() => items
                .iter()
                .map(|item| format!("- {}", item.name))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => NO_DATA.to_string(),
        },
    };
    format!("{body}\n{}", Control::fetch_data(state.is_pending()))
}

/// `error` is the page-level message to show instead of the form;
/// `invalid` holds per-field messages shown under the rejected fields.
///
/// The page loads on entry, so it reads "Loading..." until a first
/// specification has arrived.
pub fn render_business_spec(
    state: &ResourceState<BusinessSpec>,
    draft: &BusinessSpec,
    error: Option<&str>,
    invalid: Option<&UserInputError>,
) -> String {
    if (state.is_idle() || state.is_pending()) && state.data().is_none() {
        return LOADING.to_string();
    }
    if let Some(message) = error {
        return message.to_string();
    }

    let pending = state.is_pending();
    let field_error = |field: &str| invalid.and_then(|e| e.message_for(field));
    let mut lines = vec!["Create Business Specification".to_string()];
    lines.push(format!("Name: {}", draft.name));
    lines.extend(field_error("name").map(str::to_string));
    lines.push(format!("Description: {}", draft.description));
    lines.extend(field_error("description").map(str::to_string));
    for requirement in &draft.requirements {
        lines.push(format!(
            "* {}: {} {}",
            requirement.title,
            requirement.details,
            Control::remove(&requirement.title, pending)
        ));
    }
    lines.push(Control::save(pending).to_string());
    lines.join("\n")
}

pub fn render_testimonial(state: &ResourceState<()>, form: &TestimonialForm, error: Option<&str>) -> String {
    let mut lines = vec!["Write a Testimonial".to_string()];
    if let Some(message) = error {
        lines.push(message.to_string());
    }
    lines.push(format!("Name: {}", form.name));
    lines.push(format!("Email address: {}", form.email));
    lines.push(format!("Message: {}", form.message));
    lines.push(Control::submit("Submit testimonial", state.is_pending()).to_string());
    lines.join("\n")
}

/// `field_error` is shown under the text area.
pub fn render_requirements(state: &ResourceState<()>, form: &RequirementsForm, field_error: Option<&str>) -> String {
    let mut lines = vec![
        "List of requirements".to_string(),
        form.requirements.clone(),
    ];
    if let Some(message) = field_error {
        lines.push(message.to_string());
    }
    lines.push(Control::submit("Submit requirements", state.is_pending()).to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Requirement;
    use resource_controller::{ControllerError, TransportError};

    fn item(id: u64, name: &str) -> DataItem {
        DataItem { id, name: name.into() }
    }

    #[test]
    fn test_data_list_states() {
        let pending = ResourceState::Pending { last: None };
        assert_eq!(render_data_list(&pending), "Loading...\n[Fetch data (disabled)]");

        let empty = ResourceState::Success { data: vec![] };
        assert_eq!(render_data_list(&empty), "No data available\n[Fetch data]");
        assert_eq!(render_data_list(&ResourceState::default()), "No data available\n[Fetch data]");

        let loaded = ResourceState::Success {
            data: vec![item(1, "Product A"), item(2, "Product B")],
        };
        assert_eq!(render_data_list(&loaded), "- Product A\n- Product B\n[Fetch data]");

        let failed = ResourceState::Failure {
            error: ControllerError::Transport(TransportError::Network("API Error".into())),
            last: Some(vec![item(1, "Product A")]),
        };
        assert_eq!(render_data_list(&failed), "Network error: API Error\n[Fetch data]");
    }

    #[test]
    fn test_controls_carry_accessible_labels() {
        let fetch = Control::fetch_data(false);
        assert_eq!(fetch.aria_label, "Fetch data");
        assert!(!fetch.disabled);

        let submit = Control::submit("Submit testimonial", true);
        assert_eq!(submit.label, "Submitting...");
        assert!(submit.disabled);

        assert_eq!(Control::remove("Solar", false).aria_label, "Remove details of Solar");
    }

    #[test]
    fn test_business_spec_page() {
        let draft = BusinessSpec {
            id: 1,
            name: "Green Grocer".into(),
            description: "Local produce".into(),
            requirements: vec![Requirement { id: 1, title: "Solar".into(), details: "Roof".into() }],
        };
        let state = ResourceState::Success { data: draft.clone() };

        assert_eq!(render_business_spec(&ResourceState::Pending { last: None }, &draft, None, None), LOADING);
        assert_eq!(render_business_spec(&ResourceState::default(), &draft, None, None), LOADING);
        assert_eq!(
            render_business_spec(&state, &draft, Some("Failed to load business specification."), None),
            "Failed to load business specification."
        );
        let page = render_business_spec(&state, &draft, None, None);
        assert!(page.contains("Name: Green Grocer"));
        assert!(page.contains("* Solar: Roof [Remove]"));
        assert!(page.ends_with("[Save]"));

        let mut invalid = UserInputError::default();
        invalid.require("description", "");
        let page = render_business_spec(&state, &draft, None, Some(&invalid));
        assert!(page.contains("Description: Local produce\nThis field is required\n"), "{page}");
    }

    #[test]
    fn test_landing_page() {
        let page = landing_page();
        assert!(page.starts_with("EcoMindShift\n\n"));
        assert!(page.contains("reduce their carbon footprint"));
    }
}
