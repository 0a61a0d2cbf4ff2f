use tracing::debug;

use crate::document::Document;
use crate::surface::{states, Content, ElementId, Surface};

/// `id` of the contact form element
pub const CONTACT_FORM_ID: &str = "contactForm";

const SENDING_LABEL: &str = "Sending...";
const SENT_LABEL: &str = "Message Sent!";
const DEFAULT_LABEL: &str = "Send Message";

/// The contact form's elements: the form itself, its submit button and its
/// named inputs
#[derive(Debug, Clone)]
pub struct FormControls {
    form: ElementId,
    action: Option<String>,
    button: Option<ElementId>,
    label: String,
    inputs: Vec<(String, ElementId)>,
}

impl FormControls {
    pub fn from_document(document: &Document) -> Option<Self> {
        let form = document.by_dom_id(CONTACT_FORM_ID)?;
        let descendants = document.descendants_of(form.id);

        let button = descendants
            .iter()
            .find(|d| d.is_tag("button") && d.attr("type") == Some("submit"))
            .copied();
        let inputs = descendants
            .iter()
            .filter(|d| d.is_tag("input") || d.is_tag("textarea") || d.is_tag("select"))
            .filter_map(|d| d.attr("name").map(|name| (name.to_string(), d.id)))
            .collect::<Vec<_>>();

        debug!(inputs = inputs.len(), has_button = button.is_some(), "Contact form found");
        Some(Self {
            form: form.id,
            action: form.attr("action").filter(|a| !a.is_empty()).map(str::to_string),
            button: button.map(|b| b.id),
            label: button
                .and_then(|b| b.text.clone())
                .unwrap_or_else(|| DEFAULT_LABEL.to_string()),
            inputs,
        })
    }

    pub fn form(&self) -> ElementId {
        self.form
    }

    /// The form's `action`, if it declares one
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn button(&self) -> Option<ElementId> {
        self.button
    }

    /// Input name for an element inside the form
    pub fn input_name(&self, element: ElementId) -> Option<&str> {
        self.inputs
            .iter()
            .find(|(_, id)| *id == element)
            .map(|(name, _)| name.as_str())
    }

    pub fn inputs(&self) -> impl Iterator<Item = (&str, ElementId)> {
        self.inputs.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Disable the button and show progress
    pub fn show_sending<S: Surface + ?Sized>(&self, surface: &mut S) {
        if let Some(button) = self.button {
            surface.set_content(button, Content::Text(SENDING_LABEL.to_string()));
            surface.set_state(button, states::DISABLED, true);
        }
    }

    /// Clear every input, re-enable the button and confirm on it
    pub fn show_sent<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (_, input) in &self.inputs {
            surface.set_content(*input, Content::Text(String::new()));
        }
        if let Some(button) = self.button {
            surface.set_content(button, Content::Text(SENT_LABEL.to_string()));
            surface.set_state(button, states::DISABLED, false);
            surface.set_state(button, states::SENT, true);
        }
    }

    /// Put the button back to its original label and re-enable it
    pub fn restore<S: Surface + ?Sized>(&self, surface: &mut S) {
        if let Some(button) = self.button {
            surface.set_content(button, Content::Text(self.label.clone()));
            surface.set_state(button, states::SENT, false);
            surface.set_state(button, states::DISABLED, false);
        }
    }
}
