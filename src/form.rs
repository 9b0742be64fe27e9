use std::collections::{HashMap, HashSet};
use std::fmt;

/// Identifier of an element on the host settings page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handles of the page elements the settings conversion reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    /// Legacy whole view path input
    pub view_path: ElementId,
    pub progress_icon: ElementId,
    pub old_settings_row: ElementId,
    pub old_settings_message: ElementId,
    /// Converted ClearCase view path
    pub cc_view_path: ElementId,
    /// Converted path relative to the view
    pub rel_path: ElementId,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            view_path: ElementId::new("view-path"),
            progress_icon: ElementId::new("convertSettingsProgressIcon"),
            old_settings_row: ElementId::new("oldSettingsRow"),
            old_settings_message: ElementId::new("oldSettingsMessage"),
            cc_view_path: ElementId::new("cc-view-path"),
            rel_path: ElementId::new("rel-path"),
        }
    }
}

/// A single mutation of the host form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Show(ElementId),
    Hide(ElementId),
    SetValue { id: ElementId, value: String },
    ClearErrors,
    DisableForm,
    EnableForm,
    /// Blocking user-facing alert
    Alert(String),
}

/// The host page the conversion runs against
pub trait SettingsForm {
    /// Current value of an input, empty when the element has none
    fn value(&self, id: &ElementId) -> String;

    fn apply(&mut self, command: &UiCommand);
}

/// Form state kept in memory, used by the command line client and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryForm {
    values: HashMap<ElementId, String>,
    hidden: HashSet<ElementId>,
    disabled: bool,
    errors: Vec<String>,
    alerts: Vec<String>,
    applied: Vec<UiCommand>,
}

impl InMemoryForm {
    /// A freshly rendered form: enabled, progress icon hidden
    pub fn new(fields: &FormFields) -> Self {
        let mut form = Self::default();
        form.hidden.insert(fields.progress_icon.clone());
        form
    }

    pub fn with_value(mut self, id: &ElementId, value: impl Into<String>) -> Self {
        self.values.insert(id.clone(), value.into());
        self
    }

    /// Attach a validation error, as a previous failed submit would
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn is_hidden(&self, id: &ElementId) -> bool {
        self.hidden.contains(id)
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Every command applied so far, in order
    pub fn applied(&self) -> &[UiCommand] {
        &self.applied
    }
}

impl SettingsForm for InMemoryForm {
    fn value(&self, id: &ElementId) -> String {
        self.values.get(id).cloned().unwrap_or_default()
    }

    fn apply(&mut self, command: &UiCommand) {
        match command {
            UiCommand::Show(id) => {
                self.hidden.remove(id);
            }
            UiCommand::Hide(id) => {
                self.hidden.insert(id.clone());
            }
            UiCommand::SetValue { id, value } => {
                self.values.insert(id.clone(), value.clone());
            }
            UiCommand::ClearErrors => self.errors.clear(),
            UiCommand::DisableForm => self.disabled = true,
            UiCommand::EnableForm => self.disabled = false,
            UiCommand::Alert(message) => self.alerts.push(message.clone()),
        }
        self.applied.push(command.clone());
    }
}
