//! Client side of the legacy settings conversion.
//!
//! [`SettingsConverter::convert_settings`] drives one request against the
//! conversion endpoint. What happens to the form is decided by two pure
//! functions, [`begin_commands`] and [`completion_commands`], so the UI
//! behaviour can be checked without a transport.

use crate::form::{FormFields, SettingsForm, UiCommand};
use crate::payload::{self, ConversionResponse, PayloadError};
use crate::transport::ConversionTransport;

pub const NULL_RESPONSE_ALERT: &str = "Error: server response is null";

/// Result of one conversion exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Success { view_path: String, rel_path: String },
    /// The server reported a conversion failure
    ServerError { message: String },
    /// No body, or a body that is not XML
    NullResponse,
    /// XML without the expected children
    Malformed { reason: String },
    /// The request itself failed
    TransportError { message: String },
}

impl ConversionOutcome {
    fn from_payload(decoded: Result<ConversionResponse, PayloadError>) -> Self {
        match decoded {
            Ok(ConversionResponse::Converted {
                view_path,
                rel_path,
            }) => ConversionOutcome::Success {
                view_path,
                rel_path,
            },
            Ok(ConversionResponse::Error { message }) => ConversionOutcome::ServerError { message },
            Err(PayloadError::Null) => ConversionOutcome::NullResponse,
            Err(PayloadError::Malformed(reason)) => ConversionOutcome::Malformed { reason },
        }
    }

    /// Alert text shown to the user, `None` on success
    pub fn alert_message(&self) -> Option<String> {
        match self {
            ConversionOutcome::Success { .. } => None,
            ConversionOutcome::ServerError { message } => Some(format!("Error: {}", message)),
            // a failed exchange leaves the page without a response document
            ConversionOutcome::NullResponse | ConversionOutcome::TransportError { .. } => {
                Some(NULL_RESPONSE_ALERT.to_string())
            }
            ConversionOutcome::Malformed { reason } => {
                Some(format!("Error: malformed server response: {}", reason))
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Success { .. })
    }
}

/// Commands applied before the request is sent
pub fn begin_commands(fields: &FormFields) -> Vec<UiCommand> {
    vec![
        UiCommand::Show(fields.progress_icon.clone()),
        UiCommand::ClearErrors,
        UiCommand::DisableForm,
    ]
}

/// Commands applied once the exchange has completed.
///
/// The form is re-enabled and the progress icon hidden whatever the outcome.
pub fn completion_commands(fields: &FormFields, outcome: &ConversionOutcome) -> Vec<UiCommand> {
    let mut commands = vec![
        UiCommand::EnableForm,
        UiCommand::Hide(fields.progress_icon.clone()),
    ];

    match outcome {
        ConversionOutcome::Success {
            view_path,
            rel_path,
        } => {
            commands.extend([
                UiCommand::Hide(fields.old_settings_row.clone()),
                UiCommand::Hide(fields.old_settings_message.clone()),
                UiCommand::SetValue {
                    id: fields.view_path.clone(),
                    value: String::new(),
                },
                UiCommand::SetValue {
                    id: fields.cc_view_path.clone(),
                    value: view_path.clone(),
                },
                UiCommand::SetValue {
                    id: fields.rel_path.clone(),
                    value: rel_path.clone(),
                },
            ]);
        }
        failed => {
            if let Some(message) = failed.alert_message() {
                commands.push(UiCommand::Alert(message));
            }
        }
    }

    commands
}

/// Converts legacy view-path settings through the server endpoint
#[derive(Debug, Clone)]
pub struct SettingsConverter<T> {
    transport: T,
    fields: FormFields,
}

impl<T: ConversionTransport> SettingsConverter<T> {
    pub fn new(transport: T, fields: FormFields) -> Self {
        Self { transport, fields }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Run one conversion against `form`.
    ///
    /// The form stays disabled while the request is pending. Nothing guards
    /// against a second submission coming from outside this form.
    pub async fn convert_settings<F: SettingsForm>(&self, form: &mut F) -> ConversionOutcome {
        let view_path = form.value(&self.fields.view_path);

        for command in begin_commands(&self.fields) {
            form.apply(&command);
        }

        let outcome = self.request(&view_path).await;

        for command in completion_commands(&self.fields, &outcome) {
            form.apply(&command);
        }

        outcome
    }

    /// Issue the request and classify the response
    pub async fn request(&self, view_path: &str) -> ConversionOutcome {
        match self.transport.request(view_path).await {
            Ok(body) => {
                let outcome = ConversionOutcome::from_payload(payload::decode(body.as_deref()));
                match &outcome {
                    ConversionOutcome::Success { view_path: converted, .. } => {
                        tracing::info!("Converted view path {} to {}", view_path, converted)
                    }
                    other => tracing::warn!("Settings conversion failed: {:?}", other),
                }
                outcome
            }
            Err(e) => {
                tracing::error!("Settings conversion request failed: {}", e);
                ConversionOutcome::TransportError {
                    message: e.to_string(),
                }
            }
        }
    }
}
