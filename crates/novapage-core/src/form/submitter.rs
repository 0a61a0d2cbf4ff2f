use serde::Deserialize;
use tracing::{debug, info, warn};

use super::transport::{FormTransport, TransportResponse};
use super::validation::{ContactForm, Validator};
use super::FormError;
use crate::config::FormConfig;
use crate::timer::Millis;

/// Lifecycle of one contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Error,
}

/// A validated request waiting to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub endpoint: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct RejectionBody {
    #[serde(default)]
    errors: Vec<RejectionItem>,
}

#[derive(Debug, Deserialize)]
struct RejectionItem {
    #[serde(default)]
    message: String,
}

/// Drives validation and submission for the contact form.
///
/// Sending is split into [`begin`](Self::begin) and
/// [`complete`](Self::complete) so an event loop can run the request on a
/// background task; [`submit`](Self::submit) does both in one call.
#[derive(Debug, Clone)]
pub struct FormSubmitter {
    state: SubmissionState,
    endpoint: Option<String>,
    validator: Validator,
    success_display_ms: Millis,
}

impl FormSubmitter {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            state: SubmissionState::Idle,
            endpoint: config.endpoint.clone(),
            validator: Validator::new(config),
            success_display_ms: config.success_display_ms,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Validate `form` and move to `Submitting`.
    ///
    /// Rejected while a request is already in flight. Validation failures
    /// never reach the network.
    pub fn begin(&mut self, form: &ContactForm) -> Result<Submission, FormError> {
        if self.is_busy() {
            return Err(FormError::InFlight);
        }

        self.state = SubmissionState::Validating;
        if let Err(e) = self.validator.validate(form) {
            debug!(error = %e, "Contact form failed validation");
            self.state = SubmissionState::Error;
            return Err(e.into());
        }

        let Some(endpoint) = self.endpoint.clone() else {
            warn!("Contact form has no endpoint configured");
            self.state = SubmissionState::Error;
            return Err(FormError::MissingEndpoint);
        };

        self.state = SubmissionState::Submitting;
        Ok(Submission {
            endpoint,
            fields: form.fields(),
        })
    }

    /// Record the transport outcome.
    ///
    /// On success returns how long the success state should be shown before
    /// [`reset`](Self::reset).
    pub fn complete(&mut self, result: crate::Result<TransportResponse>) -> Result<Millis, FormError> {
        if !self.is_busy() {
            warn!(state = ?self.state, "Submission completed without being in flight");
        }

        let outcome = match result {
            Ok(response) if response.is_success() => Ok(self.success_display_ms),
            Ok(response) => Err(rejection(&response)),
            Err(e) => Err(FormError::TransportFailure(e)),
        };

        match &outcome {
            Ok(_) => {
                info!("Contact form sent");
                self.state = SubmissionState::Success;
            }
            Err(e) => {
                warn!(error = %e, "Contact form submission failed");
                self.state = SubmissionState::Error;
            }
        }
        outcome
    }

    /// Leave the success state once its display window has elapsed.
    /// Returns `false` when there was no success to leave.
    pub fn reset(&mut self) -> bool {
        if self.state != SubmissionState::Success {
            return false;
        }
        self.state = SubmissionState::Idle;
        true
    }

    pub async fn submit<T>(&mut self, transport: &T, form: &ContactForm) -> Result<Millis, FormError>
    where
        T: FormTransport + ?Sized,
    {
        let submission = self.begin(form)?;
        let result = transport.post(&submission.endpoint, &submission.fields).await;
        self.complete(result)
    }
}

/// Turn a non-2xx reply into the message shown to the visitor
fn rejection(response: &TransportResponse) -> FormError {
    match serde_json::from_str::<RejectionBody>(&response.body) {
        Ok(body) if !body.errors.is_empty() => FormError::ServerRejection(
            body.errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => FormError::ServerRejectionUnparsed {
            status: response.status,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::Error;

    /// Replies with a canned response and counts calls
    struct CannedTransport {
        reply: Option<TransportResponse>,
        calls: AtomicUsize,
    }

    impl CannedTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Some(TransportResponse {
                    status,
                    body: body.to_string(),
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn unreachable() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl FormTransport for CannedTransport {
        async fn post(&self, _endpoint: &str, _fields: &[(String, String)]) -> crate::Result<TransportResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .ok_or_else(|| Error::Other("connection refused".to_string()))
        }
    }

    fn submitter() -> FormSubmitter {
        FormSubmitter::new(&FormConfig::default()).with_endpoint("https://forms.example.com/f/abc")
    }

    fn valid() -> ContactForm {
        ContactForm::new("Ada", "ada@example.com", "Hello there, friend")
    }

    #[tokio::test]
    async fn test_short_message_fails_before_network() {
        let transport = CannedTransport::replying(200, "{}");
        let mut form_submitter = submitter();
        let form = ContactForm::new("Ada", "ada@example.com", "hi");

        let err = form_submitter.submit(&transport, &form).await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a message (at least 10 characters)");
        assert_eq!(form_submitter.state(), SubmissionState::Error);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_success_then_reset_to_idle() {
        let transport = CannedTransport::replying(200, r#"{"ok":true}"#);
        let mut form_submitter = submitter();

        let display = form_submitter.submit(&transport, &valid()).await.unwrap();
        assert_eq!(display, 3000);
        assert_eq!(form_submitter.state(), SubmissionState::Success);

        assert!(form_submitter.reset());
        assert_eq!(form_submitter.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_server_error_messages_shown_verbatim() {
        let transport = CannedTransport::replying(422, r#"{"errors":[{"message":"bad email"}]}"#);
        let mut form_submitter = submitter();

        let err = form_submitter.submit(&transport, &valid()).await.unwrap_err();
        assert_eq!(err.to_string(), "bad email");
        assert_eq!(form_submitter.state(), SubmissionState::Error);
    }

    #[tokio::test]
    async fn test_multiple_server_errors_joined() {
        let transport = CannedTransport::replying(
            422,
            r#"{"errors":[{"message":"bad email"},{"message":"too spammy"}]}"#,
        );
        let err = submitter().submit(&transport, &valid()).await.unwrap_err();
        assert_eq!(err.to_string(), "bad email, too spammy");
    }

    #[tokio::test]
    async fn test_unparsed_rejection_is_generic() {
        for body in ["<html>oops</html>", "{}", r#"{"errors":[]}"#] {
            let transport = CannedTransport::replying(500, body);
            let err = submitter().submit(&transport, &valid()).await.unwrap_err();
            assert!(matches!(err, FormError::ServerRejectionUnparsed { status: 500 }), "{body}");
            assert_eq!(err.to_string(), "Something went wrong. Please try again.");
        }
    }

    #[tokio::test]
    async fn test_transport_failure_message() {
        let transport = CannedTransport::unreachable();
        let mut form_submitter = submitter();
        let err = form_submitter.submit(&transport, &valid()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Network error. Please check your connection and try again."
        );
        assert_eq!(form_submitter.state(), SubmissionState::Error);
    }

    #[test]
    fn test_begin_rejected_while_in_flight() {
        let mut form_submitter = submitter();
        let submission = form_submitter.begin(&valid()).unwrap();
        assert_eq!(submission.endpoint, "https://forms.example.com/f/abc");
        assert!(matches!(form_submitter.begin(&valid()), Err(FormError::InFlight)));
        assert_eq!(form_submitter.state(), SubmissionState::Submitting);
    }

    #[test]
    fn test_resubmit_allowed_after_error() {
        let mut form_submitter = submitter();
        let _ = form_submitter.begin(&ContactForm::default());
        assert_eq!(form_submitter.state(), SubmissionState::Error);
        assert!(form_submitter.begin(&valid()).is_ok());
    }

    #[test]
    fn test_missing_endpoint() {
        let mut form_submitter = FormSubmitter::new(&FormConfig::default());
        assert!(matches!(
            form_submitter.begin(&valid()),
            Err(FormError::MissingEndpoint)
        ));
    }

    #[test]
    fn test_reset_only_leaves_success() {
        let mut form_submitter = submitter();
        form_submitter.begin(&valid()).unwrap();
        assert!(!form_submitter.reset());
        assert_eq!(form_submitter.state(), SubmissionState::Submitting);
    }
}
