//! Contact form validation and submission

mod controls;
mod submitter;
mod transport;
mod validation;

pub use controls::{FormControls, CONTACT_FORM_ID};
pub use submitter::{FormSubmitter, SubmissionState, Submission};
pub use transport::{FormTransport, HttpTransport, TransportResponse};
pub use validation::{ContactForm, ValidationError, Validator};

use thiserror::Error;

/// Why a submission did not succeed.
///
/// The `Display` text of each variant is the message shown to the visitor.
#[derive(Error, Debug)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Messages reported by the server, joined with ", "
    #[error("{0}")]
    ServerRejection(String),

    #[error("Something went wrong. Please try again.")]
    ServerRejectionUnparsed { status: u16 },

    #[error("Network error. Please check your connection and try again.")]
    TransportFailure(#[source] crate::Error),

    #[error("A message is already being sent")]
    InFlight,

    #[error("No form endpoint configured")]
    MissingEndpoint,
}
