//! Client side state of the contact form.
//!
//! [`FormController`] owns the field values and the submission lifecycle and
//! talks to the server through a [`ContactTransport`]. Rendering is left to the
//! caller: everything a view needs (field errors, the status banner, the
//! button label, whether submitting is possible) is derived from the
//! controller's state.

pub use controller::{FormController, FormState};
pub use field::FieldState;
pub use status::{StatusBanner, StatusKind};
pub use transport::{ContactResponse, ContactTransport, HttpContactTransport, TransportError};

#[cfg(any(test, feature = "mock"))]
pub use transport::MockContactTransport;

mod controller;
mod field;
mod status;
mod transport;
