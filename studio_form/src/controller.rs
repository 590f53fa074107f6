use studio_models::contact::{ContactField, ContactInput};

use crate::{ContactResponse, ContactTransport, FieldState, StatusBanner, TransportError};

const TRANSPORT_ERROR_MESSAGE: &str = "Nie udało się wysłać wiadomości. Spróbuj ponownie.";
const UNEXPECTED_ERROR_MESSAGE: &str = "Wystąpił nieoczekiwany błąd.";

const SUBMIT_LABEL: &str = "Wyślij wiadomość";
const SUBMITTING_LABEL: &str = "Wysyłanie...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

/// State machine of the contact form.
///
/// Holding the controller by `&mut` while a submission is in flight is what
/// keeps a second submission from starting.
#[derive(Debug)]
pub struct FormController<Transport> {
    transport: Transport,
    fields: [FieldState; 4],
    state: FormState,
    banner: Option<StatusBanner>,
}

impl<Transport> FormController<Transport>
where
    Transport: ContactTransport,
{
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            fields: Default::default(),
            state: FormState::Editing,
            banner: None,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn field(&self, field: ContactField) -> &FieldState {
        &self.fields[field as usize]
    }

    pub fn values(&self) -> ContactInput {
        let mut input = ContactInput::default();
        for field in ContactField::ALL {
            input.set(field, self.field(field).value().into());
        }
        input
    }

    pub fn banner(&self) -> Option<&StatusBanner> {
        self.banner.as_ref()
    }

    pub fn can_submit(&self) -> bool {
        self.state != FormState::Submitting && !self.fields.iter().any(FieldState::has_errors)
    }

    pub fn button_label(&self) -> &'static str {
        match self.state {
            FormState::Submitting => SUBMITTING_LABEL,
            _ => SUBMIT_LABEL,
        }
    }

    /// Update a field value. Does not validate.
    pub fn change(&mut self, field: ContactField, value: impl Into<String>) {
        if self.state == FormState::Submitting {
            return;
        }
        self.fields[field as usize].change(value.into());
        if matches!(self.state, FormState::Succeeded | FormState::Failed) {
            self.state = FormState::Editing;
        }
    }

    /// Validate a field after it lost focus.
    pub fn blur(&mut self, field: ContactField) {
        self.fields[field as usize].blur(field);
    }

    /// Validate every field and, if all of them are valid, enter
    /// [`FormState::Submitting`] and return the values to send.
    pub fn begin_submit(&mut self) -> Option<ContactInput> {
        if self.state == FormState::Submitting {
            return None;
        }

        for field in ContactField::ALL {
            self.blur(field);
        }
        if !self.can_submit() {
            return None;
        }

        self.banner = None;
        self.state = FormState::Submitting;
        Some(self.values())
    }

    /// Apply the result of the call started by [`Self::begin_submit`].
    pub fn complete_submit(&mut self, result: Result<ContactResponse, TransportError>) {
        if self.state != FormState::Submitting {
            return;
        }

        let banner = match result {
            Ok(ContactResponse::Data(data)) if data.success => {
                self.fields = Default::default();
                StatusBanner::success(data.message)
            }
            Ok(ContactResponse::Data(data)) if data.message.is_empty() => {
                StatusBanner::error(UNEXPECTED_ERROR_MESSAGE)
            }
            Ok(ContactResponse::Data(data)) => StatusBanner::error(data.message),
            Ok(ContactResponse::Error(error)) => {
                tracing::debug!(code = ?error.code, "Contact form submission failed");
                StatusBanner::error(error.message)
            }
            Err(err) => {
                tracing::warn!("Failed to submit contact form: {err}");
                StatusBanner::error(TRANSPORT_ERROR_MESSAGE)
            }
        };

        self.state = if banner.is_success() {
            FormState::Succeeded
        } else {
            FormState::Failed
        };
        self.banner = Some(banner);
    }

    /// Run a whole submission. Returns the resulting state, which is
    /// [`FormState::Editing`] if validation blocked the submission.
    pub async fn submit(&mut self) -> FormState {
        let Some(input) = self.begin_submit() else {
            return self.state;
        };
        let result = self.transport.submit(input).await;
        self.complete_submit(result);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use studio_models::{
        action::{ActionError, ActionErrorCode, ActionResult},
        contact::schema::{INVALID_EMAIL, INVALID_PHONE, MESSAGE_TOO_SHORT, NAME_TOO_SHORT},
    };

    use super::*;
    use crate::{MockContactTransport, StatusKind};

    const SUCCESS_MESSAGE: &str = "Dziękujemy za wiadomość! Skontaktujemy się wkrótce.";
    const DELIVERY_ERROR_MESSAGE: &str =
        "Nie udało się wysłać wiadomości. Spróbuj ponownie później.";

    fn input() -> ContactInput {
        ContactInput {
            name: "Jan Kowalski".into(),
            email: "jan@example.com".into(),
            phone: "123456789".into(),
            message: "Szukam fotografa na komunię w maju.".into(),
        }
    }

    fn filled(transport: MockContactTransport) -> FormController<MockContactTransport> {
        let mut sut = FormController::new(transport);
        let input = input();
        for field in ContactField::ALL {
            sut.change(field, input.get(field));
        }
        sut
    }

    #[test]
    fn initial() {
        let sut = FormController::new(MockContactTransport::new());

        assert_eq!(sut.state(), FormState::Editing);
        assert_eq!(sut.values(), ContactInput::default());
        assert_eq!(sut.banner(), None);
        assert!(sut.can_submit());
        assert_eq!(sut.button_label(), "Wyślij wiadomość");
    }

    #[test]
    fn short_phone_on_blur() {
        // Arrange
        let mut sut = FormController::new(MockContactTransport::new());
        sut.change(ContactField::Phone, "12345");
        assert!(sut.field(ContactField::Phone).errors().is_empty());

        // Act
        sut.blur(ContactField::Phone);

        // Assert
        assert_eq!(sut.field(ContactField::Phone).errors(), [INVALID_PHONE]);
        assert!(!sut.can_submit());
    }

    #[tokio::test]
    async fn submit_blocked_by_validation() {
        // Arrange
        let mut sut = FormController::new(MockContactTransport::new());
        sut.change(ContactField::Name, "J");

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, FormState::Editing);
        assert_eq!(sut.banner(), None);
        for (field, message) in [
            (ContactField::Name, NAME_TOO_SHORT),
            (ContactField::Email, INVALID_EMAIL),
            (ContactField::Phone, INVALID_PHONE),
            (ContactField::Message, MESSAGE_TOO_SHORT),
        ] {
            assert!(sut.field(field).touched());
            assert_eq!(sut.field(field).errors(), [message]);
        }
        assert_eq!(sut.field(ContactField::Name).value(), "J");
    }

    #[tokio::test]
    async fn submit_ok_resets_fields() {
        // Arrange
        let transport = MockContactTransport::new().with_submit(
            input(),
            Ok(ContactResponse::Data(ActionResult {
                success: true,
                message: SUCCESS_MESSAGE.into(),
            })),
        );
        let mut sut = filled(transport);

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, FormState::Succeeded);
        assert_eq!(sut.banner(), Some(&StatusBanner::success(SUCCESS_MESSAGE)));
        assert_eq!(sut.values(), ContactInput::default());
        for field in ContactField::ALL {
            assert!(!sut.field(field).touched());
            assert!(!sut.field(field).has_errors());
        }
        assert!(sut.can_submit());
    }

    #[tokio::test]
    async fn submit_delivery_failed_keeps_fields() {
        // Arrange
        let transport = MockContactTransport::new().with_submit(
            input(),
            Ok(ContactResponse::Error(ActionError {
                code: ActionErrorCode::InternalServerError,
                message: DELIVERY_ERROR_MESSAGE.into(),
            })),
        );
        let mut sut = filled(transport);

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, FormState::Failed);
        assert_eq!(
            sut.banner(),
            Some(&StatusBanner::error(DELIVERY_ERROR_MESSAGE))
        );
        assert_eq!(sut.values(), input());
        assert!(sut.can_submit());
    }

    #[tokio::test]
    async fn submit_unsuccessful_data() {
        for (message, expected) in [
            ("", UNEXPECTED_ERROR_MESSAGE),
            ("Coś poszło nie tak.", "Coś poszło nie tak."),
        ] {
            // Arrange
            let transport = MockContactTransport::new().with_submit(
                input(),
                Ok(ContactResponse::Data(ActionResult {
                    success: false,
                    message: message.into(),
                })),
            );
            let mut sut = filled(transport);

            // Act
            let result = sut.submit().await;

            // Assert
            assert_eq!(result, FormState::Failed);
            assert_eq!(sut.banner(), Some(&StatusBanner::error(expected)));
            assert_eq!(sut.values(), input());
        }
    }

    #[tokio::test]
    async fn submit_transport_error() {
        // Arrange
        let transport = MockContactTransport::new()
            .with_submit(input(), Err(TransportError::UnexpectedResponse(502)));
        let mut sut = filled(transport);

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, FormState::Failed);
        assert_eq!(
            sut.banner(),
            Some(&StatusBanner::error(TRANSPORT_ERROR_MESSAGE))
        );
        assert_eq!(sut.values(), input());
    }

    #[test]
    fn submitting() {
        // Arrange
        let mut sut = filled(MockContactTransport::new());

        // Act
        let first = sut.begin_submit();
        let second = sut.begin_submit();

        // Assert
        assert_eq!(first, Some(input()));
        assert_eq!(second, None);
        assert_eq!(sut.state(), FormState::Submitting);
        assert!(!sut.can_submit());
        assert_eq!(sut.button_label(), "Wysyłanie...");
    }

    #[test]
    fn banner_persists_until_next_attempt() {
        // Arrange
        let mut sut = filled(MockContactTransport::new());
        sut.begin_submit();
        sut.complete_submit(Err(TransportError::UnexpectedResponse(503)));

        // Act
        sut.change(ContactField::Message, "Szukam fotografa na ślub w czerwcu.");

        // Assert
        assert_eq!(sut.state(), FormState::Editing);
        assert_eq!(sut.banner().map(|x| x.kind), Some(StatusKind::Error));

        // Act
        sut.begin_submit();

        // Assert
        assert_eq!(sut.banner(), None);
        assert_eq!(sut.state(), FormState::Submitting);
    }

    #[test]
    fn complete_without_begin_is_ignored() {
        let mut sut = filled(MockContactTransport::new());

        sut.complete_submit(Err(TransportError::UnexpectedResponse(500)));

        assert_eq!(sut.state(), FormState::Editing);
        assert_eq!(sut.banner(), None);
    }
}
