use studio_models::contact::{schema::CONTACT_SCHEMA, ContactField};

/// Value and validation feedback of a single input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    value: String,
    touched: bool,
    errors: Vec<&'static str>,
}

impl FieldState {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the input has lost focus at least once.
    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn errors(&self) -> &[&'static str] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors as shown below the input, or `None` if there is nothing to show.
    pub fn error_text(&self) -> Option<String> {
        (self.touched && self.has_errors()).then(|| self.errors.join(", "))
    }

    pub(crate) fn change(&mut self, value: String) {
        self.value = value;
    }

    pub(crate) fn blur(&mut self, field: ContactField) {
        self.touched = true;
        self.errors = CONTACT_SCHEMA.validate_field(field, &self.value);
    }
}

#[cfg(test)]
mod tests {
    use studio_models::contact::schema::NAME_TOO_SHORT;

    use super::*;

    #[test]
    fn change_does_not_validate() {
        let mut sut = FieldState::default();

        sut.change("J".into());

        assert_eq!(sut.value(), "J");
        assert!(!sut.touched());
        assert!(!sut.has_errors());
        assert_eq!(sut.error_text(), None);
    }

    #[test]
    fn blur_validates() {
        let mut sut = FieldState::default();
        sut.change("J".into());

        sut.blur(ContactField::Name);

        assert!(sut.touched());
        assert_eq!(sut.errors(), [NAME_TOO_SHORT]);
        assert_eq!(sut.error_text().as_deref(), Some(NAME_TOO_SHORT));

        sut.change("Jan".into());
        sut.blur(ContactField::Name);

        assert!(!sut.has_errors());
    }
}
