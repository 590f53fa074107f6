use std::sync::Arc;

use studio_di::Build;
use studio_templates_contracts::{Template, TemplateService, BASE_TEMPLATE, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone, Default, Build)]
pub struct TemplateServiceImpl {
    #[state]
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        // templates are compiled into the binary, so any error here is a bug
        let (name, template) = BASE_TEMPLATE;
        tera.add_raw_template(name, template).unwrap();

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template).unwrap();
        }

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state
            .0
            .render(T::NAME, &context)
            .inspect_err(|err| tracing::error!("Failed to render template {}: {err}", T::NAME))
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use studio_templates_contracts::{
        ContactNotification, ContactNotificationHtmlTemplate, ContactNotificationSubjectTemplate,
        ContactNotificationTextTemplate,
    };

    use super::*;

    fn notification() -> ContactNotification {
        ContactNotification {
            name: "Jan Kowalski".into(),
            email: "jan@example.com".into(),
            phone: "123456789".into(),
            message: "Szukam fotografa na komunię w maju.".into(),
        }
    }

    #[test]
    fn subject() {
        // Arrange
        let sut = TemplateServiceImpl::default();

        // Act
        let result = sut.render(&ContactNotificationSubjectTemplate(notification()));

        // Assert
        assert_eq!(result.unwrap(), "Nowa wiadomość od Jan Kowalski");
    }

    #[test]
    fn text() {
        // Arrange
        let sut = TemplateServiceImpl::default();

        // Act
        let result = sut
            .render(&ContactNotificationTextTemplate(notification()))
            .unwrap();

        // Assert
        assert!(result.contains("Imię i nazwisko: Jan Kowalski\n"));
        assert!(result.contains("E-mail: jan@example.com\n"));
        assert!(result.contains("Telefon: 123456789\n"));
        assert!(result.contains("Szukam fotografa na komunię w maju."));
    }

    #[test]
    fn html() {
        // Arrange
        let sut = TemplateServiceImpl::default();

        // Act
        let result = sut
            .render(&ContactNotificationHtmlTemplate(notification()))
            .unwrap();

        // Assert
        assert!(result.starts_with("<!DOCTYPE html>"));
        assert!(result.contains("<td style=\"padding: 8px;\">Jan Kowalski</td>"));
        assert!(result.contains("123456789"));
    }

    #[test]
    fn html_escapes_user_input() {
        // Arrange
        let sut = TemplateServiceImpl::default();
        let notification = ContactNotification {
            message: "<script>alert(1)</script>".into(),
            ..notification()
        };

        // Act
        let result = sut
            .render(&ContactNotificationHtmlTemplate(notification))
            .unwrap();

        // Assert
        assert!(!result.contains("<script>"));
        assert!(result.contains("&lt;script&gt;"));
    }
}
