use std::sync::Arc;

use studio_core_contact_contracts::{ContactService, ContactSubmitError};
use studio_di::Build;
use studio_email_contracts::{DeliveryId, Email, EmailService};
use studio_models::{
    contact::{schema::CONTACT_SCHEMA, ContactInput, ContactSubmission},
    email_address::EmailAddressWithName,
};
use studio_templates_contracts::{
    ContactNotification, ContactNotificationHtmlTemplate, ContactNotificationSubjectTemplate,
    ContactNotificationTextTemplate, TemplateService,
};
use studio_utils::trace_instrument;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Build)]
pub struct ContactServiceImpl<Email, Template> {
    email: Email,
    template: Template,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// The studio inbox that receives every submission.
    pub recipient: Arc<EmailAddressWithName>,
}

impl<EmailS, Template> ContactService for ContactServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    #[trace_instrument(skip(self))]
    async fn submit(&self, input: ContactInput) -> Result<DeliveryId, ContactSubmitError> {
        let submission = CONTACT_SCHEMA.validate(&input).map_err(|err| {
            warn!("Rejected contact form submission: {err}");
            ContactSubmitError::Validation(err)
        })?;

        let email = self.make_email(submission)?;

        let delivery_id = self.email.send(email).await.inspect_err(|err| {
            error!("Failed to deliver contact form submission: {err}");
        })?;

        info!(%delivery_id, "Delivered contact form submission");

        Ok(delivery_id)
    }
}

impl<EmailS, Template> ContactServiceImpl<EmailS, Template>
where
    Template: TemplateService,
{
    fn make_email(&self, submission: ContactSubmission) -> Result<Email, ContactSubmitError> {
        let notification = ContactNotification {
            name: submission.name.into_inner(),
            email: submission.email.to_string(),
            phone: submission.phone.into_inner(),
            message: submission.message.into_inner(),
        };

        let subject = self
            .template
            .render(&ContactNotificationSubjectTemplate(notification.clone()))?
            .replace(['\r', '\n'], " ");
        let html_body = self
            .template
            .render(&ContactNotificationHtmlTemplate(notification.clone()))?;
        let text_body = self
            .template
            .render(&ContactNotificationTextTemplate(notification))?;

        Ok(Email {
            recipient: (*self.config.recipient).clone(),
            subject,
            html_body,
            text_body,
            reply_to: Some(submission.email),
        })
    }
}
