use studio_core_contact_impl::ContactServiceImpl;
use studio_core_health_impl::HealthServiceImpl;
use studio_email_impl::EmailServiceImpl;
use studio_shared_impl::time::TimeServiceImpl;
use studio_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = studio_api_rest::RestServer<Health, Contact>;

// Email
pub type Email = EmailServiceImpl;

// Templates
pub type Template = TemplateServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Core
pub type Contact = ContactServiceImpl<Email, Template>;
pub type Health = HealthServiceImpl<Time, Email>;
